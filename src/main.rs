use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;
use ts2phc_exporter::cli::{Args, setup_logging};
use ts2phc_exporter::exporter;

fn main() {
    let args = Args::parse();

    if let Err(e) = setup_logging(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancelled on CTRL+C so the listener and the ingestion loop stop together
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => cancellation_token.cancel(),
                Err(e) => {
                    eprintln!("Failed to install CTRL+C signal handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        let run = exporter::run(config, cancellation_token.clone());
        tokio::pin!(run);

        tokio::select! {
            result = &mut run => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                run.await
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
