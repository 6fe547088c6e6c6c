//! Per-satellite persistence to SQLite.
//!
//! Each flushed epoch is written in a single transaction, one row per GSV
//! satellite sample. A failure on any row rolls the whole epoch back.

use super::EpochSink;
use crate::config::{PersistenceConfig, StationLabels, is_sql_identifier};
use crate::error::{ExporterError, Result};
use crate::models::Epoch;
use chrono::Utc;
use rusqlite::{Connection, params};
use tracing::{debug, info};

/// Writes satellite samples of each epoch to a SQLite table
pub struct SqlitePersistence {
    conn: Connection,
    table: String,
    insert_sql: String,
    labels: StationLabels,
}

impl SqlitePersistence {
    /// Open (or create) the database file and ensure the table exists
    pub fn open(config: &PersistenceConfig, labels: StationLabels) -> Result<Self> {
        let conn = Connection::open(&config.database).map_err(|e| {
            ExporterError::persistence(
                format!("unable to open database {}", config.database.display()),
                e,
            )
        })?;
        info!(
            database = %config.database.display(),
            table = %config.table,
            "Persisting satellite rows"
        );
        Self::with_connection(conn, &config.table, labels)
    }

    /// Use an existing connection, e.g. an in-memory database
    pub fn with_connection(conn: Connection, table: &str, labels: StationLabels) -> Result<Self> {
        if !is_sql_identifier(table) {
            return Err(ExporterError::configuration(format!(
                "database table {:?} is not a plain SQL identifier",
                table
            )));
        }

        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    timestamp TEXT NOT NULL,
                    constellation TEXT NOT NULL,
                    name TEXT NOT NULL,
                    band TEXT NOT NULL,
                    frequency TEXT NOT NULL,
                    satelliteid INTEGER NOT NULL,
                    antenna TEXT NOT NULL,
                    receiver TEXT NOT NULL,
                    azimuth INTEGER NOT NULL,
                    elev INTEGER NOT NULL,
                    snr INTEGER NOT NULL
                )"
            ),
            [],
        )
        .map_err(|e| ExporterError::persistence(format!("unable to create table {}", table), e))?;

        let insert_sql = format!(
            "INSERT INTO {table} \
             (timestamp, constellation, name, band, frequency, satelliteid, antenna, receiver, azimuth, elev, snr) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        );

        Ok(Self {
            conn,
            table: table.to_string(),
            insert_sql,
            labels,
        })
    }

    /// Write all samples of `epoch`; returns the number of rows inserted
    pub fn write_epoch(&mut self, epoch: &Epoch) -> Result<usize> {
        let timestamp = epoch.started_at.unwrap_or_else(Utc::now).to_rfc3339();

        let tx = self
            .conn
            .transaction()
            .map_err(|e| ExporterError::persistence("unable to begin transaction", e))?;

        {
            let mut stmt = tx
                .prepare(&self.insert_sql)
                .map_err(|e| ExporterError::persistence("unable to prepare statement", e))?;

            for sample in &epoch.samples {
                stmt.execute(params![
                    timestamp,
                    sample.identity.constellation,
                    sample.identity.name,
                    sample.identity.band,
                    sample.identity.frequency,
                    sample.satellite_id,
                    self.labels.antenna,
                    self.labels.receiver,
                    sample.azimuth,
                    sample.elevation,
                    sample.snr,
                ])
                .map_err(|e| ExporterError::persistence("unable to insert satellite row", e))?;
            }
        }

        tx.commit()
            .map_err(|e| ExporterError::persistence("failed to commit transaction", e))?;

        debug!(rows = epoch.samples.len(), table = %self.table, "Persisted epoch");
        Ok(epoch.samples.len())
    }

    /// Number of rows currently in the table
    pub fn row_count(&self) -> Result<i64> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get(0)
            })
            .map_err(|e| ExporterError::persistence("unable to count rows", e))
    }
}

impl EpochSink for SqlitePersistence {
    fn name(&self) -> &'static str {
        "persistence"
    }

    fn publish(&mut self, epoch: &Epoch) -> Result<()> {
        self.write_epoch(epoch).map(|_| ())
    }
}
