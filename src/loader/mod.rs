//! Load pipeline orchestration
//!
//! One load run is one transaction on one exclusively-owned session:
//! ensure the destination table exists, materialize the full CSV record
//! set, execute the batch merge, commit. Any stage failure rolls the
//! whole transaction back and surfaces a single wrapped error naming the
//! stage; the session is released on every exit path.
//!
//! Retries belong to the invoking scheduler, not here.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::{parse, warehouse};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgConnection, Postgres, Transaction};
use tracing::{debug, info, warn};

/// Outcome of a successful load run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub table: String,
    pub csv_path: String,
    pub rows_loaded: u64,
    pub table_created: bool,
}

/// Batch loader for one CSV snapshot.
///
/// Destination table and CSV path are injected at construction via the
/// configuration value object; nothing is read from global state.
pub struct Loader {
    config: Config,
}

impl Loader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the load end to end and report the number of rows merged.
    pub async fn run(&self) -> Result<LoadReport> {
        info!(
            "Starting load from {:?} into {}",
            self.config.load.csv_path, self.config.load.table
        );

        let mut conn = warehouse::connect(&self.config.warehouse)
            .await
            .map_err(|e| e.at_stage("connect"))?;

        let result = self.run_in_transaction(&mut conn).await;

        // Scoped acquisition: the session is released whether the run
        // committed or rolled back.
        if let Err(e) = conn.close().await {
            warn!("Error closing warehouse connection: {}", e);
        }

        result
    }

    async fn run_in_transaction(&self, conn: &mut PgConnection) -> Result<LoadReport> {
        // The session is already open here, so a begin failure is
        // transaction machinery, not a connection failure.
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| Error::Merge(e).at_stage("begin"))?;

        match self.run_stages(&mut tx).await {
            Ok(report) => {
                tx.commit()
                    .await
                    .map_err(|e| Error::Merge(e).at_stage("commit"))?;
                info!("Loaded {} rows into {}", report.rows_loaded, report.table);
                Ok(report)
            }
            Err(err) => {
                // No row changes from this run may survive a failure.
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    async fn run_stages(&self, tx: &mut Transaction<'_, Postgres>) -> Result<LoadReport> {
        let table = &self.config.load.table;

        let table_created = warehouse::ensure_table(&mut *tx, table)
            .await
            .map_err(|e| e.at_stage("schema"))?;

        // The whole file is read and validated before any write is issued,
        // so a late parse failure never leaves a partial batch behind.
        let records = parse::parse_file(&self.config.load.csv_path)
            .map_err(|e| e.at_stage("parse"))?;
        debug!("Record set materialized: {} rows", records.len());

        let rows_loaded = warehouse::merge_records(&mut *tx, table, &records)
            .await
            .map_err(|e| e.at_stage("merge"))?;

        Ok(LoadReport {
            table: table.clone(),
            csv_path: self.config.load.csv_path.display().to_string(),
            rows_loaded,
            table_created,
        })
    }
}
