//! Status command implementation

use crate::config::Config;
use crate::error::Result;
use crate::warehouse;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub table: String,
    pub csv_path: String,
    pub connected: bool,
    pub table_exists: bool,
    pub row_count: i64,
}

/// Get warehouse status: connection probe, table existence, row count.
///
/// Read-only; never creates the table or writes anything.
pub async fn cmd_status(config: &Config) -> Result<StatusInfo> {
    info!("Getting status");

    let (connected, table_exists, row_count) =
        match warehouse::connect(&config.warehouse).await {
            Ok(mut conn) => match warehouse::table_exists(&mut conn, &config.load.table).await {
                Ok(true) => {
                    let count = warehouse::count_rows(&mut conn, &config.load.table)
                        .await
                        .unwrap_or(0);
                    (true, true, count)
                }
                Ok(false) => (true, false, 0),
                Err(e) => {
                    tracing::debug!("Table existence check failed: {:?}", e);
                    (true, false, 0)
                }
            },
            Err(e) => {
                tracing::debug!("Warehouse connection error: {:?}", e);
                (false, false, 0)
            }
        };

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        host: config.warehouse.host.clone(),
        port: config.warehouse.port,
        database: config.warehouse.database.clone(),
        table: config.load.table.clone(),
        csv_path: config.load.csv_path.display().to_string(),
        connected,
        table_exists,
        row_count,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 sales-loader Status\n");
    println!("Configuration: {}", status.config_path);
    println!("CSV extract: {}", status.csv_path);
    println!("\nWarehouse:");
    println!(
        "  Target: {}:{}/{}",
        status.host, status.port, status.database
    );
    println!("  Table: {}", status.table);

    let connection_status = if status.connected {
        if status.table_exists {
            "✓ Connected"
        } else {
            "⚠ Connected (table not created - it is created by the next load)"
        }
    } else {
        "✗ Not connected"
    };
    println!("  Status: {}", connection_status);
    println!("  Rows: {}", status.row_count);
}
