//! Load command implementation

use crate::config::Config;
use crate::error::Result;
use crate::loader::{LoadReport, Loader};

/// Run the batch load: one CSV snapshot merged into the warehouse table
/// inside a single transaction.
pub async fn cmd_load(config: Config) -> Result<LoadReport> {
    Loader::new(config).run().await
}

/// Print a load report to console
pub fn print_load_report(report: &LoadReport) {
    println!("\n✓ Load complete");
    println!("  Table: {}", report.table);
    println!("  CSV: {}", report.csv_path);
    println!("  Rows loaded: {}", report.rows_loaded);
    if report.table_created {
        println!("  Table created by this run");
    }
}
