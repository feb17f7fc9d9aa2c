//! Validate command implementation

use crate::error::Result;
use crate::parse;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Result of a parse-only dry run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub csv_path: String,
    pub rows: usize,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
}

/// Parse the CSV extract without touching the warehouse.
///
/// Runs the same parser as the load, so a file that validates here will
/// not fail the parse stage of a real run.
pub fn cmd_validate(csv_path: &Path) -> Result<ValidationReport> {
    info!("Validating CSV extract {:?}", csv_path);

    let records = parse::parse_file(csv_path)?;

    // parse_file never returns an empty set
    let (earliest_date, latest_date) = records
        .iter()
        .skip(1)
        .fold((records[0].date, records[0].date), |(min, max), r| {
            (min.min(r.date), max.max(r.date))
        });

    Ok(ValidationReport {
        csv_path: csv_path.display().to_string(),
        rows: records.len(),
        earliest_date,
        latest_date,
    })
}

/// Print a validation report to console
pub fn print_validation_report(report: &ValidationReport) {
    println!("\n✓ CSV extract is valid");
    println!("  File: {}", report.csv_path);
    println!("  Data rows: {}", report.rows);
    println!(
        "  Date range: {} – {}",
        report.earliest_date, report.latest_date
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_validate_reports_rows_and_dates() {
        let file = write_csv(
            "ID,Date,Region,City,Category,Product,Qty,UnitPrice,TotalPrice\n\
             1,05/02/2026,North,Leeds,Dairy,Milk,2,5.00,10.00\n\
             2,03/01/2026,South,Bristol,Bakery,Bread,1,3.50,3.50\n",
        );

        let report = cmd_validate(file.path()).unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(
            report.earliest_date,
            NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()
        );
        assert_eq!(
            report.latest_date,
            NaiveDate::from_ymd_opt(2026, 2, 5).unwrap()
        );
    }

    #[test]
    fn test_validate_header_only() {
        let file = write_csv("ID,Date,Region,City,Category,Product,Qty,UnitPrice,TotalPrice\n");
        let err = cmd_validate(file.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }
}
