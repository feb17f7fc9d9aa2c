//! CSV record parsing
//!
//! This module turns one CSV snapshot into the full in-memory record set:
//! - Strict, case-sensitive header match
//! - Per-field type coercion (date, integer qty, decimal prices)
//! - Whole-file materialization before any write begins
//!
//! A late parse failure therefore never causes a partial write: the loader
//! only sees either the complete record set or an error.

use crate::error::{Error, Result};
use crate::models::SalesRecord;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Expected CSV header, in order, matched case-sensitively
pub const EXPECTED_HEADER: [&str; 9] = [
    "ID",
    "Date",
    "Region",
    "City",
    "Category",
    "Product",
    "Qty",
    "UnitPrice",
    "TotalPrice",
];

/// Parse an entire CSV source into an ordered record set.
///
/// Fails on the first malformed field, identifying the offending data row
/// (1-based) and field. A header-only input yields [`Error::EmptyInput`].
pub fn parse_all<R: Read>(input: R) -> Result<Vec<SalesRecord>> {
    // Flexible so short or long rows reach the per-row arity check and
    // report a data-row number instead of an opaque reader error.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    check_header(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        records.push(SalesRecord::from_csv_row(idx + 1, &row)?);
    }

    if records.is_empty() {
        return Err(Error::EmptyInput);
    }

    debug!("Parsed {} records", records.len());
    Ok(records)
}

/// Parse a CSV file from disk.
pub fn parse_file(path: &Path) -> Result<Vec<SalesRecord>> {
    debug!("Reading CSV extract from {:?}", path);
    let file = std::fs::File::open(path)?;
    parse_all(std::io::BufReader::new(file))
}

fn check_header(headers: &csv::StringRecord) -> Result<()> {
    let found: Vec<&str> = headers.iter().collect();
    if found != EXPECTED_HEADER {
        return Err(Error::Header {
            expected: EXPECTED_HEADER.join(","),
            found: found.join(","),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const HEADER: &str = "ID,Date,Region,City,Category,Product,Qty,UnitPrice,TotalPrice";

    fn csv_input(rows: &[&str]) -> Vec<u8> {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out.into_bytes()
    }

    #[test]
    fn test_parse_two_rows() {
        let input = csv_input(&[
            "1,05/02/2026,North,Leeds,Dairy,Milk,2,5.00,10.00",
            "2,06/02/2026,South,Bristol,Bakery,Bread,1,3.50,3.50",
        ]);

        let records = parse_all(input.as_slice()).unwrap();
        assert_eq!(records.len(), 2);

        // Input order is preserved
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].id, "2");

        assert_eq!(records[0].qty, 2);
        assert_eq!(records[0].unit_price, Decimal::from_str("5.00").unwrap());
        assert_eq!(records[0].total_price, Decimal::from_str("10.00").unwrap());
        assert_eq!(
            records[1].date,
            NaiveDate::from_ymd_opt(2026, 2, 6).unwrap()
        );
    }

    #[test]
    fn test_header_only_is_empty_input() {
        let input = csv_input(&[]);
        let err = parse_all(input.as_slice()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn test_header_mismatch() {
        let input = b"id,date,region,city,category,product,qty,unitprice,totalprice\n";
        let err = parse_all(input.as_slice()).unwrap_err();
        assert!(matches!(err, Error::Header { .. }));
    }

    #[test]
    fn test_reordered_header_rejected() {
        let input =
            b"Date,ID,Region,City,Category,Product,Qty,UnitPrice,TotalPrice\n05/02/2026,1,N,L,D,M,1,1.00,1.00\n";
        let err = parse_all(input.as_slice()).unwrap_err();
        assert!(matches!(err, Error::Header { .. }));
    }

    #[test]
    fn test_bad_qty_names_row_and_field() {
        let input = csv_input(&[
            "1,05/02/2026,North,Leeds,Dairy,Milk,2,5.00,10.00",
            "2,06/02/2026,South,Bristol,Bakery,Bread,abc,3.50,3.50",
        ]);

        let err = parse_all(input.as_slice()).unwrap_err();
        match err {
            Error::Parse { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "Qty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_arity_row_names_data_row() {
        let input = csv_input(&[
            "1,05/02/2026,North,Leeds,Dairy,Milk,2,5.00,10.00",
            "2,06/02/2026,South,Bristol,Bakery,Bread,1,3.50",
        ]);

        let err = parse_all(input.as_slice()).unwrap_err();
        match err {
            Error::Parse { row, message, .. } => {
                assert_eq!(row, 2);
                assert!(message.contains("9 fields"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_returns_no_partial_result() {
        // First row is fine, second is malformed: parse_all must fail,
        // not hand back the one good record.
        let input = csv_input(&[
            "1,05/02/2026,North,Leeds,Dairy,Milk,2,5.00,10.00",
            "2,not-a-date,South,Bristol,Bakery,Bread,1,3.50,3.50",
        ]);
        assert!(parse_all(input.as_slice()).is_err());
    }

    #[test]
    fn test_free_text_fields_pass_through() {
        let input = csv_input(&["x-9,05/02/2026,North East,Newcastle upon Tyne,Fruit & Veg,Cox Apples,4,0.45,1.80"]);
        let records = parse_all(input.as_slice()).unwrap();
        assert_eq!(records[0].region, "North East");
        assert_eq!(records[0].city, "Newcastle upon Tyne");
        assert_eq!(records[0].category, "Fruit & Veg");
        assert_eq!(records[0].product, "Cox Apples");
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/nonexistent/extract.csv")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
