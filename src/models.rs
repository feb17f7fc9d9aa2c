//! Typed records for the sales warehouse table

use crate::error::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Date format used by the CSV extract (`dd/mm/yyyy`)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One row of the warehouse table.
///
/// `id` is the natural key: a re-load with the same id overwrites every
/// other column and advances `updated_at`, never duplicating the row.
/// The `created_at`/`updated_at` timestamps are owned by the database
/// (column defaults and the merge statement), so they do not appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub id: String,
    pub date: NaiveDate,
    pub region: String,
    pub city: String,
    pub category: String,
    pub product: String,
    pub qty: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl SalesRecord {
    /// Build a record from one CSV data row.
    ///
    /// `row_number` is 1-based over data rows (the header is not counted)
    /// and is used only for error reporting.
    pub fn from_csv_row(row_number: usize, row: &csv::StringRecord) -> Result<Self> {
        if row.len() != 9 {
            return Err(Error::Parse {
                row: row_number,
                field: "-",
                message: format!("expected 9 fields, found {}", row.len()),
            });
        }

        let field = |idx: usize| row.get(idx).unwrap_or_default();

        let date = NaiveDate::parse_from_str(field(1), DATE_FORMAT).map_err(|e| Error::Parse {
            row: row_number,
            field: "Date",
            message: e.to_string(),
        })?;

        let qty = i32::from_str(field(6)).map_err(|e| Error::Parse {
            row: row_number,
            field: "Qty",
            message: e.to_string(),
        })?;

        let unit_price = Decimal::from_str(field(7)).map_err(|e| Error::Parse {
            row: row_number,
            field: "UnitPrice",
            message: e.to_string(),
        })?;

        let total_price = Decimal::from_str(field(8)).map_err(|e| Error::Parse {
            row: row_number,
            field: "TotalPrice",
            message: e.to_string(),
        })?;

        Ok(Self {
            id: field(0).to_string(),
            date,
            region: field(2).to_string(),
            city: field(3).to_string(),
            category: field(4).to_string(),
            product: field(5).to_string(),
            qty,
            unit_price,
            total_price,
        })
    }
}
