//! PostgreSQL warehouse access
//!
//! This module provides:
//! - Connection establishment from the configured parameter bundle
//! - Table existence check and creation (schema guard)
//! - The batch merge statement over the full record set
//!
//! All statement-level failures are tagged with the error variant of the
//! stage they belong to (`Connection`, `Schema`, `Merge`); transaction
//! orchestration lives in the loader.

mod schema;

pub use schema::*;

use crate::config::WarehouseConfig;
use crate::error::{Error, Result};
use crate::models::SalesRecord;
use sqlx::postgres::{PgConnectOptions, Postgres};
use sqlx::{ConnectOptions, PgConnection, QueryBuilder};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info};

/// Rows per merge statement. Each row binds 9 parameters and PostgreSQL
/// caps a single statement at 65535 binds.
pub const MERGE_CHUNK_ROWS: usize = 1000;

/// Open a single, exclusively-owned warehouse session.
///
/// The caller owns the connection for the whole run; there is no pool,
/// because one load run is one transaction on one session.
pub async fn connect(config: &WarehouseConfig) -> Result<PgConnection> {
    debug!(
        "Connecting to warehouse at {}:{}/{}",
        config.host, config.port, config.database
    );

    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user);

    if let Some(password) = config.password() {
        options = options.password(&password);
    }

    options.connect().await.map_err(Error::Connection)
}

/// Check whether `table` exists in the connected database.
pub async fn table_exists(conn: &mut PgConnection, table: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(TABLE_EXISTS_SQL)
        .bind(table)
        .fetch_one(conn)
        .await
        .map_err(Error::Schema)?;
    Ok(exists)
}

/// Ensure `table` exists, creating it with the canonical column set when
/// absent. Idempotent: an existing table is left untouched, whatever its
/// shape (no migration, no column diffing).
///
/// Returns true if the table was created by this call.
pub async fn ensure_table(conn: &mut PgConnection, table: &str) -> Result<bool> {
    if table_exists(&mut *conn, table).await? {
        debug!("Table {} already exists", table);
        return Ok(false);
    }

    info!("Creating table {}", table);
    sqlx::query(&create_table_sql(table))
        .execute(conn)
        .await
        .map_err(Error::Schema)?;
    Ok(true)
}

/// Execute the batch merge over all records.
///
/// Duplicate ids within the record set are collapsed last-write-wins
/// before any statement is built: a multi-row upsert may not touch the
/// same row twice, and the repeated key is a natural-key collision, not
/// an error. Each chunk is then one multi-row
/// `INSERT … ON CONFLICT (id) DO UPDATE` statement; the caller runs this
/// inside its transaction, so partial chunk progress is never visible
/// outside it.
pub async fn merge_records(
    conn: &mut PgConnection,
    table: &str,
    records: &[SalesRecord],
) -> Result<u64> {
    let collapsed = collapse_duplicates(records);
    if collapsed.len() < records.len() {
        debug!(
            "Collapsed {} duplicate ids in the record set",
            records.len() - collapsed.len()
        );
    }
    debug!("Merging {} records into {}", collapsed.len(), table);

    let mut affected = 0u64;
    for chunk in collapsed.chunks(MERGE_CHUNK_ROWS) {
        let mut query = merge_chunk_query(table, chunk);
        let result = query
            .build()
            .execute(&mut *conn)
            .await
            .map_err(Error::Merge)?;
        affected += result.rows_affected();
    }

    Ok(affected)
}

/// Collapse repeated ids to the last occurrence, keeping first-seen order.
fn collapse_duplicates(records: &[SalesRecord]) -> Vec<&SalesRecord> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut collapsed: Vec<&SalesRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.entry(record.id.as_str()) {
            Entry::Occupied(entry) => collapsed[*entry.get()] = record,
            Entry::Vacant(entry) => {
                entry.insert(collapsed.len());
                collapsed.push(record);
            }
        }
    }

    collapsed
}

/// Count the rows currently in `table` (read-only status probe).
pub async fn count_rows(conn: &mut PgConnection, table: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!(r#"SELECT COUNT(*) FROM "{table}""#))
        .fetch_one(conn)
        .await
        .map_err(Error::Schema)?;
    Ok(count)
}

fn merge_chunk_query<'a>(table: &str, chunk: &[&'a SalesRecord]) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new(merge_insert_sql(table));
    query.push_values(chunk.iter().copied(), |mut row, record| {
        row.push_bind(&record.id)
            .push_bind(record.date)
            .push_bind(&record.region)
            .push_bind(&record.city)
            .push_bind(&record.category)
            .push_bind(&record.product)
            .push_bind(record.qty)
            .push_bind(record.unit_price)
            .push_bind(record.total_price);
    });
    query.push(MERGE_ON_CONFLICT_SQL);
    query
}
