//! Warehouse SQL definitions

/// Catalog probe for table existence
pub const TABLE_EXISTS_SQL: &str = r#"
SELECT EXISTS (
    SELECT 1
    FROM information_schema.tables
    WHERE table_name = $1
)
"#;

/// DDL for the canonical sales table.
///
/// `created_at` and `updated_at` default to the current time at insert;
/// `created_at` is never touched again, `updated_at` is refreshed by the
/// merge statement.
pub fn create_table_sql(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS "{table}" (
    id VARCHAR(255) PRIMARY KEY,
    date DATE,
    region VARCHAR(255),
    city VARCHAR(255),
    category VARCHAR(255),
    product VARCHAR(255),
    qty INT,
    unitprice DECIMAL(10,2),
    totalprice DECIMAL(10,2),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#
    )
}

/// Column list shared by the merge statement
pub const MERGE_COLUMNS: &str =
    "id, date, region, city, category, product, qty, unitprice, totalprice";

/// `INSERT INTO …` prefix of the merge statement
pub fn merge_insert_sql(table: &str) -> String {
    format!(r#"INSERT INTO "{table}" ({MERGE_COLUMNS}) "#)
}

/// `ON CONFLICT …` suffix of the merge statement: overwrite every non-key
/// column and refresh `updated_at`; `created_at` stays as first written.
pub const MERGE_ON_CONFLICT_SQL: &str = r#" ON CONFLICT (id) DO UPDATE SET
    date = EXCLUDED.date,
    region = EXCLUDED.region,
    city = EXCLUDED.city,
    category = EXCLUDED.category,
    product = EXCLUDED.product,
    qty = EXCLUDED.qty,
    unitprice = EXCLUDED.unitprice,
    totalprice = EXCLUDED.totalprice,
    updated_at = CURRENT_TIMESTAMP"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql("food_sales");
        assert!(sql.contains(r#"CREATE TABLE IF NOT EXISTS "food_sales""#));
        assert!(sql.contains("id VARCHAR(255) PRIMARY KEY"));
        assert!(sql.contains("created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP"));
        assert!(sql.contains("updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_merge_sql_shape() {
        let prefix = merge_insert_sql("food_sales");
        assert!(prefix.contains(r#"INSERT INTO "food_sales""#));
        assert!(prefix.contains("totalprice"));

        // created_at must not be overwritten on conflict
        assert!(!MERGE_ON_CONFLICT_SQL.contains("created_at"));
        assert!(MERGE_ON_CONFLICT_SQL.contains("updated_at = CURRENT_TIMESTAMP"));
    }
}
