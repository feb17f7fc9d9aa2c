//! Default values for configuration

use std::path::PathBuf;

/// Default warehouse host for local development
pub fn default_warehouse_host() -> String {
    std::env::var("WAREHOUSE_POSTGRES_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
}

/// Default PostgreSQL port
pub fn default_warehouse_port() -> u16 {
    std::env::var("WAREHOUSE_POSTGRES_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5432)
}

/// Default warehouse database name
pub fn default_warehouse_database() -> String {
    std::env::var("WAREHOUSE_POSTGRES_DB").unwrap_or_else(|_| "warehouse".to_string())
}

/// Default warehouse user
pub fn default_warehouse_user() -> String {
    std::env::var("WAREHOUSE_POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string())
}

/// Default environment variable name for the warehouse password
pub fn default_warehouse_password_env() -> String {
    "WAREHOUSE_POSTGRES_PASSWORD".to_string()
}

/// Default destination table name
pub fn default_table_name() -> String {
    "food_sales".to_string()
}

/// Default CSV extract path
pub fn default_csv_path() -> PathBuf {
    PathBuf::from("data/food_sales.csv")
}
