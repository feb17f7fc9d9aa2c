//! sales-loader: batch CSV-to-PostgreSQL warehouse loader
//!
//! One stage of a scheduled extract-load-transform pipeline: takes a
//! periodic CSV extract of sales transactions and merges it into a
//! warehouse table, guaranteeing the destination schema exists and that
//! the merge is all-or-nothing.

pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod parse;
pub mod warehouse;

pub use error::{Error, Result};
