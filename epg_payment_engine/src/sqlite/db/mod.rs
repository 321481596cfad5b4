//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool, or create an atomic
//! transaction as the need arises and call through to the functions without any other changes.
use std::env;

use log::info;
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::SqlitePoolOptions,
    Error as SqlxError,
    Sqlite,
    SqliteConnection,
    SqlitePool,
};

pub mod orders;
pub mod products;

const SQLITE_DB_URL: &str = "sqlite://data/ecommerce.db";

pub fn db_url() -> String {
    let result = env::var("EPG_DATABASE_URL").unwrap_or_else(|_| {
        info!("EPG_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn create_database_if_missing(url: &str) -> Result<(), SqlxError> {
    if !Sqlite::database_exists(url).await? {
        info!("Database {url} does not exist yet. Creating it.");
        Sqlite::create_database(url).await?;
    }
    Ok(())
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates the schema if it does not exist yet. Runs once at process startup; both statements are
/// `IF NOT EXISTS`, so re-running is harmless.
pub async fn create_tables(conn: &mut SqliteConnection) -> Result<(), SqlxError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price TEXT NOT NULL,
            description TEXT NOT NULL
        );
        "#,
    )
    .execute(&mut *conn)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            transaction_uuid TEXT NOT NULL,
            product_code TEXT NOT NULL,
            total_amount TEXT NOT NULL,
            status TEXT NOT NULL
        );
        "#,
    )
    .execute(conn)
    .await?;
    Ok(())
}
