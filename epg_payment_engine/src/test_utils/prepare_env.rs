use std::path::Path;

use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::{traits::ShopDatabase, SqliteShopDatabase};

/// Creates a fresh throwaway database at `url` with the schema applied, and initialises logging.
pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    apply_schema(url).await;
}

pub fn random_db_path() -> String {
    format!("sqlite://{}/epg_test_store_{}.db", std::env::temp_dir().display(), rand::random::<u64>())
}

pub async fn apply_schema(url: &str) {
    let db = SqliteShopDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.create_schema().await.expect("Error creating DB schema");
    info!("🚀️ Schema created");
}

pub async fn create_database<P: AsRef<Path>>(path: P) {
    let p = path.as_ref().as_os_str().to_str().unwrap();
    if let Err(e) = Sqlite::drop_database(p).await {
        warn!("Error dropping database {p}: {e:?}");
    }
    Sqlite::create_database(p).await.expect("Error creating database");
    info!("Created Sqlite database {p}");
}
