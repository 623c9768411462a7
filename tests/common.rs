#![allow(dead_code)]

use fcm_courier::adapters::database::{self, DbPool};
use fcm_courier::config::DatabaseConfig;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("fcm_courier=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub async fn get_test_pool() -> DbPool {
    setup_tracing();
    let config = DatabaseConfig {
        url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DatabaseConfig::default().url),
        ..DatabaseConfig::default()
    };

    let pool = database::init_pool(&config).await.expect("Failed to connect to DB. Is Postgres running?");
    database::run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

pub fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}
