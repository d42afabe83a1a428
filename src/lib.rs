pub mod booking;
pub mod catalog;
pub mod config;
pub mod controllers;
pub mod database;
pub mod middleware;
pub mod models;

use anyhow::Context;
use booking::{PgStore, ReservationCoordinator};
use catalog::Catalog;

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub config: config::Config,
    pub catalog: Catalog,
    pub coordinator: ReservationCoordinator<PgStore>,
}

impl AppState {
    pub async fn new(config: config::Config) -> anyhow::Result<Self> {
        let db = database::Database::new(&config.database.url, config.database.pool_size)
            .await
            .context("failed to connect to the database")?;

        db.run_migrations()
            .await
            .context("failed to apply schema migrations")?;

        let store = PgStore::new(db.pool.clone());
        let coordinator = ReservationCoordinator::new(store.clone(), config.booking.clone());
        let catalog = Catalog::new(store);

        Ok(Self {
            db,
            config,
            catalog,
            coordinator,
        })
    }
}
