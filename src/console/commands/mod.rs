mod callable;
pub mod migrate;
pub mod user;

pub use callable::*;
pub use migrate::MigrateCommand;
pub use user::{PlanCommand, PromoteCommand};

use crate::configuration::get_configuration;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let settings = get_configuration()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(settings.database.connect_options())
        .await?;
    Ok(pool)
}
