pub mod queries;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

use crate::config::DatabaseSettings;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

pub async fn establish_connection(settings: &DatabaseSettings) -> Result<SqlitePool, Error> {
    // foreign_keys is on by default, so questions.category is checked by SQLite itself
    let options = SqliteConnectOptions::new()
        .filename(&settings.path)
        .create_if_missing(settings.create_if_missing);
    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
