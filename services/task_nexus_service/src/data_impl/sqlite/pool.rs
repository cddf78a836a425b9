use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Builds the shared process-wide pool. Foreign key enforcement is switched
/// on per connection; the cascading deletes of the schema depend on it.
pub async fn connect(
    url: &str,
    max_connections: u32,
) -> eyre::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // A second connection to an in-memory database would see a separate,
    // empty schema.
    let max_connections = if url.contains(":memory:") {
        1
    } else {
        max_connections
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}
