use std::sync::Arc;

use derive_new::new;
use sqlx::SqlitePool;

use crate::{
    args::ServeArgs,
    config::Configuration,
    data_impl::sqlite,
    providers::{DependencyProvider, SqliteDependencyProvider},
    routes::root::RouterConfig,
};

#[derive(new, Clone)]
pub struct ServiceState {
    pub pool: SqlitePool,
    pub config: Arc<Configuration>,
    pub routes: Arc<RouterConfig>,
    pub provider: Arc<dyn DependencyProvider>,
}

impl ServiceState {
    pub async fn from_args(args: &ServeArgs) -> eyre::Result<Self> {
        let config = Arc::new(Configuration::resolve(args)?);

        Self::from_config(config, args.routes.clone()).await
    }

    pub async fn from_config(
        config: Arc<Configuration>,
        routes: RouterConfig,
    ) -> eyre::Result<Self> {
        let pool = sqlite::connect(
            &config.database.url,
            config.database.max_connections,
        )
        .await?;

        sqlite::migrate(&pool).await?;

        let provider = Arc::new(SqliteDependencyProvider::new(
            pool.clone(),
            config.clone(),
        ));

        Ok(Self::new(pool, config, Arc::new(routes), provider))
    }

    /// Closes the shared pool. Called once, on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
