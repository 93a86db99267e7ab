use crate::config::ConnectTarget;
use crate::error::Result;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// One long-lived connection, reused for every write of a run.
pub async fn create_pool(target: &ConnectTarget) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(30));

    let pool = match target {
        ConnectTarget::Url(url) => options.connect(url).await?,
        ConnectTarget::Settings(settings) => {
            let connect = PgConnectOptions::new()
                .host(&settings.host)
                .port(settings.port)
                .database(&settings.database)
                .username(&settings.username)
                .password(&settings.password);
            options.connect_with(connect).await?
        }
    };
    Ok(pool)
}
