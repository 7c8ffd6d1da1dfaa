use auteur_service::config::Config;
use auteur_service::database::Sqlite;
use auteur_service::http::{AppState, HttpServer, HttpServerConfig};
use auteur_service::services::Service;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let sqlite = Sqlite::new(config.database_url()).await?;
    let service = Service::new(sqlite, config.author_delete_policy());

    let state = AppState::new(service);
    let server_config = HttpServerConfig::new(config.server_port());
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
