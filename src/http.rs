pub mod authors;
pub mod books;
pub mod handler;

use crate::services::{AuthorService, BookService};
use anyhow::Context;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Debug)]
pub struct AppState<S> {
    pub service: Arc<S>,
}

impl<S> AppState<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

#[derive(Debug)]
pub struct HttpServerConfig {
    port: u16,
}

impl HttpServerConfig {
    pub const fn new(port: u16) -> Self {
        Self { port }
    }
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new<S>(state: AppState<S>, config: HttpServerConfig) -> anyhow::Result<Self>
    where
        S: AuthorService + BookService,
    {
        let router = router(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("Failed to bind to port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!("listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router)
            .await
            .context("Received error from running server")?;
        Ok(())
    }
}

/// Builds the full application router, `/api` routes plus request tracing.
pub fn router<S>(state: AppState<S>) -> Router
where
    S: AuthorService + BookService,
{
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes<S>() -> Router<AppState<S>>
where
    S: AuthorService + BookService,
{
    Router::new()
        .route(
            "/auteurs",
            get(authors::list_authors::<S>).post(authors::create_author::<S>),
        )
        .route(
            "/auteurs/{id}",
            get(authors::get_author::<S>)
                .put(authors::update_author::<S>)
                .delete(authors::delete_author::<S>),
        )
        .route(
            "/livres",
            get(books::list_books::<S>).post(books::create_book::<S>),
        )
        .route(
            "/livres/{id}",
            get(books::get_book::<S>)
                .put(books::update_book::<S>)
                .delete(books::delete_book::<S>),
        )
}
