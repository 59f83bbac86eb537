//! HTTP server command.

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context as _, Result};
use parts_market::search::SearchService;
use parts_market::seed;
use parts_market::store::{CatalogStore, ProductStore};

use super::ServeArgs;
use crate::context::Context;
use crate::server::{self, AppState};

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;
    if args.seed {
        let summary = seed::load_sample(&store)
            .await
            .context("Failed to load sample catalog")?;
        ctx.output.debug(&format!("Seeded {} products", summary.products));
    } else {
        store.migrate().await.context("Failed to create schema")?;
    }

    let store = Arc::new(store);
    let products: Arc<dyn ProductStore> = store.clone();
    let catalog: Arc<dyn CatalogStore> = store;
    let state = web::Data::new(AppState {
        service: SearchService::new(products).with_timeout(ctx.query_timeout()),
        catalog,
        limits: ctx.config.search.limits(),
    });

    let host = args.host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = args.port.unwrap_or(ctx.config.server.port);

    ctx.output
        .success(&format!("Listening on http://{host}:{port}"));
    tracing::info!(%host, port, "starting search API");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(server::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {host}:{port}"))?
    .run()
    .await
    .context("HTTP server failed")
}
