//! Schema creation and sample data.

use anyhow::{Context as _, Result};
use parts_market::seed;

use super::SeedArgs;
use crate::context::Context;

/// Run the seed command.
pub async fn run(args: SeedArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;

    if args.schema_only {
        store.migrate().await.context("Failed to create schema")?;
        ctx.output
            .success(&format!("Schema ready in {}", ctx.config.database.url));
        return Ok(());
    }

    let summary = seed::load_sample(&store)
        .await
        .context("Failed to load sample catalog")?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "brands": summary.brands,
            "models": summary.models,
            "categories": summary.categories,
            "dealers": summary.dealers,
            "products": summary.products,
        }));
        return Ok(());
    }

    ctx.output.header("Sample catalog loaded");
    ctx.output.kv("database", &ctx.config.database.url);
    ctx.output.kv("brands", &summary.brands.to_string());
    ctx.output.kv("models", &summary.models.to_string());
    ctx.output.kv("categories", &summary.categories.to_string());
    ctx.output.kv("dealers", &summary.dealers.to_string());
    ctx.output.kv("products", &summary.products.to_string());

    Ok(())
}
