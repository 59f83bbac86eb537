//! One-shot search from the command line.

use anyhow::{Context as _, Result};
use parts_market::search::{
    Pagination, RankedCandidate, SearchParams, SearchService, SortMode,
};
use parts_market::RequestContext;

use super::SearchArgs;
use crate::context::Context;
use crate::output::{format_row, score_badge};

const WIDTHS: [usize; 5] = [34, 14, 12, 28, 22];

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let criteria = SearchParams::from(args)
        .into_criteria(&ctx.config.search.limits())
        .context("Invalid search arguments")?;

    let store = ctx.open_store().await?;
    let service = SearchService::new(store).with_timeout(ctx.query_timeout());

    let request = RequestContext::new();
    ctx.output.debug(&format!("Request {}", request.request_id));

    let page = service
        .search(&request, &criteria)
        .await
        .context("Search failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&summary_line(&page.pagination, criteria.sort));

    if page.is_empty() {
        ctx.output.info("No matching products");
        return Ok(());
    }

    ctx.output.table_row(
        &["NAME", "PRICE", "CONDITION", "DEALER", "LOCATION", "SCORE"],
        &[WIDTHS[0], WIDTHS[1], WIDTHS[2], WIDTHS[3], WIDTHS[4], 5],
    );
    for ranked in &page.products {
        println!("  {}", render_row(ranked));
    }

    if page.pagination.has_prev() {
        ctx.output.info(&format!(
            "Previous results: --page {}",
            page.pagination.page - 1
        ));
    }
    if page.pagination.has_next() {
        ctx.output.info(&format!(
            "More results: --page {}",
            page.pagination.page + 1
        ));
    }

    Ok(())
}

fn summary_line(pagination: &Pagination, sort: SortMode) -> String {
    format!(
        "{}-{} of {} result(s), page {} of {} (sorted by {})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.pages.max(1),
        sort
    )
}

fn render_row(ranked: &RankedCandidate) -> String {
    let product = &ranked.candidate;
    let price = product.price_money().display();
    let dealer = product
        .dealer
        .store_name
        .as_deref()
        .unwrap_or(&product.dealer.name);
    let location = match (&product.dealer.city, &product.dealer.province) {
        (Some(city), Some(province)) => format!("{city}, {province}"),
        (None, Some(province)) => province.clone(),
        (Some(city), None) => city.clone(),
        (None, None) => "-".to_string(),
    };

    let cols = format_row(
        &[
            product.name.as_str(),
            price.as_str(),
            product.condition.as_str(),
            dealer,
            location.as_str(),
        ],
        &WIDTHS,
    );
    let padded = format!("{cols:width$}", width = WIDTHS.iter().sum::<usize>() + 2 * WIDTHS.len());
    format!(
        "{padded}{}",
        score_badge(ranked.location_score.map(|s| s.score))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use parts_market::seed;

    #[test]
    fn test_render_row_shows_store_and_price() {
        let candidate = seed::sample_candidates().remove(1);
        let row = render_row(&RankedCandidate::unscored(candidate));
        assert!(row.contains("Toyota Camry Brake Pads Set"));
        assert!(row.contains("85,000 IQD"));
        assert!(row.contains("Baghdad, Baghdad"));
    }

    #[test]
    fn test_summary_line() {
        let line = summary_line(&Pagination::new(2, 20, 45), SortMode::Price);
        assert_eq!(line, "21-40 of 45 result(s), page 2 of 3 (sorted by price)");

        let line = summary_line(&Pagination::new(1, 20, 0), SortMode::Location);
        assert_eq!(line, "0-0 of 0 result(s), page 1 of 1 (sorted by location)");
    }

    #[test]
    fn test_args_map_to_params() {
        let params = SearchParams::from(SearchArgs {
            province: Some("Basra".into()),
            city: Some("Al-Zubair".into()),
            sort: Some("price".into()),
            ..SearchArgs::default()
        });
        assert_eq!(params.customer_province.as_deref(), Some("Basra"));
        assert_eq!(params.customer_city.as_deref(), Some("Al-Zubair"));
        assert_eq!(params.sort_by.as_deref(), Some("price"));
    }
}
