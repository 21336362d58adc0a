//! Catalog listing command.

use anyhow::{anyhow, Result};
use cardshop_commerce::prelude::*;

use super::{load_shop, CatalogArgs};
use crate::context::Context;
use crate::output::stock_badge;

const WIDTHS: [usize; 7] = [28, 12, 10, 8, 10, 9, 36];

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args)?;
    let (shop, report) = load_shop(ctx).await?;

    let entries = shop.query(&query);
    let facets = args.facets.then(|| shop.facets(&query));

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "report": report,
            "entries": entries,
            "facets": facets,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Catalog ({})", query.sort.display_name()));

    if entries.is_empty() {
        ctx.output.info("No cards match.");
    } else {
        ctx.output.table_row(
            &["NAME", "CATEGORY", "COLOR", "COST", "PRICE", "STOCK", "EDITION"],
            &WIDTHS,
        );
        for entry in &entries {
            let price = entry.price.to_string();
            let stock = stock_badge(entry.stock_quantity);
            ctx.output.table_row(
                &[
                    &entry.name,
                    entry.category.as_str(),
                    entry.attribute.as_str(),
                    &entry.cost_symbol,
                    &price,
                    &stock,
                    &entry.edition_name,
                ],
                &WIDTHS,
            );
        }
    }

    if let Some(facets) = facets {
        for facet in [&facets.categories, &facets.attributes] {
            ctx.output.header(&facet.name);
            for value in &facet.values {
                let marker = if value.selected { " (selected)" } else { "" };
                ctx.output
                    .list_item(&format!("{}: {}{}", value.value, value.count, marker));
            }
        }
    }

    ctx.output.info("");
    ctx.output.info(&format!("{} card(s)", entries.len()));

    Ok(())
}

fn build_query(args: &CatalogArgs) -> Result<CatalogQuery> {
    let mut query = CatalogQuery::new();

    if let Some(category) = &args.category {
        let category = Category::from_str(category)
            .ok_or_else(|| anyhow!("Unknown category '{}'", category))?;
        query = query.with_category(category);
    }
    if let Some(color) = &args.color {
        let attribute =
            Attribute::from_str(color).ok_or_else(|| anyhow!("Unknown color '{}'", color))?;
        query = query.with_attribute(attribute);
    }
    if let Some(text) = &args.search {
        query = query.with_text(text);
    }
    if args.in_stock {
        query = query.in_stock();
    }

    let sort = SortOption::from_str(&args.sort)
        .ok_or_else(|| anyhow!("Unknown sort order '{}'", args.sort))?;
    Ok(query.with_sort(sort))
}
