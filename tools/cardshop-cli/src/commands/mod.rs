//! CLI command implementations.

pub mod buy;
pub mod catalog;
pub mod config;

use anyhow::Result;
use cardshop_data::AssemblyReport;
use cardshop_store::{Shop, ShopError};
use clap::{Args, Subcommand};

use crate::context::Context;
use crate::output::format_duration;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show this category (creature, instant, land, ...).
    #[arg(long)]
    pub category: Option<String>,

    /// Only show this color (white, blue, black, red, green, colorless or W/U/B/R/G).
    #[arg(long)]
    pub color: Option<String>,

    /// Case-insensitive text search over name, rules text, category and color.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Hide sold-out cards.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order (catalog, name_asc, name_desc, price_asc, price_desc).
    #[arg(long, default_value = "catalog")]
    pub sort: String,

    /// Show category and color counts.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the buy command.
#[derive(Args)]
pub struct BuyArgs {
    /// Card ids or names; repeat one to buy more than one unit.
    #[arg(required = true)]
    pub items: Vec<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Assemble the catalog from the configured inventory into a fresh shop.
///
/// An inventory where nothing resolved is reported but not fatal.
pub async fn load_shop(ctx: &Context) -> Result<(Shop, Option<AssemblyReport>)> {
    let path = ctx.inventory_path();
    ctx.output.debug(&format!("Inventory: {}", path.display()));

    let client = ctx.lookup_client()?;
    let assembler = ctx.assembler();
    let shop = Shop::new();

    let spinner = ctx.output.spinner("Looking up cards...");
    let result = shop.load_catalog(&path, &client, &assembler).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            report_assembly(&report, ctx);
            Ok((shop, Some(report)))
        }
        Err(ShopError::EmptyCatalog { attempted }) => {
            ctx.output.warn(&format!(
                "None of the {} inventory rows could be resolved; the catalog is empty",
                attempted
            ));
            Ok((shop, None))
        }
        Err(e) => Err(e.into()),
    }
}

fn report_assembly(report: &AssemblyReport, ctx: &Context) {
    for failure in &report.failures {
        ctx.output
            .warn(&format!("Skipped '{}': {}", failure.name, failure.error));
    }
    ctx.output.success(&format!(
        "Loaded {} of {} cards in {}",
        report.succeeded,
        report.attempted,
        format_duration(report.elapsed)
    ));
}
