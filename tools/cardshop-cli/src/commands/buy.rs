//! Cart and checkout command.

use anyhow::{bail, Result};
use cardshop_commerce::cart::Receipt;
use cardshop_commerce::CommerceError;
use cardshop_store::{Shop, ShopError};
use serde::Serialize;

use super::{load_shop, BuyArgs};
use crate::context::Context;

const WIDTHS: [usize; 4] = [32, 5, 10, 12];

/// An item that could not be added to the cart.
#[derive(Debug, Serialize)]
struct Rejection {
    item: String,
    reason: String,
}

/// Run the buy command.
pub async fn run(args: BuyArgs, ctx: &Context) -> Result<()> {
    let (shop, _) = load_shop(ctx).await?;

    let rejections = fill_cart(&shop, &args.items);
    for rejection in &rejections {
        ctx.output
            .warn(&format!("Could not add '{}': {}", rejection.item, rejection.reason));
    }

    ctx.output.debug(&format!(
        "Cart holds {} item(s), total {}",
        shop.cart_item_count(),
        shop.cart_total()
    ));

    let receipt = match shop.checkout() {
        Ok(receipt) => receipt,
        Err(ShopError::Commerce(CommerceError::EmptyCart)) => {
            bail!("Nothing could be added to the cart")
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "receipt": receipt,
            "rejected": rejections,
        }));
        return Ok(());
    }

    print_receipt(&receipt, ctx);
    Ok(())
}

/// Add one unit per requested item, collecting what was refused.
fn fill_cart(shop: &Shop, items: &[String]) -> Vec<Rejection> {
    let mut rejections = Vec::new();

    for item in items {
        let outcome = match shop.find(item) {
            Some(entry) => shop.add_to_cart(&entry.id).map(|_| ()),
            None => Err(ShopError::Commerce(CommerceError::UnknownItem(item.as_str().into()))),
        };

        if let Err(e) = outcome {
            rejections.push(Rejection {
                item: item.clone(),
                reason: e.to_string(),
            });
        }
    }

    rejections
}

fn print_receipt(receipt: &Receipt, ctx: &Context) {
    ctx.output.header("Receipt");
    ctx.output
        .kv("Completed", &receipt.completed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    ctx.output.info("");

    ctx.output.table_row(&["CARD", "QTY", "EACH", "SUBTOTAL"], &WIDTHS);
    for [name, quantity, each, subtotal] in receipt_rows(receipt) {
        ctx.output
            .table_row(&[&name, &quantity, &each, &subtotal], &WIDTHS);
    }

    ctx.output.info("");
    ctx.output.success(&format!(
        "Bought {} card(s) for {}",
        receipt.item_count, receipt.total
    ));
}

/// Receipt lines as display cells: card, quantity, unit price, subtotal.
fn receipt_rows(receipt: &Receipt) -> Vec<[String; 4]> {
    receipt
        .lines
        .iter()
        .map(|line| {
            [
                line.name.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.line_total.to_string(),
            ]
        })
        .collect()
}
