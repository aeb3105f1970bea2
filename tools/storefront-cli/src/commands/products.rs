//! List catalog products.

use anyhow::Result;
use storefront_core::catalog::Product;

use super::ProductsArgs;
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let products = filter(store.products(), args.search.as_deref());

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Products");
    if products.is_empty() {
        ctx.output.warn("No products match");
        return Ok(());
    }

    ctx.output.products(&products, false);
    ctx.output.blank();
    ctx.output.kv("products", &products.len().to_string());
    let rate = format!("{:.2}%", store.tax_rate().as_fraction() * 100.0);
    ctx.output.kv("tax rate", &rate);

    Ok(())
}

fn filter(products: &[Product], search: Option<&str>) -> Vec<Product> {
    let Some(needle) = search.map(str::to_lowercase) else {
        return products.to_vec();
    };
    products
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.company.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
