//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `shopstore_core` linkage and storage bootstrap end to end.
//! - Keep output deterministic for quick local sanity checks.

use shopstore_core::{CoreConfig, NoopObserver, Query, Repository, ShopStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("shopstore_core ping={}", shopstore_core::ping());
    println!("shopstore_core version={}", shopstore_core::core_version());

    match product_count() {
        Ok(count) => {
            println!("shopstore_core products={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("shopstore_core error={err}");
            ExitCode::FAILURE
        }
    }
}

fn product_count() -> Result<i64, Box<dyn std::error::Error>> {
    let conn = CoreConfig::in_memory().open_database()?;
    let shop = ShopStore::new(&conn).with_observer(NoopObserver);
    Ok(shop.products().count(&Query::new())?)
}
