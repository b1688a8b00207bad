use pos_checkout::alerts::consolidated_message;
use pos_checkout::app_system::{setup_tracing, PosConfig, PosSystem};
use pos_checkout::pricing::format_money;
use pos_checkout::receipt::render_receipt;
use tracing::{error, info, warn, Instrument};

/// Rings up one sale against the configured backend.
///
/// Usage: `pos_checkout "<product name>=<qty>" ...`
#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = PosConfig::from_env().map_err(|e| e.to_string())?;
    let store_name = config.store_name.clone();
    let requested: Vec<(String, u32)> = std::env::args()
        .skip(1)
        .map(|arg| parse_item(&arg))
        .collect::<Result<_, _>>()?;

    info!(items = requested.len(), "Starting checkout");

    let system = PosSystem::new(config).map_err(|e| e.to_string())?;
    let mut session = system.session();

    let span = tracing::info_span!("catalog_load");
    async {
        match session.refresh_catalog().await {
            Ok(count) => info!(count, "Catalog loaded"),
            Err(e) => warn!(error = %e, "Catalog unavailable; relying on product lookups"),
        }
    }
    .instrument(span)
    .await;

    for (name, quantity) in &requested {
        if let Err(e) = session.add_by_name(name, *quantity).await {
            error!(product = %name, error = %e, "Could not add item");
        }
    }

    let totals = session.totals().rounded();
    info!(
        subtotal = %format_money(totals.subtotal),
        tax = %format_money(totals.tax),
        total = %format_money(totals.total),
        "Cart ready"
    );

    let span = tracing::info_span!("sale_processing");
    let outcome = async { session.submit().await }.instrument(span).await;

    match outcome {
        Ok(sale) => {
            println!("{}", render_receipt(&store_name, &sale));
            if !sale.catalog_refreshed() {
                warn!("Stock levels could not be refreshed after the sale");
            } else if let Some(message) = consolidated_message(&sale.low_stock) {
                println!("\n{message}");
            }
        }
        Err(e) => error!(error = %e, "Sale failed"),
    }

    // Shutdown system gracefully
    drop(session);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

fn parse_item(arg: &str) -> Result<(String, u32), String> {
    match arg.rsplit_once('=') {
        None => Ok((arg.to_string(), 1)),
        Some((name, quantity)) => quantity
            .trim()
            .parse()
            .map(|q| (name.trim().to_string(), q))
            .map_err(|_| format!("Invalid quantity in {arg:?}")),
    }
}
