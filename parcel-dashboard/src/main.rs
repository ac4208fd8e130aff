use anyhow::Context;
use parcel_dashboard::run_session;
use parcel_infra::{build_repository, Config};
use parcel_state::StoreContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "parcel_dashboard=debug,parcel_state=debug,parcel_infra=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting parcel dashboard with {:?} order source", config.source.kind);

    let repository = build_repository(&config.source).context("Failed to set up order source")?;
    let ctx = StoreContext::new(repository, &config.store_settings());

    let report = run_session(&ctx, config.filters.clone()).await;
    if let Some(error) = &report.error {
        tracing::warn!("{}", error);
    }
    for order in &report.shown {
        tracing::info!(
            "#{} {} -> {} [{}] {} {}kg",
            order.id,
            order.sender_city,
            order.receiver_city,
            order.status,
            order.date,
            order.weight
        );
    }

    // Let the notifications run their course before the session ends
    if config.toast.default_timeout_ms > 0 {
        let mut toasts = ctx.toasts.subscribe();
        let _ = toasts.wait_for(|toasts| toasts.is_empty()).await;
    }

    Ok(())
}
