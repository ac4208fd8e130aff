use parcel_core::Order;
use parcel_state::{OrderFilters, StoreContext};
use tracing::info;

use crate::view::filter_orders;

/// Outcome of one dashboard load
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub total: usize,
    pub shown: Vec<Order>,
    pub error: Option<String>,
}

/// Apply the initial filters, load the orders and report what the list shows.
///
/// The outcome of the load is also announced through a toast.
pub async fn run_session(ctx: &StoreContext, initial_filters: OrderFilters) -> SessionReport {
    ctx.filters.apply(initial_filters);
    ctx.orders.load_orders().await;

    let orders = ctx.orders.snapshot();
    match &orders.error {
        Some(message) => {
            ctx.toasts.error(message.clone());
        }
        None => {
            ctx.toasts.success(format!("Loaded {} orders", orders.orders.len()));
        }
    }

    let filters = ctx.filters.snapshot();
    let shown: Vec<Order> = filter_orders(&orders, &filters).into_iter().cloned().collect();
    info!(total = orders.orders.len(), shown = shown.len(), "Order list ready");

    SessionReport {
        total: orders.orders.len(),
        shown,
        error: orders.error,
    }
}
