use parcel_core::OrderRepository;
use std::sync::Arc;

use crate::edit::OrderEditStore;
use crate::filters::OrderFiltersStore;
use crate::orders::{OrdersStore, DEFAULT_LOAD_ERROR_MESSAGE};
use crate::toast::{ToastStore, DEFAULT_TOAST_TIMEOUT_MS};

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub load_error_message: String,
    pub toast_timeout_ms: i64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            load_error_message: DEFAULT_LOAD_ERROR_MESSAGE.to_string(),
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
        }
    }
}

/// The stores of one dashboard session.
///
/// Created when the session starts and dropped with it. The stores never
/// reach into each other; consumers combine their public state. Cloning
/// hands out another set of handles to the same stores.
#[derive(Clone)]
pub struct StoreContext {
    pub orders: OrdersStore,
    pub filters: OrderFiltersStore,
    pub edit: OrderEditStore,
    pub toasts: ToastStore,
}

impl StoreContext {
    pub fn new(repository: Arc<dyn OrderRepository>, settings: &StoreSettings) -> Self {
        Self {
            orders: OrdersStore::with_error_message(
                repository,
                settings.load_error_message.clone(),
            ),
            filters: OrderFiltersStore::new(),
            edit: OrderEditStore::new(),
            toasts: ToastStore::with_default_timeout(settings.toast_timeout_ms),
        }
    }
}
