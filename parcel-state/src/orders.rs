use parcel_core::{Order, OrderId, OrderRepository};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub const DEFAULT_LOAD_ERROR_MESSAGE: &str = "Failed to load orders";

/// Lifecycle of the order collection, derived from the loading fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Everything the orders store exposes to observers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersState {
    pub orders: Vec<Order>,
    pub is_loading: bool,
    /// User-facing message of the last failed load
    pub error: Option<String>,
    /// Underlying failure of the last load, kept for diagnostics only
    pub last_failure: Option<String>,
    pub has_loaded_once: bool,
    pub selected_order_id: Option<OrderId>,
    pub checked_order_ids: BTreeSet<OrderId>,
}

impl OrdersState {
    pub fn status(&self) -> LoadStatus {
        if self.is_loading {
            LoadStatus::Loading
        } else if self.error.is_some() {
            LoadStatus::Failed
        } else if self.has_loaded_once {
            LoadStatus::Loaded
        } else {
            LoadStatus::Idle
        }
    }

    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// The selected order, if it is still part of the collection
    pub fn selected_order(&self) -> Option<&Order> {
        self.selected_order_id.and_then(|id| self.find(id))
    }

    pub fn is_checked(&self, id: OrderId) -> bool {
        self.checked_order_ids.contains(&id)
    }
}

/// Single source of truth for the order collection and its loading lifecycle
#[derive(Clone)]
pub struct OrdersStore {
    inner: Arc<OrdersInner>,
}

struct OrdersInner {
    repository: Arc<dyn OrderRepository>,
    state: watch::Sender<OrdersState>,
    load_error_message: String,
}

/// Clears the loading flag if a load is dropped or panics before it settles
struct InFlightLoad<'a> {
    state: &'a watch::Sender<OrdersState>,
    settled: bool,
}

impl Drop for InFlightLoad<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("Order load abandoned before completion");
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }
}

impl OrdersStore {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self::with_error_message(repository, DEFAULT_LOAD_ERROR_MESSAGE)
    }

    pub fn with_error_message(
        repository: Arc<dyn OrderRepository>,
        load_error_message: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(OrdersInner {
                repository,
                state: watch::Sender::new(OrdersState::default()),
                load_error_message: load_error_message.into(),
            }),
        }
    }

    /// Fetch the collection and replace it on success.
    ///
    /// At most one load is in flight: a call made while loading returns
    /// immediately without touching the repository. A failed load keeps the
    /// previous collection and records the user-facing error.
    pub async fn load_orders(&self) {
        let started = self.inner.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.error = None;
            state.last_failure = None;
            true
        });

        if !started {
            debug!("Order load already in flight, skipping");
            return;
        }

        let mut in_flight = InFlightLoad {
            state: &self.inner.state,
            settled: false,
        };
        let result = self.inner.repository.fetch_orders().await;
        in_flight.settled = true;

        match result {
            Ok(orders) => {
                info!("Loaded {} orders", orders.len());
                self.inner.state.send_modify(|state| {
                    state.orders = orders;
                    state.has_loaded_once = true;
                    state.is_loading = false;
                });
            }
            Err(e) => {
                error!("Failed to load orders: {}", e);
                let message = self.inner.load_error_message.clone();
                self.inner.state.send_modify(|state| {
                    state.error = Some(message);
                    state.last_failure = Some(e.to_string());
                    state.is_loading = false;
                });
            }
        }
    }

    /// Replace the order with the same id, keeping its position
    pub fn update_order(&self, updated: Order) {
        let id = updated.id;
        let replaced = self.inner.state.send_if_modified(|state| {
            match state.orders.iter_mut().find(|order| order.id == id) {
                Some(slot) => {
                    *slot = updated;
                    true
                }
                None => false,
            }
        });

        if !replaced {
            debug!("Ignoring update for unknown order {}", id);
        }
    }

    pub fn toggle_checked(&self, id: OrderId) {
        self.inner.state.send_modify(|state| {
            if !state.checked_order_ids.remove(&id) {
                state.checked_order_ids.insert(id);
            }
        });
    }

    pub fn clear_checked(&self) {
        self.inner.state.send_if_modified(|state| {
            if state.checked_order_ids.is_empty() {
                return false;
            }
            state.checked_order_ids.clear();
            true
        });
    }

    pub fn select(&self, id: Option<OrderId>) {
        self.inner.state.send_if_modified(|state| {
            if state.selected_order_id == id {
                return false;
            }
            state.selected_order_id = id;
            true
        });
    }

    pub fn selected_order(&self) -> Option<Order> {
        self.inner.state.borrow().selected_order().cloned()
    }

    pub fn is_checked(&self, id: OrderId) -> bool {
        self.inner.state.borrow().is_checked(id)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn status(&self) -> LoadStatus {
        self.inner.state.borrow().status()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.inner.state.borrow().orders.clone()
    }

    pub fn snapshot(&self) -> OrdersState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OrdersState> {
        self.inner.state.subscribe()
    }
}
