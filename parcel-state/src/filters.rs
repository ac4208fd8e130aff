use parcel_core::{CoreError, OrderStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Status criterion of the order list.
///
/// `Any` is the untouched default (empty string on the wire); `All` is the
/// explicit "show everything" choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StatusFilter {
    #[default]
    Any,
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::Any | StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Any => String::new(),
            StatusFilter::All => "All".to_string(),
            StatusFilter::Only(status) => status.label().to_string(),
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "" => Ok(StatusFilter::Any),
            "All" | "Все" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// Filter criteria edited by the order list toolbar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFilters {
    pub status: StatusFilter,
    pub date_from: String,
    pub date_to: String,
    pub city_query: String,
}

impl OrderFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Holds the filter criteria. No validation happens here.
#[derive(Clone)]
pub struct OrderFiltersStore {
    state: Arc<watch::Sender<OrderFilters>>,
}

impl OrderFiltersStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(watch::Sender::new(OrderFilters::default())),
        }
    }

    pub fn set_status(&self, status: StatusFilter) {
        self.edit(|filters| filters.status = status);
    }

    pub fn set_date_from(&self, date_from: impl Into<String>) {
        let date_from = date_from.into();
        self.edit(|filters| filters.date_from = date_from);
    }

    pub fn set_date_to(&self, date_to: impl Into<String>) {
        let date_to = date_to.into();
        self.edit(|filters| filters.date_to = date_to);
    }

    pub fn set_city_query(&self, city_query: impl Into<String>) {
        let city_query = city_query.into();
        self.edit(|filters| filters.city_query = city_query);
    }

    /// Replace every criterion in one step
    pub fn apply(&self, next: OrderFilters) {
        self.edit(|filters| *filters = next);
    }

    /// Back to empty defaults in one step
    pub fn reset(&self) {
        self.apply(OrderFilters::default());
    }

    pub fn snapshot(&self) -> OrderFilters {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OrderFilters> {
        self.state.subscribe()
    }

    fn edit(&self, change: impl FnOnce(&mut OrderFilters)) {
        self.state.send_if_modified(|filters| {
            let before = filters.clone();
            change(filters);
            *filters != before
        });
    }
}

impl Default for OrderFiltersStore {
    fn default() -> Self {
        Self::new()
    }
}
