pub mod context;
pub mod edit;
pub mod filters;
pub mod orders;
pub mod toast;

pub use context::{StoreContext, StoreSettings};
pub use edit::{EditSession, OrderEditStore};
pub use filters::{OrderFilters, OrderFiltersStore, StatusFilter};
pub use orders::{LoadStatus, OrdersState, OrdersStore, DEFAULT_LOAD_ERROR_MESSAGE};
pub use toast::{Toast, ToastId, ToastKind, ToastStore, DEFAULT_TOAST_TIMEOUT_MS};
