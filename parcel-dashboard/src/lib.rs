pub mod session;
pub mod view;

pub use session::{run_session, SessionReport};
pub use view::{checked_orders, filter_orders};
