//! Read-only views combining the orders and filter stores.

use chrono::NaiveDate;
use parcel_core::Order;
use parcel_state::{OrderFilters, OrdersState};

/// Orders matching every active criterion, in collection order
pub fn filter_orders<'a>(state: &'a OrdersState, filters: &OrderFilters) -> Vec<&'a Order> {
    let query = filters.city_query.trim().to_lowercase();
    let from = calendar_date(&filters.date_from);
    let to = calendar_date(&filters.date_to);

    state
        .orders
        .iter()
        .filter(|order| filters.status.matches(order.status))
        .filter(|order| matches_city(order, &query))
        .filter(|order| within_dates(order, from, to))
        .collect()
}

/// Checked orders still present in the collection
pub fn checked_orders(state: &OrdersState) -> Vec<&Order> {
    state
        .orders
        .iter()
        .filter(|order| state.is_checked(order.id))
        .collect()
}

fn matches_city(order: &Order, query: &str) -> bool {
    query.is_empty()
        || order.sender_city.to_lowercase().contains(query)
        || order.receiver_city.to_lowercase().contains(query)
}

// Bounds that fail to parse are ignored.
fn within_dates(order: &Order, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(date) = calendar_date(&order.date) else {
        return false;
    };
    from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to)
}

/// Calendar day of an ISO-8601 date or timestamp
fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
