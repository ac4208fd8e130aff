use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Identifier of a shipment, unique within a loaded collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Delivery status of a shipment.
///
/// Serialized with the English labels; the legacy Russian labels are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "New", alias = "Новый")]
    New,
    #[serde(rename = "In Transit", alias = "В пути")]
    InTransit,
    #[serde(rename = "Delivered", alias = "Доставлен")]
    Delivered,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    /// Accepts exactly the labels the serde attributes accept
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| CoreError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// One shipment tracked by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub sender_city: String,
    pub receiver_city: String,
    pub pickup: GeoPoint,
    pub delivery: GeoPoint,
    pub status: OrderStatus,
    /// Opaque to the state layer; consumers decide how to interpret it.
    pub date: String,
    pub weight: f64,
}

impl Order {
    /// Decode a JSON array of orders, rejecting collections with repeated ids
    pub fn decode_collection(payload: &[u8]) -> CoreResult<Vec<Order>> {
        let orders: Vec<Order> = serde_json::from_slice(payload)?;
        ensure_unique_ids(&orders)?;
        Ok(orders)
    }
}

pub fn ensure_unique_ids(orders: &[Order]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(orders.len());
    for order in orders {
        if !seen.insert(order.id) {
            return Err(CoreError::DuplicateOrderId(order.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {
            "id": 1,
            "sender_city": "Moscow",
            "receiver_city": "Kazan",
            "pickup": { "lat": 55.75, "lng": 37.61 },
            "delivery": { "lat": 55.79, "lng": 49.12 },
            "status": "В пути",
            "date": "2024-03-01",
            "weight": 12.5
        },
        {
            "id": 2,
            "sender_city": "Tver",
            "receiver_city": "Omsk",
            "pickup": { "lat": 56.85, "lng": 35.9 },
            "delivery": { "lat": 54.98, "lng": 73.36 },
            "status": "Delivered",
            "date": "2024-03-02",
            "weight": 3
        }
    ]"#;

    #[test]
    fn test_decode_accepts_both_status_labels() {
        let orders = Order::decode_collection(PAYLOAD.as_bytes()).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, OrderId(1));
        assert_eq!(orders[0].status, OrderStatus::InTransit);
        assert_eq!(orders[1].status, OrderStatus::Delivered);
        assert_eq!(orders[1].weight, 3.0);
        assert_eq!(orders[0].pickup, GeoPoint { lat: 55.75, lng: 37.61 });
    }

    #[test]
    fn test_status_serializes_english_label() {
        let json = serde_json::to_string(&OrderStatus::InTransit).unwrap();
        assert_eq!(json, "\"In Transit\"");
    }

    #[test]
    fn test_status_parses_legacy_labels() {
        assert_eq!("Доставлен".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert_eq!("In Transit".parse::<OrderStatus>().unwrap(), OrderStatus::InTransit);
        assert!(matches!(
            "Lost".parse::<OrderStatus>(),
            Err(CoreError::UnknownStatus(label)) if label == "Lost"
        ));
    }

    #[test]
    fn test_label_matches_wire_form() {
        for status in [OrderStatus::New, OrderStatus::InTransit, OrderStatus::Delivered] {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, serde_json::Value::String(status.label().to_string()));
            assert_eq!(status.label().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let duplicated = PAYLOAD.replace("\"id\": 2", "\"id\": 1");
        let result = Order::decode_collection(duplicated.as_bytes());

        assert!(matches!(result, Err(CoreError::DuplicateOrderId(OrderId(1)))));
    }

    #[test]
    fn test_decode_rejects_unknown_status() {
        let broken = PAYLOAD.replace("\"Delivered\"", "\"Lost\"");
        let result = Order::decode_collection(broken.as_bytes());

        assert!(matches!(result, Err(CoreError::MalformedPayload(_))));
    }
}
