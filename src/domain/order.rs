use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle of an order. Only `Pending` orders may be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

/// One dish entry of an order.
///
/// `dish_id` is never checked against the dish collection. A `dishId` that is
/// not a string stays in `extra` untouched, as do all other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "dishId", default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<String>,
    pub quantity: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
impl OrderLine {
    pub fn new(dish_id: impl Into<String>, quantity: u64) -> Self {
        Self {
            dish_id: Some(dish_id.into()),
            quantity,
            extra: Map::new(),
        }
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<OrderLine>,
}

/// Validated fields of a create or update request. `status` is `None` when a
/// create request left it out.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: Option<OrderStatus>,
    pub dishes: Vec<OrderLine>,
}

#[cfg(test)]
impl Order {
    pub fn new(
        id: impl Into<String>,
        deliver_to: impl Into<String>,
        mobile_number: impl Into<String>,
        status: OrderStatus,
        dishes: Vec<OrderLine>,
    ) -> Self {
        Self {
            id: id.into(),
            deliver_to: deliver_to.into(),
            mobile_number: mobile_number.into(),
            status,
            dishes,
        }
    }
}
