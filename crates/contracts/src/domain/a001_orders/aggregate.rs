use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::serde_helpers::{null_as_empty, string_or_number};

// ============================================================================
// Status
// ============================================================================

/// Статус заказа.
///
/// On the wire the status is the localized label. Labels outside the known
/// set are kept verbatim in [`OrderStatus::Other`] so that saving an order
/// never rewrites a status this client does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    New,
    Preparing,
    ReadyForPickup,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Known statuses in workflow order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::Preparing,
        OrderStatus::ReadyForPickup,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::New => "Новый",
            OrderStatus::Preparing => "Готовится",
            OrderStatus::ReadyForPickup => "Готов к выдаче",
            OrderStatus::Completed => "Завершён",
            OrderStatus::Cancelled => "Отменён",
            OrderStatus::Other(label) => label,
        }
    }

    /// Completed and Cancelled orders are not expected to change any more
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Новый" => OrderStatus::New,
            "Готовится" => OrderStatus::Preparing,
            "Готов к выдаче" => OrderStatus::ReadyForPickup,
            "Завершён" => OrderStatus::Completed,
            "Отменён" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(label),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Заказ клиента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    /// ISO 8601, with or without offset
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_phone: String,
    /// Free-form pickup time, e.g. "18:30"
    #[serde(default, deserialize_with = "string_or_number")]
    pub ready_for: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_sum: String,
    pub status: OrderStatus,
}

/// Body of `fetch_orders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub orders: Option<Vec<Order>>,
}

/// Payload of `update_order`. The full order is sent, not a diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrderDto {
    pub order_id: i64,
    pub ready_for: String,
    pub description: String,
    /// Sent exactly as typed
    pub total_sum: String,
    pub status: OrderStatus,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub created_at: String,
}
