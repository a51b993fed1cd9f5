use contracts::domain::a001_orders::aggregate::{Order, OrderStatus, UpdateOrderDto};

use crate::shared::date_utils::to_datetime_local;
use crate::shared::row_editor::{Editable, FieldError};

pub const FIELD_READY_FOR: &str = "ready_for";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_TOTAL_SUM: &str = "total_sum";
pub const FIELD_STATUS: &str = "status";

impl Editable for Order {
    type Id = i64;

    fn id(&self) -> i64 {
        self.order_id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            FIELD_READY_FOR => self.ready_for = value,
            FIELD_DESCRIPTION => self.description = value,
            // as typed, the server parses it
            FIELD_TOTAL_SUM => self.total_sum = value,
            FIELD_STATUS => self.status = OrderStatus::from(value),
            "order_id" | "created_at" | "user_name" | "user_phone" => {
                return Err(FieldError::Immutable(field.to_string()))
            }
            _ => return Err(FieldError::Unknown(field.to_string())),
        }
        Ok(())
    }
}

/// Value of the read-only `datetime-local` input of the row
pub fn created_at_input(order: &Order) -> String {
    to_datetime_local(&order.created_at).unwrap_or_else(|| order.created_at.clone())
}

/// Full `update_order` payload for a draft.
///
/// `created_at` goes back the way the row shows it, with seconds zeroed.
pub fn update_dto(draft: &Order) -> UpdateOrderDto {
    let created_at = match to_datetime_local(&draft.created_at) {
        Some(minutes) => format!("{}:00", minutes),
        None => draft.created_at.clone(),
    };
    UpdateOrderDto {
        order_id: draft.order_id,
        ready_for: draft.ready_for.clone(),
        description: draft.description.clone(),
        total_sum: draft.total_sum.clone(),
        status: draft.status.clone(),
        created_at,
    }
}

/// CSS class of an order row
pub fn status_class(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::New => "status-new",
        OrderStatus::Preparing => "status-preparing",
        OrderStatus::ReadyForPickup => "status-ready",
        OrderStatus::Completed | OrderStatus::Cancelled => "status-completed",
        OrderStatus::Other(_) => "",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::row_editor::RowEditor;

    pub(crate) fn order(order_id: i64, created_at: &str, status: OrderStatus) -> Order {
        Order {
            order_id,
            created_at: created_at.to_string(),
            user_name: "Иван".into(),
            user_phone: "79001234567".into(),
            ready_for: "18:30".into(),
            description: "Без лука".into(),
            total_sum: "1250".into(),
            status,
        }
    }

    #[test]
    fn test_editable_fields() {
        let mut row = RowEditor::new(order(1, "2024-01-01T10:00:00", OrderStatus::New), 1);
        row.edit(FIELD_TOTAL_SUM, "1300.50".into()).unwrap();
        row.edit(FIELD_STATUS, "Готовится".into()).unwrap();

        assert_eq!(row.draft().total_sum, "1300.50");
        assert_eq!(row.draft().status, OrderStatus::Preparing);
        assert_eq!(row.record().status, OrderStatus::New);
    }

    #[test]
    fn test_identity_and_customer_are_read_only() {
        let mut draft = order(1, "2024-01-01T10:00:00", OrderStatus::New);
        for field in ["order_id", "created_at", "user_name", "user_phone"] {
            assert_eq!(
                draft.set_field(field, "x".into()),
                Err(FieldError::Immutable(field.to_string()))
            );
        }
        assert_eq!(
            draft.set_field("discount", "5".into()),
            Err(FieldError::Unknown("discount".into()))
        );
    }

    #[test]
    fn test_update_dto_sends_full_draft() {
        let mut draft = order(7, "2024-03-15T14:02:26.123", OrderStatus::New);
        draft.total_sum = "abc".into();

        let dto = update_dto(&draft);
        assert_eq!(dto.order_id, 7);
        assert_eq!(dto.total_sum, "abc");
        assert_eq!(dto.ready_for, "18:30");
        assert_eq!(dto.description, "Без лука");
        assert_eq!(dto.created_at, "2024-03-15T14:02:00");
        assert_eq!(created_at_input(&draft), "2024-03-15T14:02");
    }

    #[test]
    fn test_unknown_status_survives_edit_cycle() {
        let mut draft = order(1, "2024-01-01T10:00:00", OrderStatus::Other("Ждёт оплаты".into()));
        draft.set_field(FIELD_READY_FOR, "19:00".into()).unwrap();
        assert_eq!(update_dto(&draft).status.label(), "Ждёт оплаты");
        assert_eq!(status_class(&draft.status), "");
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(status_class(&OrderStatus::New), "status-new");
        assert_eq!(status_class(&OrderStatus::ReadyForPickup), "status-ready");
        assert_eq!(status_class(&OrderStatus::Cancelled), "status-completed");
    }
}
