use contracts::domain::a001_orders::aggregate::{Order, OrderStatus};

use crate::domain::a001_orders::editable::{created_at_input, status_class};
use crate::shared::row_editor::{RowEditor, SaveState};

pub const SAVE_LABEL: &str = "Сохранить";
pub const SAVED_LABEL: &str = "✓ Сохранено";

/// Snapshot of one order row taken when its inputs are created
#[derive(Clone, Debug, PartialEq)]
pub struct OrderRowView {
    pub order_id: i64,
    pub generation: u64,
    pub row_class: &'static str,
    pub created_at: String,
    pub user_name: String,
    pub user_phone: String,
    pub ready_for: String,
    pub description: String,
    pub total_sum: String,
    pub status: OrderStatus,
}

impl From<&RowEditor<Order>> for OrderRowView {
    fn from(row: &RowEditor<Order>) -> Self {
        let draft = row.draft();
        Self {
            order_id: draft.order_id,
            generation: row.generation(),
            row_class: status_class(&row.record().status),
            created_at: created_at_input(row.record()),
            user_name: draft.user_name.clone(),
            user_phone: draft.user_phone.clone(),
            ready_for: draft.ready_for.clone(),
            description: draft.description.clone(),
            total_sum: draft.total_sum.clone(),
            status: draft.status.clone(),
        }
    }
}

/// Options of the status select; an unknown label stays selectable
pub fn status_options(current: &OrderStatus) -> Vec<String> {
    let mut options: Vec<String> = OrderStatus::ALL.iter().map(|s| s.label().to_string()).collect();
    if let OrderStatus::Other(label) = current {
        options.push(label.clone());
    }
    options
}

pub fn save_button(state: SaveState) -> (&'static str, &'static str) {
    match state {
        SaveState::Saved => (SAVED_LABEL, "button button--success"),
        SaveState::Saving => (SAVE_LABEL, "button button--primary button--busy"),
        SaveState::Idle => (SAVE_LABEL, "button button--primary"),
    }
}
