//! Фильтрация заказов на клиенте.
//!
//! Pure functions over fetched orders; the page re-applies them on every
//! render pass.

use chrono::NaiveDate;
use contracts::domain::a001_orders::aggregate::Order;

use crate::shared::date_utils::local_date;
use crate::shared::row_editor::RowEditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderFilter {
    /// Only orders created on the local calendar day `today`
    pub today_only: bool,
    /// Drop Completed and Cancelled orders
    pub hide_completed: bool,
}

pub fn is_visible(order: &Order, filter: &OrderFilter, today: NaiveDate) -> bool {
    if filter.today_only && local_date(&order.created_at) != Some(today) {
        return false;
    }
    if filter.hide_completed && order.status.is_terminal() {
        return false;
    }
    true
}

/// Order-preserving subset of `orders`
pub fn visible(orders: &[Order], filter: &OrderFilter, today: NaiveDate) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| is_visible(o, filter, today))
        .cloned()
        .collect()
}

/// Rows to render. Decided on the fetched record, so an unsaved status
/// edit does not hide the row being edited.
pub fn visible_rows<'a>(
    rows: &'a [RowEditor<Order>],
    filter: &OrderFilter,
    today: NaiveDate,
) -> Vec<&'a RowEditor<Order>> {
    rows.iter()
        .filter(|row| is_visible(row.record(), filter, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_orders::editable::tests::order;
    use contracts::domain::a001_orders::aggregate::OrderStatus;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Order> {
        vec![
            order(1, "2024-01-01T10:00:00", OrderStatus::New),
            order(2, "2024-01-02T09:15:00", OrderStatus::Completed),
            order(3, "2024-01-02T11:40:00", OrderStatus::Preparing),
            order(4, "2024-01-02T12:00:00", OrderStatus::Cancelled),
            order(5, "не дата", OrderStatus::New),
        ]
    }

    fn ids(orders: &[Order]) -> Vec<i64> {
        orders.iter().map(|o| o.order_id).collect()
    }

    #[test]
    fn test_yesterdays_order_hidden_by_today_only() {
        let orders = vec![order(1, "2024-01-01T10:00:00", OrderStatus::New)];
        let filter = OrderFilter {
            today_only: true,
            hide_completed: false,
        };
        assert!(visible(&orders, &filter, day(2024, 1, 2)).is_empty());
    }

    #[test]
    fn test_new_order_survives_hide_completed() {
        let orders = vec![order(1, "2024-01-01T10:00:00", OrderStatus::New)];
        let filter = OrderFilter {
            today_only: false,
            hide_completed: true,
        };
        assert_eq!(visible(&orders, &filter, day(2024, 1, 2)), orders);
    }

    #[test]
    fn test_all_filter_combinations() {
        let today = day(2024, 1, 2);
        let cases = [
            (false, false, vec![1, 2, 3, 4, 5]),
            (true, false, vec![2, 3, 4]),
            (false, true, vec![1, 3, 5]),
            (true, true, vec![3]),
        ];
        for (today_only, hide_completed, expected) in cases {
            let filter = OrderFilter {
                today_only,
                hide_completed,
            };
            let input = sample();
            let once = visible(&input, &filter, today);

            assert_eq!(ids(&once), expected, "{:?}", filter);
            assert_eq!(visible(&once, &filter, today), once, "idempotent {:?}", filter);
            assert_eq!(input, sample(), "input untouched");
        }
    }

    #[test]
    fn test_unparseable_date_never_matches_today() {
        let filter = OrderFilter {
            today_only: true,
            hide_completed: false,
        };
        let orders = vec![order(5, "", OrderStatus::New)];
        assert!(visible(&orders, &filter, day(2024, 1, 2)).is_empty());
    }

    #[test]
    fn test_rows_filter_on_fetched_status() {
        let mut row = RowEditor::new(order(1, "2024-01-02T10:00:00", OrderStatus::New), 1);
        row.edit("status", "Завершён".into()).unwrap();
        let rows = vec![row];
        let filter = OrderFilter {
            today_only: false,
            hide_completed: true,
        };
        assert_eq!(visible_rows(&rows, &filter, day(2024, 1, 2)).len(), 1);
    }
}
