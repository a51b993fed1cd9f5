use async_trait::async_trait;
use contracts::domain::a001_orders::aggregate::{Order, OrdersResponse};
use contracts::system::auth::NoBody;

use super::editable::update_dto;
use crate::shared::error::ApiError;
use crate::shared::sync::ListSource;
use crate::system::auth::client::AuthClient;
use crate::system::auth::transport::Method;

/// Orders of the order-management page
#[derive(Clone)]
pub struct OrdersSource {
    client: AuthClient,
}

impl OrdersSource {
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }
}

#[async_trait(?Send)]
impl ListSource for OrdersSource {
    type Record = Order;

    async fn fetch(&self) -> Result<Vec<Order>, ApiError> {
        let response: OrdersResponse = self
            .client
            .call(Method::Post, "fetch_orders", &NoBody {})
            .await?;
        match response.orders {
            Some(orders) if response.success => Ok(orders),
            _ => {
                log::error!("fetch_orders: success={}, no orders", response.success);
                Err(ApiError::Rejected("Не удалось загрузить заказы".to_string()))
            }
        }
    }

    async fn save(&self, draft: &Order) -> Result<(), ApiError> {
        let message = self
            .client
            .mutation(Method::Post, "update_order", &update_dto(draft))
            .await?;
        log::info!(
            "Order {} saved: {}",
            draft.order_id,
            message.as_deref().unwrap_or("ok")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::row_editor::SaveState;
    use crate::shared::sync::{ListSynchronizer, SaveOutcome};
    use crate::shared::testing::{scripted_client, ScriptedTransport, TokioScheduler};
    use crate::system::auth::session::SIGN_IN_PATH;
    use serde_json::{json, Value};
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::task::LocalSet;

    fn orders_json(status: &str, total_sum: Value) -> Value {
        json!({
            "success": true,
            "orders": [{
                "order_id": 1,
                "created_at": "2024-01-01T10:00:00",
                "user_name": "Иван",
                "user_phone": 79001234567u64,
                "ready_for": "18:30",
                "description": "Без лука",
                "total_sum": total_sum,
                "status": status
            }]
        })
    }

    fn synchronizer(transport: &ScriptedTransport) -> ListSynchronizer<OrdersSource> {
        let (client, _navigator) = scripted_client(transport);
        ListSynchronizer::new(
            OrdersSource::new(client),
            Rc::new(TokioScheduler),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_fetch_decodes_numbers_as_text() {
        let transport = ScriptedTransport::new();
        transport.reply(200, orders_json("Новый", json!(1250)));
        let (client, _navigator) = scripted_client(&transport);

        let orders = OrdersSource::new(client).fetch().await.unwrap();
        assert_eq!(orders[0].total_sum, "1250");
        assert_eq!(orders[0].user_phone, "79001234567");
    }

    #[tokio::test]
    async fn test_fetch_without_success_is_rejected() {
        let transport = ScriptedTransport::new();
        transport.reply(200, json!({"success": false}));
        let (client, _navigator) = scripted_client(&transport);

        let result = OrdersSource::new(client).fetch().await;
        assert!(matches!(result, Err(ApiError::Rejected(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_with_message_marker_refreshes() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new();
                transport.reply(200, orders_json("Новый", json!("1250")));
                transport.reply(200, json!({"message": "Заказ успешно обновлён"}));
                transport.reply(200, orders_json("Готовится", json!("1300")));
                let sync = synchronizer(&transport);

                sync.refresh().await.unwrap();
                sync.edit(&1, "status", "Готовится".into()).unwrap();
                sync.edit(&1, "total_sum", "1300".into()).unwrap();
                assert_eq!(sync.save_row(&1).await, Ok(SaveOutcome::Saved));

                let sent = transport.bodies();
                assert_eq!(sent.len(), 3);
                assert_eq!(sent[1]["order_id"], json!(1));
                assert_eq!(sent[1]["status"], json!("Готовится"));
                assert_eq!(sent[1]["total_sum"], json!("1300"));
                assert_eq!(sent[1]["created_at"], json!("2024-01-01T10:00:00"));
                assert_eq!(sent[1]["token"], json!("access-1"));

                sync.with_view(|v| {
                    let row = v.row(&1).unwrap();
                    assert_eq!(row.state(), SaveState::Saved);
                    assert_eq!(row.record().total_sum, "1300");
                });
            })
            .await;
    }

    #[tokio::test]
    async fn test_unauthorized_save_expires_session() {
        let transport = ScriptedTransport::new();
        transport.reply(200, orders_json("Новый", json!("1250")));
        transport.reply(401, json!({"detail": "expired"}));
        let (client, navigator) = scripted_client(&transport);
        let session = client.session().clone();
        let sync = ListSynchronizer::new(
            OrdersSource::new(client),
            Rc::new(TokioScheduler),
            Duration::from_secs(2),
        );

        sync.refresh().await.unwrap();
        sync.edit(&1, "ready_for", "19:00".into()).unwrap();

        assert_eq!(sync.save_row(&1).await, Err(ApiError::AuthExpired));
        assert_eq!(session.current(), None);
        assert_eq!(navigator.visited(), vec![SIGN_IN_PATH.to_string()]);
        assert_eq!(sync.with_view(|v| v.row(&1).unwrap().state()), SaveState::Idle);
    }
}
