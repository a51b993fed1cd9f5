use async_trait::async_trait;
use contracts::domain::a004_promocodes::aggregate::{
    DeletePromocodeDto, Promocode, PromocodeDto, PromocodesResponse,
};

use crate::shared::error::ApiError;
use crate::shared::row_editor::Editable;
use crate::shared::sync::ListSource;
use crate::system::auth::client::AuthClient;
use crate::system::auth::transport::Method;

impl Editable for Promocode {
    type Id = i64;

    fn id(&self) -> i64 {
        self.promocode_id
    }
}

/// Empty form of a new promocode: active, fixed-sum discount
pub fn new_promocode() -> PromocodeDto {
    PromocodeDto {
        is_active: true,
        is_percent: false,
        ..Default::default()
    }
}

pub async fn fetch_promocodes(client: &AuthClient) -> Result<Vec<Promocode>, ApiError> {
    let response: PromocodesResponse = client.get("fetch_promocodes_admin").await?;
    match response.promocodes {
        Some(promocodes) if response.success => Ok(promocodes),
        _ => {
            log::error!("fetch_promocodes_admin: success={}, no promocodes", response.success);
            Err(ApiError::Rejected("Не удалось загрузить промокоды".to_string()))
        }
    }
}

/// `create_promocode` without an id, `update_promocode` with one
pub async fn save_promocode(client: &AuthClient, dto: &PromocodeDto) -> Result<(), ApiError> {
    let endpoint = match dto.promocode_id {
        Some(_) => "update_promocode",
        None => "create_promocode",
    };
    client.mutation(Method::Post, endpoint, dto).await.map(|_| ())
}

pub async fn delete_promocode(client: &AuthClient, promocode_id: i64) -> Result<(), ApiError> {
    client
        .mutation(
            Method::Delete,
            "delete_promocode",
            &DeletePromocodeDto { promocode_id },
        )
        .await
        .map(|_| ())
}

#[derive(Clone)]
pub struct PromocodesSource {
    client: AuthClient,
}

impl PromocodesSource {
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }
}

#[async_trait(?Send)]
impl ListSource for PromocodesSource {
    type Record = Promocode;

    async fn fetch(&self) -> Result<Vec<Promocode>, ApiError> {
        fetch_promocodes(&self.client).await
    }
}
