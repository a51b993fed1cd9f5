use async_trait::async_trait;
use contracts::domain::a002_ingredients::aggregate::{
    CreateIngredientDto, DeleteIngredientDto, Ingredient, IngredientsResponse, UpdateIngredientDto,
};

use crate::shared::error::ApiError;
use crate::shared::sync::ListSource;
use crate::system::auth::client::AuthClient;
use crate::system::auth::transport::Method;

/// Full ingredient catalog (also the picker of the menu page)
pub async fn fetch_ingredients(client: &AuthClient) -> Result<Vec<Ingredient>, ApiError> {
    let response: IngredientsResponse = client.get("fetch_ingredients").await?;
    if response.success == Some(false) {
        return Err(ApiError::Rejected("Не удалось загрузить ингредиенты".to_string()));
    }
    response.ingredients.ok_or_else(|| {
        log::error!("fetch_ingredients: no ingredients in reply");
        ApiError::Rejected("Не удалось загрузить ингредиенты".to_string())
    })
}

pub async fn create_ingredient(client: &AuthClient, name: &str, price: &str) -> Result<(), ApiError> {
    let dto = CreateIngredientDto {
        name: name.to_string(),
        price: price.to_string(),
    };
    client.command(Method::Post, "create_ingredient", &dto).await
}

pub async fn delete_ingredient(client: &AuthClient, ingredient_id: i64) -> Result<(), ApiError> {
    client
        .command(
            Method::Delete,
            "delete_ingredient",
            &DeleteIngredientDto { ingredient_id },
        )
        .await
}

#[derive(Clone)]
pub struct IngredientsSource {
    client: AuthClient,
}

impl IngredientsSource {
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }
}

#[async_trait(?Send)]
impl ListSource for IngredientsSource {
    type Record = Ingredient;

    async fn fetch(&self) -> Result<Vec<Ingredient>, ApiError> {
        fetch_ingredients(&self.client).await
    }

    async fn save(&self, draft: &Ingredient) -> Result<(), ApiError> {
        self.client
            .command(Method::Post, "update_ingredient", &UpdateIngredientDto::from(draft))
            .await
    }
}
