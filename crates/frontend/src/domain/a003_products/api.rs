use async_trait::async_trait;
use contracts::domain::a003_products::aggregate::{
    DeleteProductDto, EditProductIngredientDto, IngredientEdit, Product, ProductDto,
    ProductsResponse,
};

use crate::shared::error::ApiError;
use crate::shared::row_editor::Editable;
use crate::shared::sync::ListSource;
use crate::system::auth::client::AuthClient;
use crate::system::auth::transport::Method;

/// Cards are edited through the modal form, not in place
impl Editable for Product {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

pub async fn fetch_products(client: &AuthClient) -> Result<Vec<Product>, ApiError> {
    let response: ProductsResponse = client.get("fetch_products").await?;
    match response.products {
        Some(products) if response.success != Some(false) => Ok(products),
        _ => {
            log::error!("fetch_products: no products in reply");
            Err(ApiError::Rejected("Не удалось загрузить меню".to_string()))
        }
    }
}

/// `create_product` without an id, `update_product` with one
pub async fn save_product(client: &AuthClient, dto: &ProductDto) -> Result<(), ApiError> {
    let endpoint = match dto.product_id {
        Some(_) => "update_product",
        None => "create_product",
    };
    client.command(Method::Post, endpoint, dto).await
}

pub async fn delete_product(client: &AuthClient, product_id: i64) -> Result<(), ApiError> {
    client
        .command(Method::Delete, "delete_product", &DeleteProductDto { product_id })
        .await
}

/// Attach or detach an ingredient and return the product as it is now
pub async fn edit_product_ingredient(
    client: &AuthClient,
    product_id: i64,
    ingredient_id: i64,
    type_edit: IngredientEdit,
) -> Result<Option<Product>, ApiError> {
    let dto = EditProductIngredientDto {
        product_id,
        ingredient_id,
        type_edit,
    };
    client
        .command(Method::Post, "edit_products_ingredients", &dto)
        .await?;
    let products = fetch_products(client).await?;
    Ok(products.into_iter().find(|p| p.id == product_id))
}

#[derive(Clone)]
pub struct ProductsSource {
    client: AuthClient,
}

impl ProductsSource {
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }
}

#[async_trait(?Send)]
impl ListSource for ProductsSource {
    type Record = Product;

    async fn fetch(&self) -> Result<Vec<Product>, ApiError> {
        fetch_products(&self.client).await
    }
}
