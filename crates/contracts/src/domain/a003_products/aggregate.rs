use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::{null_as_empty, string_or_number};

/// Ингредиент в составе продукта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductIngredient {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Продукт меню
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub composition: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub protein: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub fats: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub carbohydrates: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub weight: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub kilocalories: String,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub ingredients: Vec<ProductIngredient>,
}

/// Body of `fetch_products`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}

/// Payload of `create_product` / `update_product`.
///
/// Optional text fields left empty in the form are omitted from the body,
/// so the server keeps its current value on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilocalories: Option<String>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientEdit {
    Create,
    Delete,
}

/// Payload of `edit_products_ingredients`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditProductIngredientDto {
    pub product_id: i64,
    pub ingredient_id: i64,
    pub type_edit: IngredientEdit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProductDto {
    pub product_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_fields_are_omitted() {
        let dto = ProductDto {
            name: Some("Борщ".into()),
            price: Some("350".into()),
            is_available: true,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({"name": "Борщ", "price": "350", "is_available": true})
        );
    }

    #[test]
    fn test_ingredient_edit_wire_names() {
        let dto = EditProductIngredientDto {
            product_id: 3,
            ingredient_id: 9,
            type_edit: IngredientEdit::Delete,
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({"product_id": 3, "ingredient_id": 9, "type_edit": "delete"})
        );
    }
}
