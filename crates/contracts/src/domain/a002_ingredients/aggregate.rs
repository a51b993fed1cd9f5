use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::{null_as_empty, string_or_number};

/// Ингредиент, который можно привязать к продукту меню
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: String,
}

/// Body of `fetch_ingredients`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientsResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIngredientDto {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateIngredientDto {
    pub ingredient_id: i64,
    pub name: String,
    pub price: String,
}

impl From<&Ingredient> for UpdateIngredientDto {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            ingredient_id: ingredient.id,
            name: ingredient.name.clone(),
            price: ingredient.price.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteIngredientDto {
    pub ingredient_id: i64,
}
