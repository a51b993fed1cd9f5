use contracts::domain::a003_products::aggregate::{Product, ProductDto};

use crate::shared::form_utils::optional;

/// Text inputs of the product form, in display order: (name, label, input type, required)
pub const FIELDS: [(&str, &str, &str, bool); 9] = [
    ("name", "Название", "text", true),
    ("price", "Цена", "number", true),
    ("description", "Описание", "text", false),
    ("composition", "Состав", "text", false),
    ("protein", "Белки", "number", false),
    ("fats", "Жиры", "number", false),
    ("carbohydrates", "Углеводы", "number", false),
    ("weight", "Вес", "number", false),
    ("kilocalories", "Ккал", "number", false),
];

/// Состояние формы продукта (создание или редактирование)
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub product_id: Option<i64>,
    pub name: String,
    pub price: String,
    pub description: String,
    pub composition: String,
    pub protein: String,
    pub fats: String,
    pub carbohydrates: String,
    pub weight: String,
    pub kilocalories: String,
    pub is_available: bool,
}

impl Default for ProductForm {
    /// A new product starts as available
    fn default() -> Self {
        Self {
            product_id: None,
            name: String::new(),
            price: String::new(),
            description: String::new(),
            composition: String::new(),
            protein: String::new(),
            fats: String::new(),
            carbohydrates: String::new(),
            weight: String::new(),
            kilocalories: String::new(),
            is_available: true,
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(p: &Product) -> Self {
        Self {
            product_id: Some(p.id),
            name: p.name.clone(),
            price: p.price.clone(),
            description: p.description.clone(),
            composition: p.composition.clone(),
            protein: p.protein.clone(),
            fats: p.fats.clone(),
            carbohydrates: p.carbohydrates.clone(),
            weight: p.weight.clone(),
            kilocalories: p.kilocalories.clone(),
            is_available: p.is_available,
        }
    }
}

impl ProductForm {
    pub fn is_new(&self) -> bool {
        self.product_id.is_none()
    }

    fn slot(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "price" => Some(&mut self.price),
            "description" => Some(&mut self.description),
            "composition" => Some(&mut self.composition),
            "protein" => Some(&mut self.protein),
            "fats" => Some(&mut self.fats),
            "carbohydrates" => Some(&mut self.carbohydrates),
            "weight" => Some(&mut self.weight),
            "kilocalories" => Some(&mut self.kilocalories),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "price" => &self.price,
            "description" => &self.description,
            "composition" => &self.composition,
            "protein" => &self.protein,
            "fats" => &self.fats,
            "carbohydrates" => &self.carbohydrates,
            "weight" => &self.weight,
            "kilocalories" => &self.kilocalories,
            _ => "",
        }
    }

    pub fn set(&mut self, field: &str, value: String) {
        match self.slot(field) {
            Some(slot) => *slot = value,
            None => log::warn!("Unknown product field {}", field),
        }
    }

    /// Request body; empty inputs are left out
    pub fn to_dto(&self) -> ProductDto {
        ProductDto {
            product_id: self.product_id,
            name: optional(&self.name),
            price: optional(&self.price),
            description: optional(&self.description),
            composition: optional(&self.composition),
            protein: optional(&self.protein),
            fats: optional(&self.fats),
            carbohydrates: optional(&self.carbohydrates),
            weight: optional(&self.weight),
            kilocalories: optional(&self.kilocalories),
            is_available: self.is_available,
        }
    }
}
