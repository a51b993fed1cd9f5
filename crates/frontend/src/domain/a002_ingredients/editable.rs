use contracts::domain::a002_ingredients::aggregate::Ingredient;

use crate::shared::row_editor::{Editable, FieldError};

pub const FIELD_NAME: &str = "name";
pub const FIELD_PRICE: &str = "price";

impl Editable for Ingredient {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        match field {
            FIELD_NAME => self.name = value,
            FIELD_PRICE => self.price = value,
            "id" => return Err(FieldError::Immutable(field.to_string())),
            _ => return Err(FieldError::Unknown(field.to_string())),
        }
        Ok(())
    }
}
