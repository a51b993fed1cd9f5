use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::{null_as_empty, opt_string_or_number, string_or_number};

/// Промокод на скидку
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promocode {
    pub promocode_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub promocode: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    // сервер отдаёт поле с опечаткой
    #[serde(default, alias = "is_acitve")]
    pub is_active: bool,
    #[serde(default)]
    pub is_percent: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub discount: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub min_total_sum: Option<String>,
}

impl Promocode {
    /// "10%" or "150₽", with the minimum order sum when there is one
    pub fn discount_label(&self) -> String {
        let unit = if self.is_percent { "%" } else { "₽" };
        match self.min_total_sum.as_deref().filter(|s| !s.is_empty() && *s != "0") {
            Some(min) => format!("Скидка: {}{} (от {}₽)", self.discount, unit, min),
            None => format!("Скидка: {}{}", self.discount, unit),
        }
    }
}

/// Body of `fetch_promocodes_admin`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromocodesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub promocodes: Option<Vec<Promocode>>,
}

/// Payload of `create_promocode` / `update_promocode`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromocodeDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promocode_id: Option<i64>,
    pub promocode: String,
    pub description: String,
    pub is_active: bool,
    pub is_percent: bool,
    pub discount: String,
    pub min_total_sum: String,
}

impl From<&Promocode> for PromocodeDto {
    fn from(promo: &Promocode) -> Self {
        Self {
            promocode_id: Some(promo.promocode_id),
            promocode: promo.promocode.clone(),
            description: promo.description.clone(),
            is_active: promo.is_active,
            is_percent: promo.is_percent,
            discount: promo.discount.clone(),
            min_total_sum: promo.min_total_sum.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePromocodeDto {
    pub promocode_id: i64,
}
