pub mod a001_orders;
pub mod a002_ingredients;
pub mod a003_products;
pub mod a004_promocodes;
