pub mod administrators;
pub mod auth;
