pub mod administrators;
pub mod auth;
pub mod pages;
