pub mod api;
pub mod client;
pub mod session;
pub mod storage;
pub mod transport;
