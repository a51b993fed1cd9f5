pub mod mutation;
pub mod serde_helpers;
