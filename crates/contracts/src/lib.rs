//! Wire contracts shared by every page of the admin console.
//!
//! The API embeds the session credential into the JSON body of every
//! protected request, so most request DTOs here are wrapped into
//! [`system::auth::Authed`] right before sending.

pub mod domain;
pub mod shared;
pub mod system;
