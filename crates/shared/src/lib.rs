//! Shared types for the user profile proxy: wire contracts, the error enum,
//! and CDN URL derivation.

pub mod api;
pub mod cdn;
pub mod constants;
pub mod error;
