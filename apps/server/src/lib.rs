pub mod config;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod router;
pub mod shutdown;
pub mod state;
