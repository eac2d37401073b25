//! Database initialization and shared models

pub mod init;
pub mod models;
pub mod sessions;

pub use init::*;
pub use models::*;
pub use sessions::*;
