//! # SoulSync Common Library
//!
//! Shared code for the SoulSync backend services including:
//! - Chakra domain types (ChakraKey, ChakraProfile)
//! - Assessment core: question catalogues, scoring engine, session traversal
//! - Database schema and initialization
//! - Configuration loading
//! - Common error types

pub mod assessment;
pub mod chakra;
pub mod config;
pub mod db;
pub mod error;

pub use chakra::{ChakraKey, ChakraProfile};
pub use error::{Error, Result};
