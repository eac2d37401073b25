//! HTTP API handlers

pub mod assessment;
pub mod auth;
pub mod coach;
pub mod health;
pub mod journal;
pub mod profile;
pub mod rituals;
pub mod tracking;
