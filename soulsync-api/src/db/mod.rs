//! Feature-specific database queries

pub mod coach;
pub mod journal;
pub mod profiles;
pub mod rituals;
pub mod tracking;
