//! Zero Zero core domain logic.
//!
//! Pure types and calculations shared by the API, persistence, and Zai
//! engine crates: lifestyle profiles, the carbon footprint calculator,
//! fallback tip rules, the onboarding wizard step machine, and chat
//! prompt construction. This crate has no internal dependencies and
//! performs no I/O.

pub mod chat;
pub mod dashboard;
pub mod error;
pub mod footprint;
pub mod onboarding;
pub mod pagination;
pub mod profile;
pub mod tips;
pub mod types;
