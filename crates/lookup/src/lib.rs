//! Read-only external data clients.
//!
//! Thin reqwest wrappers over the two lookup services the dashboard
//! consumes: postcode geocoding and the public water-quality portal.
//! Both are constructed explicitly with their base URLs and injected
//! into the API state, never reached through module-level singletons.

pub mod error;
pub mod geocode;
pub mod water_quality;

pub use error::LookupError;
