//! Ontology: schema.org records as JSON-LD.
//!
//! This crate encodes strongly typed records as JSON-LD documents and
//! decodes them back, preserving what generic JSON mapping loses: the UTC
//! offset a timestamp was written in, and the dimension of a measurement.
//!
//! # Overview
//!
//! - **Reserved keys**: `@context`, `@type` and `@id` are handled once for
//!   every record; records only declare their own attributes
//! - **Root-only context**: `@context` is written on the document root and
//!   never repeated inside nested records
//! - **Strict types**: decoding fails if `@type` is not the expected tag
//!
//! # Quick Start
//!
//! ```rust
//! use ontology::codec::{decode, encode, EncodingContext};
//! use ontology::schema::{Place, Trip};
//! use ontology::Timestamp;
//!
//! let trip = Trip {
//!     name: Some("Weekend away".to_string()),
//!     departure_time: Some(Timestamp::parse("2025-06-01T08:00:00.000-07:00").unwrap()),
//!     itinerary: Some(vec![Place::named("Big Sur")]),
//!     ..Trip::default()
//! };
//!
//! let value = encode(&trip, true, &EncodingContext::default()).unwrap();
//! assert_eq!(value["@context"], "https://schema.org");
//! assert_eq!(value["departureTime"], "2025-06-01T08:00:00.000-07:00");
//! assert!(value["itinerary"][0].get("@context").is_none());
//!
//! let decoded: Trip = decode(&value).unwrap();
//! assert_eq!(decoded, trip);
//! ```
//!
//! # Modules
//!
//! - [`codec`]: The record protocol, key space and node readers/writers
//! - [`model`]: Timestamps and quantitative values
//! - [`units`]: Typed measurements and the unit code registry
//! - [`schema`]: schema.org records and the GeoJSON-LD weather forecast
//! - [`provider`]: Interface for external record sources
//! - [`error`]: Error types
//!
//! # Logging
//!
//! Recoverable problems are reported through the [`log`] facade and never
//! abort a decode: unknown keys at `debug`, unit code mismatches and lossy
//! unit fallbacks at `warn`. The crate installs no logger.

pub mod codec;
pub mod error;
pub mod model;
pub mod provider;
pub mod schema;
pub mod units;
pub mod util;

// Re-export commonly used types at crate root
pub use codec::{
    decode, encode, from_json_str, to_json_string, EncodingContext, Measured, Record, SemanticKey,
    SCHEMA_ORG_CONTEXT,
};
pub use error::{DecodeError, EncodeError, ErrorCode};
pub use model::{QuantitativeValue, Timestamp};
pub use provider::{Capability, Provider, ProviderError, ProviderRegistry, StaticProvider};
pub use schema::Thing;
pub use units::{Dimension, Measurement, QuantityKind};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
