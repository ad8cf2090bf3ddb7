//! Surf forecast feed for Getij
//!
//! Fetches the latest processed SMS row from Supabase and turns its
//! loosely keyed forecast records into a location / day / daypart model.

pub mod aggregate;
pub mod client;
pub mod dates;
pub mod fields;
pub mod payload;
pub mod types;

pub use aggregate::build_model;
pub use client::{ForecastClient, DEFAULT_RPC_NAME};
pub use fields::{resolve_field, ForecastRecord};
pub use payload::{decode_records, model_from_row};
pub use types::*;
