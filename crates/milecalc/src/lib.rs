//! Frequent-flyer mileage earning engine.
//!
//! [`earning::MileageEngine`] turns an origin/destination pair, operating
//! carrier, crediting program, booking class and elite tier into an auditable
//! miles-earned breakdown, reading reference data through an injected
//! [`earning::ReferenceCatalog`].

pub mod config;
pub mod earning;
pub mod error;
pub mod telemetry;
