//! Mileage earning engine: great-circle distance, earning-rate resolution,
//! partner relationship adjustment and elite bonuses, assembled into an
//! auditable per-segment breakdown.
//!
//! The engine is stateless. Every calculation reads the injected
//! [`ReferenceCatalog`] and nothing else, so one engine can be shared across
//! threads and requests behind an `Arc`.

pub mod catalog;
pub mod comparison;
pub mod distance;
pub mod domain;
pub(crate) mod elite;
pub mod engine;
pub mod export;
pub mod rates;
pub mod relationship;
pub mod router;
mod standard;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, InMemoryCatalog, ReferenceCatalog};
pub use comparison::{ComparisonEntry, ComparisonRequest, ProgramComparison, SkippedProgram};
pub use distance::{great_circle_miles, EARTH_RADIUS_MILES};
pub use domain::{
    Airport, Alliance, BookingClass, Carrier, Coordinates, EarningModel, EarningRule, EliteTier,
    FareClass, LoyaltyProgram, ProgramId, TierBonusSchedule, UnrecognizedTier,
};
pub use elite::{ProgramTiers, TierBonus};
pub use engine::{
    CalculationRequest, CalculationResult, EarningBasis, MileageEngine, MileageError,
};
pub use export::{write_comparison_csv, ExportError};
pub use rates::{EarningRateResolver, RateSource, ResolvedRate};
pub use relationship::{Relationship, RelationshipPolicy};
pub use router::earning_router;

/// Round half-up to whole miles. Inputs are never negative.
pub(crate) fn round_miles(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}
