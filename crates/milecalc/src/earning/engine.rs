use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::{CatalogError, ReferenceCatalog};
use super::distance::great_circle_miles;
use super::domain::{normalize_code, Airport, EarningModel, EliteTier, FareClass, ProgramId};
use super::elite::{self, ProgramTiers};
use super::rates::{EarningRateResolver, RateSource};
use super::relationship::{Relationship, RelationshipPolicy};
use super::round_miles;
use crate::config::EarningConfig;

/// One flight segment to credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub origin_code: String,
    pub destination_code: String,
    pub operating_carrier_code: String,
    pub loyalty_program_id: ProgramId,
    pub booking_class_code: String,
    #[serde(default)]
    pub elite_tier: EliteTier,
    /// Fare paid in USD; only revenue-based programs use it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
}

/// What the base miles were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningBasis {
    Distance,
    Revenue,
}

impl EarningBasis {
    pub fn label(&self) -> &'static str {
        match self {
            EarningBasis::Distance => "distance",
            EarningBasis::Revenue => "revenue",
        }
    }
}

/// Auditable breakdown of a single calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub origin_code: String,
    pub destination_code: String,
    pub operating_carrier_code: String,
    pub loyalty_program_id: ProgramId,
    pub booking_class_code: String,
    pub fare_class: FareClass,
    pub elite_tier: EliteTier,
    pub distance_miles: u32,
    pub earning_basis: EarningBasis,
    pub rate_source: RateSource,
    pub relationship: Relationship,
    pub resolved_earning_percentage: f64,
    pub adjusted_earning_percentage: f64,
    pub minimum_miles: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_miles: Option<u32>,
    pub minimum_miles_applied: bool,
    pub maximum_miles_applied: bool,
    pub base_miles: u32,
    pub elite_bonus_rate: f64,
    pub elite_bonus_miles: u32,
    pub total_miles: u32,
    pub elite_qualifying_miles: u32,
}

/// Failure kinds surfaced by a calculation. None are recovered internally.
#[derive(Debug, thiserror::Error)]
pub enum MileageError {
    #[error("airport {code} has out-of-range coordinates (lat {latitude}, lon {longitude})")]
    InvalidCoordinate {
        code: String,
        latitude: f64,
        longitude: f64,
    },
    #[error("unknown airport '{0}'")]
    UnknownAirport(String),
    #[error("unknown operating carrier '{0}'")]
    UnknownCarrier(String),
    #[error("unknown loyalty program '{0}'")]
    UnknownProgram(ProgramId),
    #[error("unknown booking class '{0}'")]
    UnknownBookingClass(String),
    #[error("elite tier '{tier}' is not defined for program '{program}'")]
    UnknownTier { program: ProgramId, tier: EliteTier },
    #[error("ticket price must be a positive amount (got {0})")]
    InvalidTicketPrice(f64),
    #[error(transparent)]
    CatalogUnavailable(#[from] CatalogError),
}

impl MileageError {
    pub fn kind(&self) -> &'static str {
        match self {
            MileageError::InvalidCoordinate { .. } => "invalid_coordinate",
            MileageError::UnknownAirport(_) => "unknown_airport",
            MileageError::UnknownCarrier(_) => "unknown_carrier",
            MileageError::UnknownProgram(_) => "unknown_program",
            MileageError::UnknownBookingClass(_) => "unknown_booking_class",
            MileageError::UnknownTier { .. } => "unknown_tier",
            MileageError::InvalidTicketPrice(_) => "invalid_ticket_price",
            MileageError::CatalogUnavailable(_) => "catalog_unavailable",
        }
    }

    /// Only provider failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MileageError::CatalogUnavailable(_))
    }
}

/// Orchestrates distance, rate resolution, relationship adjustment, clamping and
/// elite bonus into one calculation.
pub struct MileageEngine<C> {
    catalog: Arc<C>,
    resolver: EarningRateResolver<C>,
    policy: RelationshipPolicy,
}

impl<C> MileageEngine<C>
where
    C: ReferenceCatalog + 'static,
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_config(catalog, &EarningConfig::default())
    }

    pub fn with_config(catalog: Arc<C>, config: &EarningConfig) -> Self {
        let resolver = EarningRateResolver::new(catalog.clone(), config.default_minimum_miles);
        Self {
            catalog,
            resolver,
            policy: config.relationship_policy(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, MileageError> {
        if let Some(price) = request.ticket_price {
            if !(price.is_finite() && price > 0.0) {
                return Err(MileageError::InvalidTicketPrice(price));
            }
        }

        let origin = self.airport(&request.origin_code)?;
        let destination = self.airport(&request.destination_code)?;

        let carrier_code = normalize_code(&request.operating_carrier_code);
        let carrier = self
            .catalog
            .carrier(&carrier_code)?
            .ok_or_else(|| MileageError::UnknownCarrier(carrier_code.clone()))?;

        let program = self
            .catalog
            .program(&request.loyalty_program_id)?
            .ok_or_else(|| MileageError::UnknownProgram(request.loyalty_program_id.clone()))?;

        // Also validates the booking class.
        let rate = self.resolver.resolve(
            &program.id,
            &carrier_code,
            &request.booking_class_code,
        )?;

        let distance = great_circle_miles(origin.coordinates, destination.coordinates)
            .map_err(|err| {
                let code = if origin.coordinates.is_valid() {
                    destination.code.clone()
                } else {
                    origin.code.clone()
                };
                MileageError::InvalidCoordinate {
                    code,
                    latitude: err.latitude,
                    longitude: err.longitude,
                }
            })?;

        let (relationship, adjusted) =
            self.policy.adjust(rate.earning_percentage, &program, &carrier);

        let (basis, mut base) = match (program.earning_model, request.ticket_price) {
            (EarningModel::Revenue { miles_per_dollar }, Some(price)) => {
                (EarningBasis::Revenue, price * miles_per_dollar * adjusted)
            }
            _ => (EarningBasis::Distance, distance * adjusted),
        };

        let minimum = f64::from(rate.minimum_miles);
        let minimum_applied = base < minimum;
        if minimum_applied {
            base = minimum;
        }

        let mut maximum_applied = false;
        if let Some(maximum) = rate.maximum_miles {
            if base > f64::from(maximum) {
                base = f64::from(maximum);
                maximum_applied = true;
            }
        }

        if minimum_applied && maximum_applied {
            warn!(
                program = %program.id,
                booking_class = %request.booking_class_code,
                minimum = rate.minimum_miles,
                maximum = ?rate.maximum_miles,
                "earning rule caps below its own minimum"
            );
        }

        let (bonus_rate, bonus) = elite::bonus_miles(
            base,
            request.elite_tier,
            &program,
            rate.tier_overrides.as_ref(),
        )?;
        let total = base + bonus;

        // Revenue programs qualify on flown distance, distance programs on base miles.
        let qualifying = if program.earning_model.is_revenue() {
            distance
        } else {
            base
        };

        let base_miles = round_miles(base);
        let bonus_miles = round_miles(bonus);
        let total_miles = round_miles(total);
        let elite_qualifying_miles = round_miles(qualifying.max(minimum));

        debug!(
            origin = %origin.code,
            destination = %destination.code,
            program = %program.id,
            relationship = relationship.label(),
            basis = basis.label(),
            distance,
            base_miles,
            bonus_miles,
            total_miles,
            "mileage calculated"
        );

        Ok(CalculationResult {
            origin_code: origin.code,
            destination_code: destination.code,
            operating_carrier_code: carrier.code,
            loyalty_program_id: program.id,
            booking_class_code: normalize_code(&request.booking_class_code),
            fare_class: rate.fare_class,
            elite_tier: request.elite_tier,
            distance_miles: round_miles(distance),
            earning_basis: basis,
            rate_source: rate.source,
            relationship,
            resolved_earning_percentage: rate.earning_percentage,
            adjusted_earning_percentage: adjusted,
            minimum_miles: rate.minimum_miles,
            maximum_miles: rate.maximum_miles,
            minimum_miles_applied: minimum_applied,
            maximum_miles_applied: maximum_applied,
            base_miles,
            elite_bonus_rate: bonus_rate,
            elite_bonus_miles: bonus_miles,
            total_miles,
            elite_qualifying_miles,
        })
    }

    /// Elite tiers `program_id` accepts, for callers choosing a valid tier.
    pub fn program_tiers(&self, program_id: &ProgramId) -> Result<ProgramTiers, MileageError> {
        let program = self
            .catalog
            .program(program_id)?
            .ok_or_else(|| MileageError::UnknownProgram(program_id.clone()))?;
        Ok(ProgramTiers::for_program(&program))
    }

    fn airport(&self, code: &str) -> Result<Airport, MileageError> {
        let code = normalize_code(code);
        self.catalog
            .airport(&code)?
            .ok_or(MileageError::UnknownAirport(code))
    }
}
