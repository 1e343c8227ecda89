use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::ReferenceCatalog;
use super::domain::{normalize_code, EarningRule, FareClass, ProgramId, TierBonusSchedule};
use super::MileageError;

/// Which step of the fallback chain produced the rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    CarrierRule,
    ProgramRule,
    FareClassBaseline,
}

impl RateSource {
    pub fn label(&self) -> &'static str {
        match self {
            RateSource::CarrierRule => "carrier rule",
            RateSource::ProgramRule => "program rule",
            RateSource::FareClassBaseline => "fare class baseline",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate {
    pub earning_percentage: f64,
    pub minimum_miles: u32,
    pub maximum_miles: Option<u32>,
    pub tier_overrides: Option<TierBonusSchedule>,
    pub fare_class: FareClass,
    pub source: RateSource,
}

impl ResolvedRate {
    fn from_rule(rule: EarningRule, fare_class: FareClass, source: RateSource) -> Self {
        Self {
            earning_percentage: rule.earning_percentage,
            minimum_miles: rule.minimum_miles,
            maximum_miles: rule.maximum_miles,
            tier_overrides: rule.tier_overrides,
            fare_class,
            source,
        }
    }
}

/// Resolves the earning percentage for a program, carrier and booking class.
///
/// First match wins: carrier-qualified rule, then program-wide rule for the
/// booking class, then the fare-class baseline with the default minimum.
pub struct EarningRateResolver<C> {
    catalog: Arc<C>,
    default_minimum_miles: u32,
}

impl<C> EarningRateResolver<C>
where
    C: ReferenceCatalog,
{
    pub fn new(catalog: Arc<C>, default_minimum_miles: u32) -> Self {
        Self {
            catalog,
            default_minimum_miles,
        }
    }

    pub fn resolve(
        &self,
        program: &ProgramId,
        operating_carrier: &str,
        booking_class: &str,
    ) -> Result<ResolvedRate, MileageError> {
        if self.catalog.program(program)?.is_none() {
            return Err(MileageError::UnknownProgram(program.clone()));
        }

        let booking_class = normalize_code(booking_class);
        let fare_class = self
            .catalog
            .booking_class(&booking_class)?
            .ok_or_else(|| MileageError::UnknownBookingClass(booking_class.clone()))?
            .fare_class;

        let carrier = normalize_code(operating_carrier);
        if let Some(rule) = self
            .catalog
            .earning_rule(program, Some(&carrier), &booking_class)?
        {
            return Ok(ResolvedRate::from_rule(
                rule,
                fare_class,
                RateSource::CarrierRule,
            ));
        }

        if let Some(rule) = self.catalog.earning_rule(program, None, &booking_class)? {
            return Ok(ResolvedRate::from_rule(
                rule,
                fare_class,
                RateSource::ProgramRule,
            ));
        }

        Ok(ResolvedRate {
            earning_percentage: fare_class.baseline_percentage(),
            minimum_miles: self.default_minimum_miles,
            maximum_miles: None,
            tier_overrides: None,
            fare_class,
            source: RateSource::FareClassBaseline,
        })
    }
}
