use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::earning::catalog::{CatalogError, InMemoryCatalog, ReferenceCatalog};
use crate::earning::comparison::ComparisonRequest;
use crate::earning::domain::{
    Airport, Alliance, BookingClass, Carrier, Coordinates, EarningModel, EarningRule, EliteTier,
    FareClass, LoyaltyProgram, ProgramId, TierBonusSchedule,
};
use crate::earning::engine::{CalculationRequest, MileageEngine};

/// Program owned by `HC`, member of Star Alliance, with explicit rules.
pub(crate) const HOME_PROGRAM: &str = "home-rewards";
/// Unallied revenue-based program (4 miles per dollar) that only defines the
/// base tier and Silver.
pub(crate) const LONE_PROGRAM: &str = "lone-miles";
/// SkyTeam program owned by `OA`.
pub(crate) const SKY_PROGRAM: &str = "sky-club";

fn airport(code: &str, latitude: f64, longitude: f64) -> Airport {
    Airport {
        code: code.to_string(),
        name: format!("{code} International"),
        coordinates: Coordinates::new(latitude, longitude),
    }
}

fn carrier(code: &str, alliance: Option<Alliance>) -> Carrier {
    Carrier {
        code: code.to_string(),
        name: format!("{code} Airways"),
        alliance,
    }
}

fn booking(code: &str, fare_class: FareClass) -> BookingClass {
    BookingClass {
        code: code.to_string(),
        fare_class,
    }
}

pub(crate) fn catalog() -> InMemoryCatalog {
    let home = ProgramId::new(HOME_PROGRAM);

    InMemoryCatalog::new()
        .with_airport(airport("JFK", 40.6413, -73.7781))
        .with_airport(airport("LHR", 51.4700, -0.4543))
        .with_airport(airport("BOS", 42.3656, -71.0096))
        .with_airport(airport("PVD", 41.7240, -71.4283))
        .with_airport(airport("XXX", 95.0, 10.0))
        .with_carrier(carrier("HC", Some(Alliance::StarAlliance)))
        .with_carrier(carrier("PA", Some(Alliance::StarAlliance)))
        .with_carrier(carrier("OA", Some(Alliance::SkyTeam)))
        .with_carrier(carrier("IN", None))
        .with_booking_class(booking("Y", FareClass::Economy))
        .with_booking_class(booking("K", FareClass::Economy))
        .with_booking_class(booking("W", FareClass::PremiumEconomy))
        .with_booking_class(booking("J", FareClass::Business))
        .with_booking_class(booking("C", FareClass::Business))
        .with_booking_class(booking("F", FareClass::First))
        .with_program(LoyaltyProgram {
            id: home.clone(),
            name: "Home Rewards".to_string(),
            home_carrier: "HC".to_string(),
            alliance: Some(Alliance::StarAlliance),
            tier_bonuses: TierBonusSchedule::standard(),
            earning_model: EarningModel::Distance,
            cents_per_mile: Some(1.5),
        })
        .with_program(LoyaltyProgram {
            id: ProgramId::new(LONE_PROGRAM),
            name: "Lone Miles".to_string(),
            home_carrier: "IN".to_string(),
            alliance: None,
            tier_bonuses: TierBonusSchedule::new()
                .with(EliteTier::None, 0.0)
                .with(EliteTier::Silver, 0.1),
            earning_model: EarningModel::Revenue {
                miles_per_dollar: 4.0,
            },
            cents_per_mile: None,
        })
        .with_program(LoyaltyProgram {
            id: ProgramId::new(SKY_PROGRAM),
            name: "Sky Club".to_string(),
            home_carrier: "OA".to_string(),
            alliance: Some(Alliance::SkyTeam),
            tier_bonuses: TierBonusSchedule::standard().with(EliteTier::Top, 1.5),
            earning_model: EarningModel::Distance,
            cents_per_mile: Some(1.0),
        })
        .with_rule(EarningRule::new(home.clone(), "J", 1.75).for_carrier("PA"))
        .with_rule(EarningRule::new(home.clone(), "J", 1.6).with_minimum(1_000))
        .with_rule(
            EarningRule::new(home.clone(), "C", 1.5)
                .with_maximum(4_000)
                .with_tier_overrides(TierBonusSchedule::new().with(EliteTier::Gold, 0.8)),
        )
        .with_rule(
            EarningRule::new(home, "K", 0.25)
                .with_minimum(3_000)
                .with_maximum(2_000),
        )
}

pub(crate) fn engine() -> MileageEngine<InMemoryCatalog> {
    MileageEngine::new(Arc::new(catalog()))
}

pub(crate) fn request(
    origin: &str,
    destination: &str,
    carrier: &str,
    program: &str,
    booking_class: &str,
    tier: EliteTier,
) -> CalculationRequest {
    CalculationRequest {
        origin_code: origin.to_string(),
        destination_code: destination.to_string(),
        operating_carrier_code: carrier.to_string(),
        loyalty_program_id: ProgramId::new(program),
        booking_class_code: booking_class.to_string(),
        elite_tier: tier,
        ticket_price: None,
    }
}

pub(crate) fn comparison_request(
    origin: &str,
    destination: &str,
    carrier: &str,
    booking_class: &str,
) -> ComparisonRequest {
    ComparisonRequest {
        origin_code: origin.to_string(),
        destination_code: destination.to_string(),
        operating_carrier_code: carrier.to_string(),
        booking_class_code: booking_class.to_string(),
        elite_tier: EliteTier::None,
        ticket_price: None,
    }
}

/// Provider whose backing store is down.
pub(crate) struct UnavailableCatalog;

impl ReferenceCatalog for UnavailableCatalog {
    fn airport(&self, _code: &str) -> Result<Option<Airport>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }

    fn carrier(&self, _code: &str) -> Result<Option<Carrier>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }

    fn program(&self, _id: &ProgramId) -> Result<Option<LoyaltyProgram>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }

    fn booking_class(&self, _code: &str) -> Result<Option<BookingClass>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }

    fn earning_rule(
        &self,
        _program: &ProgramId,
        _carrier: Option<&str>,
        _booking_class: &str,
    ) -> Result<Option<EarningRule>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }

    fn programs(&self) -> Result<Vec<LoyaltyProgram>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }
}

pub(crate) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
