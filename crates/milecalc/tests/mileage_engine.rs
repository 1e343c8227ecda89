//! End-to-end scenarios against the compiled-in reference catalog, exercised
//! only through the public engine facade.

use std::sync::Arc;

use milecalc::earning::{
    write_comparison_csv, CalculationRequest, ComparisonRequest, EarningBasis, EliteTier,
    InMemoryCatalog, MileageEngine, MileageError, ProgramId, RateSource, Relationship,
};

fn engine() -> MileageEngine<InMemoryCatalog> {
    MileageEngine::new(Arc::new(InMemoryCatalog::standard()))
}

fn request(
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

#[test]
fn american_economy_on_own_metal() {
    let result = engine()
        .calculate(&request("JFK", "LHR", "AA", "aa-aadvantage", "Y", EliteTier::None))
        .expect("calculates");

    assert_eq!(result.relationship, Relationship::HomeCarrier);
    assert_eq!(result.rate_source, RateSource::FareClassBaseline);
    assert_eq!(result.total_miles, 3443);
}

#[test]
fn partner_business_uses_carrier_specific_chart() {
    let result = engine()
        .calculate(&request("JFK", "LHR", "BA", "aa-aadvantage", "J", EliteTier::None))
        .expect("calculates");

    assert_eq!(result.relationship, Relationship::AlliancePartner);
    assert_eq!(result.rate_source, RateSource::CarrierRule);
    assert_eq!(result.resolved_earning_percentage, 1.25);
    assert_eq!(result.base_miles, 3658);
}

#[test]
fn discounted_bucket_uses_program_chart() {
    let result = engine()
        .calculate(&request("JFK", "LHR", "UA", "united-mileageplus", "Q", EliteTier::None))
        .expect("calculates");

    assert_eq!(result.rate_source, RateSource::ProgramRule);
    assert_eq!(result.resolved_earning_percentage, 0.25);
    assert_eq!(result.base_miles, 861);
}

#[test]
fn ultra_long_haul_first_is_capped() {
    let result = engine()
        .calculate(&request("JFK", "SYD", "DL", "delta-skymiles", "F", EliteTier::Platinum))
        .expect("calculates");

    assert!(result.maximum_miles_applied);
    assert_eq!(result.base_miles, 10_000);
    assert_eq!(result.elite_bonus_miles, 10_000);
    assert_eq!(result.total_miles, 20_000);
}

#[test]
fn unallied_partner_short_hop_earns_the_minimum() {
    let result = engine()
        .calculate(&request("BOS", "LGA", "B6", "aa-aadvantage", "Y", EliteTier::None))
        .expect("calculates");

    assert_eq!(result.relationship, Relationship::NonAlliancePartner);
    assert_eq!(result.adjusted_earning_percentage, 0.75);
    assert!(result.minimum_miles_applied);
    assert_eq!(result.base_miles, 500);
}

#[test]
fn revenue_program_credits_the_fare_paid() {
    let mut priced = request("JFK", "LAX", "DL", "delta-skymiles", "Y", EliteTier::Gold);
    priced.ticket_price = Some(400.0);

    let result = engine().calculate(&priced).expect("calculates");

    assert_eq!(result.earning_basis, EarningBasis::Revenue);
    assert_eq!(result.base_miles, 2_000);
    assert_eq!(result.elite_bonus_miles, 1_000);
    assert_eq!(result.total_miles, 3_000);
    assert_eq!(result.distance_miles, 2470);
    assert_eq!(result.elite_qualifying_miles, 2470);
}

#[test]
fn tier_listing_explains_rejected_tiers() {
    let listing = engine()
        .program_tiers(&ProgramId::new("jetblue-trueblue"))
        .expect("program exists");
    let tiers: Vec<_> = listing.tiers.iter().map(|entry| entry.tier).collect();
    assert_eq!(tiers, vec![EliteTier::None]);
}

#[test]
fn tiers_a_program_does_not_offer_are_rejected() {
    let err = engine()
        .calculate(&request("BOS", "LGA", "B6", "jetblue-trueblue", "Y", EliteTier::Silver))
        .unwrap_err();

    assert!(matches!(err, MileageError::UnknownTier { .. }));
    assert_eq!(err.kind(), "unknown_tier");
}

#[test]
fn comparison_covers_every_program_and_exports() {
    let comparison = engine()
        .compare(&ComparisonRequest {
            origin_code: "JFK".to_string(),
            destination_code: "LAX".to_string(),
            operating_carrier_code: "AA".to_string(),
            booking_class_code: "Y".to_string(),
            elite_tier: EliteTier::Gold,
            ticket_price: None,
        })
        .expect("comparison succeeds");

    assert_eq!(comparison.skipped.len(), 1);
    assert_eq!(
        comparison.skipped[0].program_id,
        ProgramId::new("jetblue-trueblue")
    );
    assert_eq!(comparison.entries.len(), 8);
    assert!(comparison
        .entries
        .windows(2)
        .all(|pair| pair[0].estimated_value_usd >= pair[1].estimated_value_usd));

    let mut buffer = Vec::new();
    write_comparison_csv(&mut buffer, &comparison).expect("export succeeds");
    let text = String::from_utf8(buffer).expect("utf8");
    assert_eq!(text.lines().count(), comparison.entries.len() + 1);
}
