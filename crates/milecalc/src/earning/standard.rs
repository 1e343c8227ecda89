use super::catalog::InMemoryCatalog;
use super::domain::{
    Airport, Alliance, BookingClass, Carrier, Coordinates, EarningModel, EarningRule, EliteTier,
    FareClass, LoyaltyProgram, ProgramId, TierBonusSchedule,
};

const AIRPORTS: &[(&str, &str, f64, f64)] = &[
    ("ATL", "Hartsfield-Jackson Atlanta International", 33.6407, -84.4277),
    ("BOS", "Boston Logan International", 42.3656, -71.0096),
    ("DEN", "Denver International", 39.8561, -104.6737),
    ("DFW", "Dallas/Fort Worth International", 32.8998, -97.0403),
    ("EWR", "Newark Liberty International", 40.6895, -74.1745),
    ("JFK", "John F. Kennedy International", 40.6413, -73.7781),
    ("LAX", "Los Angeles International", 33.9416, -118.4085),
    ("LGA", "LaGuardia", 40.7769, -73.8740),
    ("MIA", "Miami International", 25.7959, -80.2870),
    ("ORD", "Chicago O'Hare International", 41.9742, -87.9073),
    ("PVD", "Rhode Island T. F. Green International", 41.7240, -71.4283),
    ("SEA", "Seattle-Tacoma International", 47.4502, -122.3088),
    ("SFO", "San Francisco International", 37.6213, -122.3790),
    ("YYZ", "Toronto Pearson International", 43.6777, -79.6248),
    ("AMS", "Amsterdam Schiphol", 52.3105, 4.7683),
    ("CDG", "Paris Charles de Gaulle", 49.0097, 2.5479),
    ("FRA", "Frankfurt am Main", 50.0379, 8.5622),
    ("LHR", "London Heathrow", 51.4700, -0.4543),
    ("MUC", "Munich", 48.3537, 11.7750),
    ("DXB", "Dubai International", 25.2532, 55.3657),
    ("HKG", "Hong Kong International", 22.3080, 113.9185),
    ("HND", "Tokyo Haneda", 35.5494, 139.7798),
    ("NRT", "Tokyo Narita", 35.7720, 140.3929),
    ("SIN", "Singapore Changi", 1.3644, 103.9915),
    ("SYD", "Sydney Kingsford Smith", -33.9399, 151.1753),
];

const CARRIERS: &[(&str, &str, Option<Alliance>)] = &[
    ("AA", "American Airlines", Some(Alliance::Oneworld)),
    ("AS", "Alaska Airlines", Some(Alliance::Oneworld)),
    ("BA", "British Airways", Some(Alliance::Oneworld)),
    ("CX", "Cathay Pacific", Some(Alliance::Oneworld)),
    ("JL", "Japan Airlines", Some(Alliance::Oneworld)),
    ("QF", "Qantas", Some(Alliance::Oneworld)),
    ("AC", "Air Canada", Some(Alliance::StarAlliance)),
    ("LH", "Lufthansa", Some(Alliance::StarAlliance)),
    ("NH", "All Nippon Airways", Some(Alliance::StarAlliance)),
    ("SQ", "Singapore Airlines", Some(Alliance::StarAlliance)),
    ("UA", "United Airlines", Some(Alliance::StarAlliance)),
    ("AF", "Air France", Some(Alliance::SkyTeam)),
    ("DL", "Delta Air Lines", Some(Alliance::SkyTeam)),
    ("KL", "KLM Royal Dutch Airlines", Some(Alliance::SkyTeam)),
    ("B6", "JetBlue", None),
    ("EK", "Emirates", None),
    ("WN", "Southwest Airlines", None),
];

const BOOKING_CLASSES: &[(FareClass, &[&str])] = &[
    (FareClass::First, &["F", "A", "P"]),
    (FareClass::Business, &["J", "C", "D", "I", "Z", "R"]),
    (FareClass::PremiumEconomy, &["W", "E"]),
    (
        FareClass::Economy,
        &[
            "Y", "B", "M", "H", "Q", "V", "K", "L", "S", "T", "N", "O", "G", "U", "X",
        ],
    ),
];

/// Discounted fare buckets shared by the distance-based charts.
const DISCOUNT_CHART: &[(&str, f64)] = &[
    ("B", 0.75),
    ("M", 0.75),
    ("H", 0.5),
    ("Q", 0.25),
    ("V", 0.25),
    ("K", 0.25),
    ("L", 0.25),
    ("S", 0.25),
    ("T", 0.25),
    ("N", 0.25),
    ("G", 0.25),
    ("D", 1.25),
    ("I", 1.25),
    ("Z", 1.0),
    ("A", 1.75),
    ("P", 1.5),
];

impl InMemoryCatalog {
    /// Compiled-in reference set covering major hubs, the three alliances and
    /// their flagship programs.
    pub fn standard() -> Self {
        let mut catalog = InMemoryCatalog::new();

        for (code, name, latitude, longitude) in AIRPORTS {
            catalog = catalog.with_airport(Airport {
                code: code.to_string(),
                name: name.to_string(),
                coordinates: Coordinates::new(*latitude, *longitude),
            });
        }

        for (code, name, alliance) in CARRIERS {
            catalog = catalog.with_carrier(Carrier {
                code: code.to_string(),
                name: name.to_string(),
                alliance: *alliance,
            });
        }

        for (fare_class, codes) in BOOKING_CLASSES {
            for code in *codes {
                catalog = catalog.with_booking_class(BookingClass {
                    code: code.to_string(),
                    fare_class: *fare_class,
                });
            }
        }

        for program in standard_programs() {
            catalog = catalog.with_program(program);
        }

        for rule in standard_rules() {
            catalog = catalog.with_rule(rule);
        }

        catalog
    }
}

fn program(
    id: &str,
    name: &str,
    home_carrier: &str,
    alliance: Option<Alliance>,
    tier_bonuses: TierBonusSchedule,
    cents_per_mile: f64,
) -> LoyaltyProgram {
    LoyaltyProgram {
        id: ProgramId::new(id),
        name: name.to_string(),
        home_carrier: home_carrier.to_string(),
        alliance,
        tier_bonuses,
        earning_model: EarningModel::Distance,
        cents_per_mile: Some(cents_per_mile),
    }
}

fn revenue_based(program: LoyaltyProgram, miles_per_dollar: f64) -> LoyaltyProgram {
    LoyaltyProgram {
        earning_model: EarningModel::Revenue { miles_per_dollar },
        ..program
    }
}

fn standard_programs() -> Vec<LoyaltyProgram> {
    vec![
        program(
            "aa-aadvantage",
            "American AAdvantage",
            "AA",
            Some(Alliance::Oneworld),
            TierBonusSchedule::standard().with(EliteTier::Top, 1.2),
            1.4,
        ),
        program(
            "alaska-mileage-plan",
            "Alaska Mileage Plan",
            "AS",
            Some(Alliance::Oneworld),
            TierBonusSchedule::standard().with(EliteTier::Top, 1.25),
            1.5,
        ),
        program(
            "ba-executive-club",
            "British Airways Executive Club",
            "BA",
            Some(Alliance::Oneworld),
            TierBonusSchedule::standard(),
            1.3,
        ),
        program(
            "united-mileageplus",
            "United MileagePlus",
            "UA",
            Some(Alliance::StarAlliance),
            TierBonusSchedule::standard(),
            1.2,
        ),
        program(
            "lufthansa-miles-and-more",
            "Lufthansa Miles & More",
            "LH",
            Some(Alliance::StarAlliance),
            TierBonusSchedule::standard(),
            1.1,
        ),
        revenue_based(
            program(
                "delta-skymiles",
                "Delta SkyMiles",
                "DL",
                Some(Alliance::SkyTeam),
                TierBonusSchedule::standard().with(EliteTier::Top, 1.2),
                1.1,
            ),
            5.0,
        ),
        program(
            "flying-blue",
            "Air France-KLM Flying Blue",
            "AF",
            Some(Alliance::SkyTeam),
            TierBonusSchedule::standard(),
            1.2,
        ),
        program(
            "emirates-skywards",
            "Emirates Skywards",
            "EK",
            None,
            TierBonusSchedule::new()
                .with(EliteTier::None, 0.0)
                .with(EliteTier::Silver, 0.3)
                .with(EliteTier::Gold, 0.5)
                .with(EliteTier::Platinum, 0.75),
            1.0,
        ),
        revenue_based(
            program(
                "jetblue-trueblue",
                "JetBlue TrueBlue",
                "B6",
                None,
                TierBonusSchedule::new().with(EliteTier::None, 0.0),
                1.3,
            ),
            3.0,
        ),
    ]
}

fn standard_rules() -> Vec<EarningRule> {
    let mut rules = Vec::new();

    for id in [
        "aa-aadvantage",
        "united-mileageplus",
        "delta-skymiles",
        "ba-executive-club",
    ] {
        for (code, percentage) in DISCOUNT_CHART {
            rules.push(EarningRule::new(ProgramId::new(id), code, *percentage));
        }
    }

    rules.push(EarningRule::new(ProgramId::new("aa-aadvantage"), "J", 1.25).for_carrier("BA"));
    rules.push(
        EarningRule::new(ProgramId::new("alaska-mileage-plan"), "J", 1.5)
            .for_carrier("CX")
            .with_tier_overrides(TierBonusSchedule::new().with(EliteTier::Gold, 0.75)),
    );
    rules.push(
        EarningRule::new(ProgramId::new("alaska-mileage-plan"), "F", 2.5)
            .with_tier_overrides(TierBonusSchedule::new().with(EliteTier::Gold, 0.75)),
    );
    rules.push(EarningRule::new(ProgramId::new("delta-skymiles"), "F", 2.0).with_maximum(10_000));
    rules.push(EarningRule::new(ProgramId::new("flying-blue"), "Y", 1.0).with_minimum(250));
    rules.push(
        EarningRule::new(ProgramId::new("emirates-skywards"), "J", 1.5)
            .with_minimum(1_000)
            .with_maximum(8_000),
    );

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earning::catalog::ReferenceCatalog;
    use crate::earning::distance::great_circle_miles;

    #[test]
    fn every_program_home_carrier_is_registered() {
        let catalog = InMemoryCatalog::standard();
        for program in catalog.programs().expect("programs") {
            let carrier = catalog
                .carrier(&program.home_carrier)
                .expect("lookup")
                .unwrap_or_else(|| panic!("{} home carrier missing", program.id));
            assert_eq!(
                carrier.alliance, program.alliance,
                "{} alliance mismatch",
                program.id
            );
        }
    }

    #[test]
    fn every_rule_references_registered_entities() {
        let catalog = InMemoryCatalog::standard();
        for rule in standard_rules() {
            assert!(catalog.program(&rule.program).expect("lookup").is_some());
            assert!(catalog
                .booking_class(&rule.booking_class)
                .expect("lookup")
                .is_some());
            if let Some(carrier) = &rule.carrier {
                assert!(catalog.carrier(carrier).expect("lookup").is_some());
            }
        }
    }

    #[test]
    fn airports_have_valid_coordinates() {
        for (code, _, latitude, longitude) in AIRPORTS {
            assert!(
                Coordinates::new(*latitude, *longitude).is_valid(),
                "{code} out of range"
            );
        }
        assert_eq!(InMemoryCatalog::standard().airport_count(), AIRPORTS.len());
    }

    #[test]
    fn every_catalog_airport_is_zero_miles_from_itself() {
        let catalog = InMemoryCatalog::standard();
        assert_eq!(catalog.airport_count(), AIRPORTS.len());
        for (code, ..) in AIRPORTS {
            let airport = catalog
                .airport(code)
                .expect("lookup")
                .unwrap_or_else(|| panic!("{code} missing"));
            let miles = great_circle_miles(airport.coordinates, airport.coordinates)
                .expect("valid coordinates");
            assert_eq!(miles, 0.0, "{code}");
        }
    }

    #[test]
    fn revenue_programs_carry_an_earn_rate() {
        let catalog = InMemoryCatalog::standard();
        let delta = catalog
            .program(&ProgramId::new("delta-skymiles"))
            .expect("lookup")
            .expect("delta registered");
        assert_eq!(
            delta.earning_model,
            EarningModel::Revenue {
                miles_per_dollar: 5.0
            }
        );
    }

    #[test]
    fn booking_codes_map_to_cabins() {
        let catalog = InMemoryCatalog::standard();
        let cabin = |code: &str| {
            catalog
                .booking_class(code)
                .expect("lookup")
                .map(|class| class.fare_class)
        };
        assert_eq!(cabin("F"), Some(FareClass::First));
        assert_eq!(cabin("R"), Some(FareClass::Business));
        assert_eq!(cabin("E"), Some(FareClass::PremiumEconomy));
        assert_eq!(cabin("X"), Some(FareClass::Economy));
        assert_eq!(cabin("1"), None);
    }
}
