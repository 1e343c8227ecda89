use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identifier for a loyalty program (e.g. `aa-aadvantage`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ProgramId(pub String);

impl ProgramId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProgramId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<ProgramId> for String {
    fn from(id: ProgramId) -> Self {
        id.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Airport, carrier and booking class codes are matched case-insensitively.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub coordinates: Coordinates,
}

/// Airline alliances recognized by the relationship policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alliance {
    StarAlliance,
    Oneworld,
    SkyTeam,
}

impl Alliance {
    pub fn label(&self) -> &'static str {
        match self {
            Alliance::StarAlliance => "Star Alliance",
            Alliance::Oneworld => "oneworld",
            Alliance::SkyTeam => "SkyTeam",
        }
    }
}

/// Operating airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    pub code: String,
    pub name: String,
    pub alliance: Option<Alliance>,
}

/// Elite status levels, ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum EliteTier {
    #[default]
    None,
    Silver,
    Gold,
    Platinum,
    Top,
}

impl EliteTier {
    pub fn label(&self) -> &'static str {
        match self {
            EliteTier::None => "none",
            EliteTier::Silver => "silver",
            EliteTier::Gold => "gold",
            EliteTier::Platinum => "platinum",
            EliteTier::Top => "top",
        }
    }
}

impl fmt::Display for EliteTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a tier name matches none of the known levels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized elite tier '{0}'")]
pub struct UnrecognizedTier(pub String);

impl FromStr for EliteTier {
    type Err = UnrecognizedTier;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(EliteTier::None),
            "silver" => Ok(EliteTier::Silver),
            "gold" => Ok(EliteTier::Gold),
            "platinum" => Ok(EliteTier::Platinum),
            "top" => Ok(EliteTier::Top),
            _ => Err(UnrecognizedTier(raw.to_string())),
        }
    }
}

impl TryFrom<String> for EliteTier {
    type Error = UnrecognizedTier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Bonus rate per tier, expressed as a fraction of base miles (0.25 = 25%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierBonusSchedule(BTreeMap<EliteTier, f64>);

impl TierBonusSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tier: EliteTier, rate: f64) -> Self {
        self.0.insert(tier, rate);
        self
    }

    pub fn rate(&self, tier: EliteTier) -> Option<f64> {
        self.0.get(&tier).copied()
    }

    /// Defined tiers with their rates, lowest tier first.
    pub fn tiers(&self) -> impl Iterator<Item = (EliteTier, f64)> + '_ {
        self.0.iter().map(|(tier, rate)| (*tier, *rate))
    }

    /// Conventional ladder: None 0%, Silver 25%, Gold 50%, Platinum 100%.
    pub fn standard() -> Self {
        Self::new()
            .with(EliteTier::None, 0.0)
            .with(EliteTier::Silver, 0.25)
            .with(EliteTier::Gold, 0.5)
            .with(EliteTier::Platinum, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyProgram {
    pub id: ProgramId,
    pub name: String,
    pub home_carrier: String,
    /// Modeled separately from the home carrier's membership so mismatches stay expressible.
    pub alliance: Option<Alliance>,
    pub tier_bonuses: TierBonusSchedule,
    #[serde(default)]
    pub earning_model: EarningModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cents_per_mile: Option<f64>,
}

/// How a program credits redeemable miles.
///
/// Revenue programs credit `ticket price × miles_per_dollar × earning
/// percentage` when a price is supplied, and fall back to flown distance
/// otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum EarningModel {
    #[default]
    Distance,
    Revenue { miles_per_dollar: f64 },
}

impl EarningModel {
    pub fn is_revenue(&self) -> bool {
        matches!(self, EarningModel::Revenue { .. })
    }
}

/// Cabin grouping for booking classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FareClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl FareClass {
    /// Earning percentage applied when no explicit rule exists.
    pub fn baseline_percentage(&self) -> f64 {
        match self {
            FareClass::Economy => 1.0,
            FareClass::PremiumEconomy => 1.25,
            FareClass::Business => 1.5,
            FareClass::First => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FareClass::Economy => "Economy",
            FareClass::PremiumEconomy => "Premium Economy",
            FareClass::Business => "Business",
            FareClass::First => "First",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingClass {
    pub code: String,
    pub fare_class: FareClass,
}

/// Program-specific earning override, optionally qualified by operating carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningRule {
    pub program: ProgramId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    pub booking_class: String,
    pub earning_percentage: f64,
    pub minimum_miles: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_miles: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_overrides: Option<TierBonusSchedule>,
}

impl EarningRule {
    pub const DEFAULT_MINIMUM_MILES: u32 = 500;

    pub fn new(program: ProgramId, booking_class: &str, earning_percentage: f64) -> Self {
        Self {
            program,
            carrier: None,
            booking_class: normalize_code(booking_class),
            earning_percentage,
            minimum_miles: Self::DEFAULT_MINIMUM_MILES,
            maximum_miles: None,
            tier_overrides: None,
        }
    }

    pub fn for_carrier(mut self, carrier: &str) -> Self {
        self.carrier = Some(normalize_code(carrier));
        self
    }

    pub fn with_minimum(mut self, minimum_miles: u32) -> Self {
        self.minimum_miles = minimum_miles;
        self
    }

    pub fn with_maximum(mut self, maximum_miles: u32) -> Self {
        self.maximum_miles = Some(maximum_miles);
        self
    }

    pub fn with_tier_overrides(mut self, overrides: TierBonusSchedule) -> Self {
        self.tier_overrides = Some(overrides);
        self
    }
}
