use serde::{Deserialize, Serialize};

use super::domain::{EliteTier, LoyaltyProgram, ProgramId, TierBonusSchedule};
use super::MileageError;

/// One tier a program accepts, with its default bonus rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBonus {
    pub tier: EliteTier,
    pub bonus_rate: f64,
}

/// The elite tiers a program accepts, lowest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramTiers {
    pub program_id: ProgramId,
    pub program_name: String,
    pub tiers: Vec<TierBonus>,
}

impl ProgramTiers {
    /// `EliteTier::None` is always accepted, at 0% when the program does not list it.
    pub fn for_program(program: &LoyaltyProgram) -> Self {
        let mut tiers: Vec<TierBonus> = program
            .tier_bonuses
            .tiers()
            .map(|(tier, rate)| TierBonus {
                tier,
                bonus_rate: sanitize(rate),
            })
            .collect();
        if tiers.first().map(|entry| entry.tier) != Some(EliteTier::None) {
            tiers.insert(
                0,
                TierBonus {
                    tier: EliteTier::None,
                    bonus_rate: 0.0,
                },
            );
        }

        Self {
            program_id: program.id.clone(),
            program_name: program.name.clone(),
            tiers,
        }
    }
}

/// Bonus rate for `tier`: rule override first, then the program default.
///
/// `EliteTier::None` falls back to 0; any other tier the program does not
/// define is rejected instead of defaulted.
pub fn bonus_rate(
    tier: EliteTier,
    program: &LoyaltyProgram,
    overrides: Option<&TierBonusSchedule>,
) -> Result<f64, MileageError> {
    let rate = overrides
        .and_then(|schedule| schedule.rate(tier))
        .or_else(|| program.tier_bonuses.rate(tier));

    let rate = match (rate, tier) {
        (Some(rate), _) => rate,
        (None, EliteTier::None) => 0.0,
        (None, tier) => {
            return Err(MileageError::UnknownTier {
                program: program.id.clone(),
                tier,
            })
        }
    };

    Ok(sanitize(rate))
}

fn sanitize(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        0.0
    }
}

/// Unrounded bonus earned on top of the clamped `base`, with the rate used.
pub fn bonus_miles(
    base: f64,
    tier: EliteTier,
    program: &LoyaltyProgram,
    overrides: Option<&TierBonusSchedule>,
) -> Result<(f64, f64), MileageError> {
    let rate = bonus_rate(tier, program, overrides)?;
    Ok((rate, base * rate))
}
