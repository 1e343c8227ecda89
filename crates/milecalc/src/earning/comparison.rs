use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::catalog::ReferenceCatalog;
use super::domain::{Alliance, EliteTier, LoyaltyProgram, ProgramId};
use super::engine::{CalculationRequest, CalculationResult, MileageEngine, MileageError};

/// A route evaluated against every program in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    pub origin_code: String,
    pub destination_code: String,
    pub operating_carrier_code: String,
    pub booking_class_code: String,
    #[serde(default)]
    pub elite_tier: EliteTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
}

impl ComparisonRequest {
    fn for_program(&self, program: &ProgramId) -> CalculationRequest {
        CalculationRequest {
            origin_code: self.origin_code.clone(),
            destination_code: self.destination_code.clone(),
            operating_carrier_code: self.operating_carrier_code.clone(),
            loyalty_program_id: program.clone(),
            booking_class_code: self.booking_class_code.clone(),
            elite_tier: self.elite_tier,
            ticket_price: self.ticket_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub rank: usize,
    pub program_name: String,
    pub home_carrier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alliance: Option<Alliance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_value_usd: Option<f64>,
    pub result: CalculationResult,
}

/// Program left out of the ranking, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedProgram {
    pub program_id: ProgramId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramComparison {
    pub request: ComparisonRequest,
    pub entries: Vec<ComparisonEntry>,
    pub skipped: Vec<SkippedProgram>,
}

impl ProgramComparison {
    pub fn best(&self) -> Option<&ComparisonEntry> {
        self.entries.first()
    }
}

impl<C> MileageEngine<C>
where
    C: ReferenceCatalog + 'static,
{
    /// Ranks every catalog program for one route by estimated value, then total miles.
    ///
    /// Programs that do not define the requested tier are reported under
    /// `skipped`; any other failure aborts the comparison.
    pub fn compare(&self, request: &ComparisonRequest) -> Result<ProgramComparison, MileageError> {
        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        for program in self.catalog().programs()? {
            match self.calculate(&request.for_program(&program.id)) {
                Ok(result) => entries.push(entry(program, result)),
                Err(err @ MileageError::UnknownTier { .. }) => skipped.push(SkippedProgram {
                    program_id: program.id,
                    reason: err.to_string(),
                }),
                Err(err) => return Err(err),
            }
        }

        entries.sort_by(rank_order);
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        Ok(ProgramComparison {
            request: request.clone(),
            entries,
            skipped,
        })
    }
}

fn entry(program: LoyaltyProgram, result: CalculationResult) -> ComparisonEntry {
    let estimated_value_usd = program
        .cents_per_mile
        .map(|cents| f64::from(result.total_miles) * cents / 100.0);

    ComparisonEntry {
        rank: 0,
        program_name: program.name,
        home_carrier: program.home_carrier,
        alliance: program.alliance,
        estimated_value_usd,
        result,
    }
}

fn rank_order(a: &ComparisonEntry, b: &ComparisonEntry) -> Ordering {
    let by_value = match (a.estimated_value_usd, b.estimated_value_usd) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_value
        .then_with(|| b.result.total_miles.cmp(&a.result.total_miles))
        .then_with(|| a.result.loyalty_program_id.cmp(&b.result.loyalty_program_id))
}
