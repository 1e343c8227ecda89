use std::io::Write;

use serde::Serialize;

use super::comparison::{ComparisonEntry, ProgramComparison};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write comparison export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid comparison CSV data: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct ComparisonRow<'a> {
    rank: usize,
    program_id: &'a str,
    program_name: &'a str,
    home_carrier: &'a str,
    alliance: &'a str,
    relationship: &'a str,
    booking_class: &'a str,
    fare_class: &'a str,
    adjusted_earning_percentage: String,
    base_miles: u32,
    elite_bonus_miles: u32,
    total_miles: u32,
    estimated_value_usd: String,
}

impl<'a> From<&'a ComparisonEntry> for ComparisonRow<'a> {
    fn from(entry: &'a ComparisonEntry) -> Self {
        let result = &entry.result;
        Self {
            rank: entry.rank,
            program_id: result.loyalty_program_id.as_str(),
            program_name: &entry.program_name,
            home_carrier: &entry.home_carrier,
            alliance: entry.alliance.map(|alliance| alliance.label()).unwrap_or(""),
            relationship: result.relationship.label(),
            booking_class: &result.booking_class_code,
            fare_class: result.fare_class.label(),
            adjusted_earning_percentage: format!("{:.4}", result.adjusted_earning_percentage),
            base_miles: result.base_miles,
            elite_bonus_miles: result.elite_bonus_miles,
            total_miles: result.total_miles,
            estimated_value_usd: entry
                .estimated_value_usd
                .map(|value| format!("{value:.2}"))
                .unwrap_or_default(),
        }
    }
}

/// Writes the ranked entries as CSV with a header row; skipped programs are omitted.
pub fn write_comparison_csv<W: Write>(
    writer: W,
    comparison: &ProgramComparison,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for entry in &comparison.entries {
        csv.serialize(ComparisonRow::from(entry))?;
    }
    csv.flush()?;
    Ok(())
}
