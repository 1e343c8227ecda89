use crate::cli::{CalculateArgs, CompareArgs, SegmentArgs, TiersArgs};
use crate::infra::standard_engine;
use milecalc::config::AppConfig;
use milecalc::earning::{
    write_comparison_csv, CalculationRequest, CalculationResult, ComparisonRequest,
    ProgramComparison, ProgramId,
};
use milecalc::error::AppError;
use std::fs::File;
use std::io::BufWriter;

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let engine = standard_engine(&AppConfig::load()?.earning);
    let request = CalculationRequest {
        origin_code: args.segment.origin.clone(),
        destination_code: args.segment.destination.clone(),
        operating_carrier_code: args.segment.carrier.clone(),
        loyalty_program_id: ProgramId::new(&args.program),
        booking_class_code: args.segment.booking_class.clone(),
        elite_tier: args.segment.tier,
        ticket_price: args.segment.ticket_price,
    };

    let result = engine.calculate(&request)?;
    if args.json {
        let rendered = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print_breakdown(&result);
    }
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let engine = standard_engine(&AppConfig::load()?.earning);
    let comparison = engine.compare(&comparison_request(&args.segment))?;

    print_comparison(&comparison);

    if let Some(path) = args.csv.as_ref() {
        let file = File::create(path)?;
        write_comparison_csv(BufWriter::new(file), &comparison)?;
        println!("\nRanking written to {}", path.display());
    }
    Ok(())
}

fn comparison_request(segment: &SegmentArgs) -> ComparisonRequest {
    ComparisonRequest {
        origin_code: segment.origin.clone(),
        destination_code: segment.destination.clone(),
        operating_carrier_code: segment.carrier.clone(),
        booking_class_code: segment.booking_class.clone(),
        elite_tier: segment.tier,
        ticket_price: segment.ticket_price,
    }
}

pub(crate) fn run_tiers(args: TiersArgs) -> Result<(), AppError> {
    let engine = standard_engine(&AppConfig::load()?.earning);
    let listing = engine.program_tiers(&ProgramId::new(&args.program))?;

    println!("{} ({})", listing.program_name, listing.program_id);
    for entry in &listing.tiers {
        println!("  {:<10} {:>5.0}%", entry.tier.label(), entry.bonus_rate * 100.0);
    }
    Ok(())
}

fn print_breakdown(result: &CalculationResult) {
    println!(
        "{} -> {} on {} in {} ({}), credited to {}",
        result.origin_code,
        result.destination_code,
        result.operating_carrier_code,
        result.booking_class_code,
        result.fare_class.label(),
        result.loyalty_program_id
    );
    println!(
        "  Distance:          {} mi (earning on {})",
        result.distance_miles,
        result.earning_basis.label()
    );
    println!(
        "  Earning rate:      {:.0}% ({})",
        result.resolved_earning_percentage * 100.0,
        result.rate_source.label()
    );
    println!(
        "  Relationship:      {} -> {:.1}%",
        result.relationship.label(),
        result.adjusted_earning_percentage * 100.0
    );

    let mut limits = format!("min {}", result.minimum_miles);
    if result.minimum_miles_applied {
        limits.push_str(" (applied)");
    }
    if let Some(maximum) = result.maximum_miles {
        limits.push_str(&format!(", max {maximum}"));
        if result.maximum_miles_applied {
            limits.push_str(" (applied)");
        }
    }
    println!("  Limits:            {limits}");
    println!("  Base miles:        {}", result.base_miles);
    println!(
        "  Elite bonus:       {} ({} at {:.0}%)",
        result.elite_bonus_miles,
        result.elite_tier,
        result.elite_bonus_rate * 100.0
    );
    println!("  Total miles:       {}", result.total_miles);
    println!("  Qualifying miles:  {}", result.elite_qualifying_miles);
}

fn print_comparison(comparison: &ProgramComparison) {
    let request = &comparison.request;
    println!(
        "{} -> {} on {} in {}, tier {}",
        request.origin_code,
        request.destination_code,
        request.operating_carrier_code,
        request.booking_class_code,
        request.elite_tier
    );

    for entry in &comparison.entries {
        let value = entry
            .estimated_value_usd
            .map(|value| format!("${value:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>2}. {:<32} {:>7} mi  {:>9}  {}",
            entry.rank,
            entry.program_name,
            entry.result.total_miles,
            value,
            entry.result.relationship.label()
        );
    }

    for skipped in &comparison.skipped {
        println!("    skipped {}: {}", skipped.program_id, skipped.reason);
    }
}
