//! Run the pension calculation for every profile in a batch CSV
//!
//! Outputs one row per profile with the recommended plan or the error

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use pension_planner::{
    CalculatorConfig, PensionCalculator, PolicyTable, YearMonth,
    profile::load_age_window_profiles,
};

/// Evaluate a CSV of age-window profiles in parallel
#[derive(Parser, Debug)]
#[command(name = "run-batch", version)]
struct Args {
    /// Input CSV with CurrentAge, NormalRetireAge, MaxRetireAge, City,
    /// EmploymentStatus, PaymentBase, PaidYears, AccountBalance, Level and
    /// optional SubsidyEligible columns
    input: PathBuf,

    /// Output CSV
    #[arg(short, long, default_value = "batch_output.csv")]
    output: PathBuf,

    /// Directory with city_policies.csv and payout_divisors.csv (built-in tables if omitted)
    #[arg(long)]
    policy_dir: Option<PathBuf>,

    /// Evaluation month as YYYY-MM (defaults to the current month)
    #[arg(long)]
    as_of: Option<YearMonth>,
}

/// One output row per input profile
#[derive(Debug, Serialize)]
struct BatchRow {
    #[serde(rename = "Row")]
    row: usize,
    #[serde(rename = "Plans")]
    plans: usize,
    #[serde(rename = "BestAge")]
    best_age: Option<u32>,
    #[serde(rename = "MonthlyPension")]
    monthly_pension: Option<f64>,
    #[serde(rename = "BreakEvenMonths")]
    break_even_months: Option<u32>,
    #[serde(rename = "TotalPayment")]
    total_payment: Option<f64>,
    #[serde(rename = "AdvantageScore")]
    advantage_score: Option<f64>,
    #[serde(rename = "Error")]
    error: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading profiles from {}...", args.input.display());

    let profiles = load_age_window_profiles(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!("Loaded {} profiles in {:?}", profiles.len(), start.elapsed());

    let table = match &args.policy_dir {
        Some(dir) => PolicyTable::from_csv_path(dir)
            .with_context(|| format!("loading policy tables from {}", dir.display()))?,
        None => PolicyTable::reference(),
    };

    // Pin the evaluation month so every row sees the same clock
    let config = CalculatorConfig {
        as_of: Some(args.as_of.unwrap_or_else(YearMonth::current)),
        ..Default::default()
    };
    let calculator = PensionCalculator::new(table, config);

    println!("Running calculations...");
    let calc_start = Instant::now();
    let results = calculator.calculate_batch(&profiles);
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut failures = 0;
    let mut input_errors = 0;
    for (idx, result) in results.iter().enumerate() {
        let row = match result {
            Ok(res) => BatchRow {
                row: idx + 1,
                plans: res.plans.len(),
                best_age: Some(res.best_plan.age),
                monthly_pension: Some(res.best_plan.monthly_pension),
                break_even_months: Some(res.best_plan.break_even_months),
                total_payment: Some(res.best_plan.total_payment),
                advantage_score: res.advantages.as_ref().map(|a| a.total_score),
                error: String::new(),
            },
            Err(err) => {
                failures += 1;
                if err.is_input_error() {
                    input_errors += 1;
                }
                BatchRow {
                    row: idx + 1,
                    plans: 0,
                    best_age: None,
                    monthly_pension: None,
                    break_even_months: None,
                    total_payment: None,
                    advantage_score: None,
                    error: err.to_string(),
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    println!("\nBatch Summary:");
    println!("  Profiles:  {}", results.len());
    println!("  Succeeded: {}", results.len() - failures);
    println!("  Failed:    {} ({} invalid input)", failures, input_errors);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
