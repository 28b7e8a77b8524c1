//! Pension Planner CLI
//!
//! Command-line interface for evaluating one applicant profile

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pension_planner::{
    CalculationResult, CalculatorConfig, HorizonOverflow, PensionCalculator, PolicyTable,
    SimulationConfig, YearMonth,
    profile::load_profile,
    projection::DEFAULT_MAX_MONTHS,
};

/// Project monthly pensions for candidate retirement ages and recommend one
#[derive(Parser, Debug)]
#[command(name = "pension-planner", version)]
struct Args {
    /// Applicant profile (JSON, age-window or worker-category shape)
    profile: PathBuf,

    /// Directory with city_policies.csv and payout_divisors.csv (built-in tables if omitted)
    #[arg(long)]
    policy_dir: Option<PathBuf>,

    /// Evaluation month as YYYY-MM (defaults to the current month)
    #[arg(long)]
    as_of: Option<YearMonth>,

    /// Longest projection in months
    #[arg(long, default_value_t = DEFAULT_MAX_MONTHS)]
    max_months: u32,

    /// Fail instead of truncating when a horizon exceeds --max-months
    #[arg(long)]
    reject_overflow: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Also print the month-by-month projection for this retirement age
    #[arg(long, value_name = "AGE")]
    trace: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = match &args.policy_dir {
        Some(dir) => PolicyTable::from_csv_path(dir)
            .with_context(|| format!("loading policy tables from {}", dir.display()))?,
        None => PolicyTable::reference(),
    };

    let profile = load_profile(&args.profile)
        .with_context(|| format!("reading profile {}", args.profile.display()))?;

    let config = CalculatorConfig {
        simulation: SimulationConfig {
            max_months: args.max_months,
            horizon_overflow: if args.reject_overflow {
                HorizonOverflow::Reject
            } else {
                HorizonOverflow::Truncate
            },
            detailed_output: false,
        },
        payment_base_rule: None,
        as_of: args.as_of,
    };
    let calculator = PensionCalculator::new(table, config);

    let result = calculator.calculate(&profile).context("pension calculation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    if let Some(age) = args.trace {
        let outcome = calculator
            .trace(&profile, age)
            .with_context(|| format!("tracing retirement at {}", age))?;

        println!("\nProjection to age {} ({} months):", age, outcome.months_simulated);
        println!(
            "{:>5} {:>8} {:>12} {:>12} {:>12} {:>14} {:>8}",
            "Month", "Calendar", "Payment", "Account+", "Interest", "Balance", "Years"
        );
        println!("{}", "-".repeat(78));
        for row in &outcome.rows {
            let calendar = row.calendar_month.map(|m| m.to_string()).unwrap_or_default();
            println!(
                "{:>5} {:>8} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>8.2}",
                row.month,
                calendar,
                row.personal_payment,
                row.account_contribution,
                row.interest_credited,
                row.account_balance,
                row.total_years,
            );
        }
        println!("{}", "-".repeat(78));
        println!("Interest credited: {:.2}", outcome.total_interest());
        println!("Contributing months: {}", outcome.contributing_months());
        if outcome.truncated {
            println!("(truncated at {} months)", outcome.months_simulated);
        }
    }

    Ok(())
}

fn print_report(result: &CalculationResult) {
    println!("Pension Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!(
        "{:>4} {:>12} {:>10} {:>10} {:>10} {:>10} {:>14} {:>6} {:>4}",
        "Age",
        "Monthly",
        "Pooled",
        "Account",
        "Paid(10k)",
        "BreakEven",
        "AccountAtRet",
        "Years",
        "N"
    );
    println!("{}", "-".repeat(90));

    for plan in &result.plans {
        let marker = if plan.recommended { " *" } else { "" };
        println!(
            "{:>4} {:>12.2} {:>10.2} {:>10.2} {:>10.2} {:>10} {:>14.2} {:>6.1} {:>4}{}",
            plan.age,
            plan.monthly_pension,
            plan.base_pension,
            plan.account_pension,
            plan.total_payment,
            plan.break_even_months,
            plan.account_at_retire,
            plan.total_years,
            plan.payout_divisor,
            marker,
        );
    }

    println!("\nRecommended: {}", result.best_plan.name);
    println!("  {}", result.best_plan.summary);

    match &result.advantages {
        Some(adv) => {
            println!("\nCompared with {}:", result.plans[0].name);
            println!(
                "  Pension increase:     {:.2} ({:.2}%)",
                adv.pension_increase, adv.pension_increase_percent
            );
            println!(
                "  Break-even change:    {} months ({:.2}%)",
                adv.break_even_improve, adv.break_even_improve_percent
            );
            println!(
                "  Payment change:       {:.2} x10k ({:.2}%)",
                adv.cost_decrease, adv.cost_decrease_percent
            );
            println!(
                "  Account increase:     {:.2} ({:.2}%)",
                adv.account_increase, adv.account_increase_percent
            );
            println!("  Score:                {:.1} / 100", adv.total_score);
        }
        None => println!("\nThe baseline plan is already the best option."),
    }
}
