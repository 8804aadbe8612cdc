use crate::infra::execute_plan;
use clap::Args;
use std::path::PathBuf;
use shopper_ai::config::AppConfig;
use shopper_ai::error::AppError;
use shopper_ai::workflows::catalog::CatalogCsvImporter;
use shopper_ai::workflows::shopping::{
    CatalogResearcher, GoalPlan, MockResearcher, ShoppingPlanOutcome,
};

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Free-text shopping request
    pub(crate) goal: String,
    /// Optional CSV catalog export; the mock researcher is used when absent
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Override the demo plan's budget ceiling
    #[arg(long)]
    pub(crate) budget: Option<f64>,
    /// Drop the demo plan's sustainable-brand preference
    #[arg(long)]
    pub(crate) no_sustainable: bool,
    /// Additional category exclusions (repeatable)
    #[arg(long = "exclude")]
    pub(crate) exclusions: Vec<String>,
    /// Print the full selection breakdown alongside the report
    #[arg(long)]
    pub(crate) verbose: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full selection breakdown alongside the report
    #[arg(long)]
    pub(crate) verbose: bool,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        goal,
        catalog_csv,
        budget,
        no_sustainable,
        exclusions,
        verbose,
    } = args;

    let mut plan = GoalPlan::standard_trek();
    if let Some(budget) = budget {
        plan.budget_total = Some(budget);
    }
    if no_sustainable {
        plan.preferences.clear();
    }
    plan.exclusions.extend(exclusions);

    let config = AppConfig::load()?;
    let lexicon = config.preferences.lexicon();

    let outcome = match catalog_csv {
        Some(path) => {
            let catalog = CatalogCsvImporter::from_path(path)?;
            execute_plan(plan, CatalogResearcher::new(catalog), &lexicon, &goal)
                .map_err(AppError::from)?
        }
        None => execute_plan(plan, MockResearcher, &lexicon, &goal).map_err(AppError::from)?,
    };

    print_outcome(&outcome, verbose);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Agentic shopping deliberation demo");
    println!("Request: essential gear for a 5-day Himalayan trek near Manali");

    let config = AppConfig::load()?;
    let lexicon = config.preferences.lexicon();
    let outcome = execute_plan(
        GoalPlan::standard_trek(),
        MockResearcher,
        &lexicon,
        "Essential gear for a 5-day Himalayan trek near Manali, sustainable brands preferred.",
    )
    .map_err(AppError::from)?;

    print_outcome(&outcome, args.verbose);
    Ok(())
}

fn print_outcome(outcome: &ShoppingPlanOutcome, verbose: bool) {
    if verbose {
        let constraints = &outcome.constraints;
        println!("\nConstraints:");
        match constraints.budget_limit {
            Some(limit) => println!("- budget ceiling: {limit}"),
            None => println!("- budget ceiling: unbounded"),
        }
        println!("- prefer sustainable: {}", constraints.prefer_sustainable);
        if !constraints.exclusions.is_empty() {
            println!("- exclusions: {}", constraints.exclusions.join(", "));
        }

        println!("\nSelection:");
        for item in &outcome.selection.selected_items {
            let candidate = &item.candidate;
            let price = candidate
                .price
                .map(|price| price.to_string())
                .unwrap_or_else(|| "n/a".to_string());
            println!(
                "- {} -> {} ({} {})",
                item.category, candidate.name, candidate.currency, price
            );
        }
        println!(
            "Total: {} | within budget: {}",
            outcome.selection.total_price, outcome.selection.budget_adherence
        );
    }

    println!("\n{}", outcome.report);
}
