use std::sync::Arc;

use super::deliberation::SelectionEngine;
use super::domain::{ConstraintSet, SelectionResult};
use super::goal::{GoalAnalysisError, GoalAnalyzer, GoalPlan, PreferenceLexicon};
use super::report::render_report;
use super::research::{ResearchError, Researcher};
use tracing::{debug, info};

/// Orchestrates one shopping request end to end: decompose, research,
/// deliberate, report. Collaborator failures abort the run before the engine
/// is ever invoked; the engine itself cannot fail.
pub struct ShoppingPipeline<G, R> {
    analyzer: Arc<G>,
    researcher: Arc<R>,
    lexicon: PreferenceLexicon,
}

impl<G, R> ShoppingPipeline<G, R>
where
    G: GoalAnalyzer,
    R: Researcher,
{
    pub fn new(analyzer: Arc<G>, researcher: Arc<R>, lexicon: PreferenceLexicon) -> Self {
        Self {
            analyzer,
            researcher,
            lexicon,
        }
    }

    pub fn run(&self, request: &str) -> Result<ShoppingPlanOutcome, PipelineError> {
        let plan = self.analyzer.decompose(request)?;
        debug!(
            categories = plan.categories.len(),
            exclusions = plan.exclusions.len(),
            "goal decomposed"
        );

        let catalog = self.researcher.research(&plan)?;
        debug!(categories = catalog.len(), "research findings materialized");

        let constraints = ConstraintSet::from_plan(&plan, &self.lexicon);
        let selection = SelectionEngine.select(&catalog, &constraints);
        info!(
            items = selection.selected_items.len(),
            total_price = selection.total_price,
            budget_adherence = selection.budget_adherence,
            "deliberation complete"
        );

        let report = render_report(&selection, request);
        Ok(ShoppingPlanOutcome {
            plan,
            constraints,
            selection,
            report,
        })
    }
}

/// Everything one run produced, for callers that render richer responses
/// than the prose report alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingPlanOutcome {
    pub plan: GoalPlan,
    pub constraints: ConstraintSet,
    pub selection: SelectionResult,
    pub report: String,
}

/// Upstream collaborator failure; surfaced as a single terminal error for the
/// whole request.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    GoalAnalysis(#[from] GoalAnalysisError),
    #[error(transparent)]
    Research(#[from] ResearchError),
}
