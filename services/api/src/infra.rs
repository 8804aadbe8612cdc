use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use shopper_ai::workflows::shopping::{
    GoalPlan, PipelineError, PreferenceLexicon, Researcher, ShoppingPipeline, ShoppingPlanOutcome,
    StaticGoalAnalyzer,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Collaborator wiring shared by the plan endpoint and CLI commands; kept
/// separate from [`AppState`] so handler tests need no metrics recorder.
#[derive(Clone)]
pub(crate) struct PlannerState {
    pub(crate) lexicon: Arc<PreferenceLexicon>,
}

impl Default for PlannerState {
    fn default() -> Self {
        Self {
            lexicon: Arc::new(PreferenceLexicon::default()),
        }
    }
}

/// Run one shopping request through a freshly wired pipeline. Each request is
/// isolated; nothing is cached or shared between runs.
pub(crate) fn execute_plan<R: Researcher>(
    plan: GoalPlan,
    researcher: R,
    lexicon: &PreferenceLexicon,
    goal: &str,
) -> Result<ShoppingPlanOutcome, PipelineError> {
    let pipeline = ShoppingPipeline::new(
        Arc::new(StaticGoalAnalyzer::new(plan)),
        Arc::new(researcher),
        lexicon.clone(),
    );
    pipeline.run(goal)
}
