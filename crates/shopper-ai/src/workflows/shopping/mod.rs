//! Shopping deliberation workflow: goal decomposition and research contracts,
//! the budget-constrained selection engine, and the report renderer.

pub mod deliberation;
pub mod domain;
pub mod goal;
mod pipeline;
pub mod report;
pub mod research;

pub use deliberation::SelectionEngine;
pub use domain::{
    CatalogError, CategoryCatalog, CategoryEntry, ConstraintSet, ProductCandidate, SelectedItem,
    SelectedItemView, SelectionResult,
};
pub use goal::{
    CategoryRequest, GoalAnalysisError, GoalAnalyzer, GoalPlan, PreferenceLexicon,
    StaticGoalAnalyzer,
};
pub use pipeline::{PipelineError, ShoppingPipeline, ShoppingPlanOutcome};
pub use report::render_report;
pub use research::{CatalogResearcher, MockResearcher, ResearchError, Researcher};
