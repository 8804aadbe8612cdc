//! Goal decomposition boundary: the structured plan an external
//! language-model collaborator produces from a free-text request, and the
//! constraint distillation applied to it.

use super::domain::ConstraintSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Built-in keyword set for the sustainability signal. Matching is a
/// case-insensitive substring test against each free-text preference.
pub const DEFAULT_SUSTAINABILITY_TERMS: &[&str] = &[
    "sustainable",
    "sustainably",
    "sustainability",
    "eco-friendly",
    "eco friendly",
    "ethical",
    "recycled",
    "organic",
];

/// Structured decomposition of a shopping request. Extra wire fields are
/// ignored; every field has a lenient default so partial decompositions
/// still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    /// Raw budget as supplied upstream; normalized by
    /// [`ConstraintSet::from_plan`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Free-text preference phrases, scanned for the sustainability signal.
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Categories or items the user already has; dropped at the research
    /// boundary, never inspected by the engine.
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub categories: Vec<CategoryRequest>,
}

impl GoalPlan {
    /// Built-in demo decomposition: essential gear for a multi-day Himalayan
    /// trek with a 40,000 budget, sustainable-brand preference, and socks
    /// already owned.
    pub fn standard_trek() -> Self {
        let category = |name: &str, attributes: &[&str]| CategoryRequest {
            category: name.to_string(),
            attributes: attributes.iter().map(|attr| attr.to_string()).collect(),
            optional: false,
            notes: None,
        };

        Self {
            budget_total: Some(40_000.0),
            currency: Some("INR".to_string()),
            preferences: vec!["prefer sustainable brands".to_string()],
            exclusions: vec!["hiking socks".to_string()],
            categories: vec![
                category("hiking_boots", &["Himalayan terrain appropriate", "sustainable"]),
                category("jacket", &["waterproof", "windproof"]),
                category("backpack", &["40-50L capacity"]),
                category("accessories", &["water bottle", "headlamp"]),
            ],
        }
    }
}

/// One category the research stage should source candidates for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub category: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Failure signaled by the decomposition collaborator. Fatal to the pipeline
/// run; the engine is never invoked with partial input.
#[derive(Debug, thiserror::Error)]
pub enum GoalAnalysisError {
    #[error("empty shopping request")]
    EmptyRequest,
    #[error("goal decomposition service unavailable: {0}")]
    Unavailable(String),
}

/// Seam for the external decomposition service (in production an LLM call;
/// in this repository a deterministic stand-in).
pub trait GoalAnalyzer: Send + Sync {
    fn decompose(&self, request: &str) -> Result<GoalPlan, GoalAnalysisError>;
}

/// Analyzer returning a fixed plan: either a caller-supplied decomposition or
/// the built-in demo plan.
pub struct StaticGoalAnalyzer {
    plan: GoalPlan,
}

impl StaticGoalAnalyzer {
    pub fn new(plan: GoalPlan) -> Self {
        Self { plan }
    }
}

impl GoalAnalyzer for StaticGoalAnalyzer {
    fn decompose(&self, request: &str) -> Result<GoalPlan, GoalAnalysisError> {
        if request.trim().is_empty() {
            return Err(GoalAnalysisError::EmptyRequest);
        }
        Ok(self.plan.clone())
    }
}

/// Configurable keyword matcher for preference signals. Terms are stored
/// lowercased; matching is substring, case-insensitive.
#[derive(Debug, Clone)]
pub struct PreferenceLexicon {
    terms: Vec<String>,
}

impl Default for PreferenceLexicon {
    fn default() -> Self {
        Self::new(
            DEFAULT_SUSTAINABILITY_TERMS
                .iter()
                .map(|term| term.to_string())
                .collect(),
        )
    }
}

impl PreferenceLexicon {
    pub fn new(terms: Vec<String>) -> Self {
        let terms: Vec<String> = terms
            .into_iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        Self { terms }
    }

    pub fn matches(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.terms.iter().any(|term| lowered.contains(term))
    }

    pub fn detects_sustainability(&self, preferences: &[String]) -> bool {
        preferences.iter().any(|phrase| self.matches(phrase))
    }
}

impl ConstraintSet {
    /// Distill a decomposed plan into engine constraints: normalize the
    /// budget, detect the sustainability preference, and carry exclusions
    /// through untouched.
    pub fn from_plan(plan: &GoalPlan, lexicon: &PreferenceLexicon) -> Self {
        Self {
            budget_limit: normalize_budget(plan.budget_total),
            prefer_sustainable: lexicon.detects_sustainability(&plan.preferences),
            exclusions: plan.exclusions.clone(),
        }
    }
}

/// A present but malformed budget (negative, NaN, infinite) is a
/// decoration-level parsing issue: log it and treat the budget as absent
/// rather than abort the run. Fractional budgets round to the nearest whole
/// unit.
fn normalize_budget(raw: Option<f64>) -> Option<u64> {
    let value = raw?;
    if !value.is_finite() || value < 0.0 {
        warn!(budget = value, "malformed budget limit; treating as unbounded");
        return None;
    }
    Some(value.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with_budget(budget: Option<f64>) -> GoalPlan {
        GoalPlan {
            budget_total: budget,
            currency: None,
            preferences: Vec::new(),
            exclusions: Vec::new(),
            categories: Vec::new(),
        }
    }

    #[test]
    fn default_lexicon_detects_sustainability_phrases() {
        let lexicon = PreferenceLexicon::default();
        assert!(lexicon.detects_sustainability(&["I prefer SUSTAINABLE brands".to_string()]));
        assert!(lexicon.detects_sustainability(&["only eco-friendly gear please".to_string()]));
        assert!(!lexicon.detects_sustainability(&["cheapest options".to_string()]));
        assert!(!lexicon.detects_sustainability(&[]));
    }

    #[test]
    fn custom_lexicon_replaces_builtin_terms() {
        let lexicon = PreferenceLexicon::new(vec!["fair trade".to_string()]);
        assert!(lexicon.matches("Fair Trade certified"));
        assert!(!lexicon.matches("sustainable brands"));
    }

    #[test]
    fn malformed_budget_becomes_unbounded() {
        let lexicon = PreferenceLexicon::default();
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let constraints = ConstraintSet::from_plan(&plan_with_budget(Some(bad)), &lexicon);
            assert_eq!(constraints.budget_limit, None);
        }
    }

    #[test]
    fn zero_budget_is_a_hard_constraint_not_unbounded() {
        let lexicon = PreferenceLexicon::default();
        let constraints = ConstraintSet::from_plan(&plan_with_budget(Some(0.0)), &lexicon);
        assert_eq!(constraints.budget_limit, Some(0));
    }

    #[test]
    fn fractional_budget_rounds_to_whole_units() {
        let lexicon = PreferenceLexicon::default();
        let constraints = ConstraintSet::from_plan(&plan_with_budget(Some(39_999.6)), &lexicon);
        assert_eq!(constraints.budget_limit, Some(40_000));
    }

    #[test]
    fn static_analyzer_rejects_blank_requests() {
        let analyzer = StaticGoalAnalyzer::new(GoalPlan::standard_trek());
        assert!(matches!(
            analyzer.decompose("   "),
            Err(GoalAnalysisError::EmptyRequest)
        ));
        let plan = analyzer.decompose("trek gear please").expect("plan");
        assert_eq!(plan.categories.len(), 4);
    }

    #[test]
    fn plan_parses_from_partial_wire_document() {
        let plan: GoalPlan = serde_json::from_str(
            r#"{"categories": [{"category": "tent", "llm_confidence": 0.92}]}"#,
        )
        .expect("lenient parse");
        assert_eq!(plan.budget_total, None);
        assert_eq!(plan.categories[0].category, "tent");
        assert!(!plan.categories[0].optional);
    }
}
