//! Research boundary: the collaborator that materializes a candidate catalog
//! for the categories a goal plan asks for.

use super::domain::{CatalogError, CategoryCatalog, ProductCandidate, DEFAULT_CURRENCY};
use super::goal::{CategoryRequest, GoalPlan};

/// Failure signaled by the research collaborator. Fatal to the pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    #[error("research collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("invalid catalog from research: {0}")]
    Catalog(#[from] CatalogError),
}

/// Seam for the external research service (search engines, e-commerce APIs,
/// scrapers). Implementations must honor the plan's exclusions; the selection
/// engine never inspects them.
pub trait Researcher: Send + Sync {
    fn research(&self, plan: &GoalPlan) -> Result<CategoryCatalog, ResearchError>;
}

/// Deterministic synthetic researcher: two candidates per requested category,
/// prices derived from the category name so repeated runs are identical. The
/// first candidate carries an eco tag when the request's attributes ask for
/// sustainability.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockResearcher;

impl Researcher for MockResearcher {
    fn research(&self, plan: &GoalPlan) -> Result<CategoryCatalog, ResearchError> {
        let mut catalog = CategoryCatalog::new();
        for request in &plan.categories {
            if is_excluded(&request.category, &plan.exclusions) {
                continue;
            }
            catalog.push(request.category.clone(), mock_candidates(request))?;
        }
        catalog.validate()?;
        Ok(catalog)
    }
}

fn mock_candidates(request: &CategoryRequest) -> Vec<ProductCandidate> {
    let wants_sustainable = request
        .attributes
        .iter()
        .any(|attr| attr.to_lowercase().contains("sustain"));
    let display = display_name(&request.category);

    (1..=2u64)
        .map(|ordinal| {
            let suffix = if ordinal == 1 { "Alpha" } else { "Beta" };
            ProductCandidate {
                name: format!("Mock {display} {suffix}"),
                brand: Some(format!("MockBrand{ordinal}")),
                price: Some((100 + ordinal * 10) * (request.category.len() as u64 * 10)),
                currency: DEFAULT_CURRENCY.to_string(),
                rating: Some(4.0 + ordinal as f32 * 0.2),
                sustainability: (wants_sustainable && ordinal == 1)
                    .then(|| "eco-friendly materials".to_string()),
                category: Some(request.category.clone()),
            }
        })
        .collect()
}

fn display_name(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Researcher over an already-materialized catalog (API payloads, CSV
/// imports). Validates the catalog at the boundary and drops excluded
/// categories before handing it to the engine.
#[derive(Debug, Clone)]
pub struct CatalogResearcher {
    catalog: CategoryCatalog,
}

impl CatalogResearcher {
    pub fn new(catalog: CategoryCatalog) -> Self {
        Self { catalog }
    }
}

impl Researcher for CatalogResearcher {
    fn research(&self, plan: &GoalPlan) -> Result<CategoryCatalog, ResearchError> {
        self.catalog.validate()?;
        let mut catalog = self.catalog.clone();
        catalog.retain(|entry| !is_excluded(&entry.category, &plan.exclusions));
        Ok(catalog)
    }
}

/// Case-insensitive exclusion check; underscores and spaces are
/// interchangeable so "hiking socks" excludes the `hiking_socks` category.
fn is_excluded(category: &str, exclusions: &[String]) -> bool {
    let canonical = canonicalize(category);
    exclusions
        .iter()
        .any(|exclusion| canonicalize(exclusion) == canonical)
}

fn canonicalize(term: &str) -> String {
    term.trim().to_lowercase().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::shopping::goal::GoalPlan;

    fn request(category: &str, attributes: &[&str]) -> CategoryRequest {
        CategoryRequest {
            category: category.to_string(),
            attributes: attributes.iter().map(|attr| attr.to_string()).collect(),
            optional: false,
            notes: None,
        }
    }

    fn plan(categories: Vec<CategoryRequest>, exclusions: Vec<&str>) -> GoalPlan {
        GoalPlan {
            budget_total: None,
            currency: None,
            preferences: Vec::new(),
            exclusions: exclusions.into_iter().map(str::to_string).collect(),
            categories,
        }
    }

    #[test]
    fn mock_research_is_deterministic() {
        let plan = plan(vec![request("hiking_boots", &["sustainable"])], Vec::new());
        let first = MockResearcher.research(&plan).expect("catalog");
        let second = MockResearcher.research(&plan).expect("catalog");
        assert_eq!(first, second);

        let boots = first.get("hiking_boots").expect("category present");
        assert_eq!(boots.len(), 2);
        assert_eq!(boots[0].name, "Mock Hiking Boots Alpha");
        assert!(boots[0].is_sustainable());
        assert!(!boots[1].is_sustainable());
    }

    #[test]
    fn mock_research_skips_excluded_categories() {
        let plan = plan(
            vec![request("hiking_socks", &[]), request("jacket", &[])],
            vec!["hiking socks"],
        );
        let catalog = MockResearcher.research(&plan).expect("catalog");
        assert!(catalog.get("hiking_socks").is_none());
        assert!(catalog.get("jacket").is_some());
    }

    #[test]
    fn catalog_researcher_drops_exclusions_and_keeps_order() {
        let candidates = |name: &str| {
            vec![ProductCandidate {
                name: name.to_string(),
                brand: None,
                price: Some(100),
                currency: DEFAULT_CURRENCY.to_string(),
                rating: None,
                sustainability: None,
                category: None,
            }]
        };
        let catalog = CategoryCatalog::from_entries([
            ("jacket".to_string(), candidates("Shell")),
            ("hiking_socks".to_string(), candidates("Wool")),
            ("backpack".to_string(), candidates("Pack")),
        ])
        .expect("catalog");

        let plan = plan(Vec::new(), vec!["Hiking Socks"]);
        let filtered = CatalogResearcher::new(catalog).research(&plan).expect("ok");
        let order: Vec<&str> = filtered.iter().map(|entry| entry.category.as_str()).collect();
        assert_eq!(order, vec!["jacket", "backpack"]);
    }

    #[test]
    fn catalog_researcher_rejects_invalid_ratings() {
        let catalog = CategoryCatalog::from_entries([(
            "boots".to_string(),
            vec![ProductCandidate {
                name: "Bad".to_string(),
                brand: None,
                price: Some(100),
                currency: DEFAULT_CURRENCY.to_string(),
                rating: Some(9.0),
                sustainability: None,
                category: None,
            }],
        )])
        .expect("catalog");

        let err = CatalogResearcher::new(catalog)
            .research(&plan(Vec::new(), Vec::new()))
            .expect_err("invalid rating");
        assert!(matches!(err, ResearchError::Catalog(_)));
    }
}
