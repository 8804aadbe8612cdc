//! Integration specifications for the budget-constrained selection engine:
//! the concrete catalog scenarios plus the engine's quantified invariants.

mod common {
    use shopper_ai::workflows::shopping::{CategoryCatalog, ProductCandidate};

    pub(super) fn candidate(
        name: &str,
        price: Option<u64>,
        rating: Option<f32>,
        sustainability: Option<&str>,
    ) -> ProductCandidate {
        ProductCandidate {
            name: name.to_string(),
            brand: None,
            price,
            currency: "INR".to_string(),
            rating,
            sustainability: sustainability.map(str::to_string),
            category: None,
        }
    }

    pub(super) fn boots() -> Vec<ProductCandidate> {
        vec![
            candidate("Boot A", Some(15_000), Some(4.7), Some("B-Corp")),
            candidate("Boot B", Some(12_000), Some(4.5), Some("Recycled materials")),
            candidate("Boot C", Some(18_000), Some(4.8), None),
        ]
    }

    pub(super) fn catalog(
        entries: Vec<(&str, Vec<ProductCandidate>)>,
    ) -> CategoryCatalog {
        CategoryCatalog::from_entries(
            entries
                .into_iter()
                .map(|(category, candidates)| (category.to_string(), candidates)),
        )
        .expect("unique categories")
    }
}

use common::{boots, candidate, catalog};
use shopper_ai::workflows::shopping::{ConstraintSet, SelectionEngine};

fn constraints(budget: Option<u64>, prefer_sustainable: bool) -> ConstraintSet {
    ConstraintSet {
        budget_limit: budget,
        prefer_sustainable,
        exclusions: Vec::new(),
    }
}

#[test]
fn sustainable_preference_picks_highest_rated_sustainable_boot() {
    let catalog = catalog(vec![("boots", boots())]);
    let result = SelectionEngine.select(&catalog, &constraints(Some(40_000), true));

    assert_eq!(result.selected_items.len(), 1);
    assert_eq!(result.selected_items[0].candidate.name, "Boot A");
    assert_eq!(result.total_price, 15_000);
    assert!(result.budget_adherence);
    assert!(result.notes.is_empty());
}

#[test]
fn unaffordable_category_is_skipped_with_adherent_zero_total() {
    let catalog = catalog(vec![("boots", boots())]);
    let result = SelectionEngine.select(&catalog, &constraints(Some(10_000), true));

    assert!(result.selected_items.is_empty());
    assert_eq!(result.total_price, 0);
    assert!(result.budget_adherence);
}

#[test]
fn later_category_is_skipped_when_it_would_breach_the_budget() {
    let catalog = catalog(vec![
        ("boots", boots()),
        (
            "jacket",
            vec![candidate("Jacket Alpha", Some(22_000), Some(4.6), Some("Organic Cotton"))],
        ),
    ]);
    let result = SelectionEngine.select(&catalog, &constraints(Some(30_000), true));

    assert_eq!(result.selected_items.len(), 1);
    assert_eq!(result.selected_items[0].category, "boots");
    assert_eq!(result.total_price, 15_000);
    assert!(result.budget_adherence);
}

#[test]
fn without_preference_the_top_rated_candidate_wins() {
    let catalog = catalog(vec![("boots", boots())]);
    let result = SelectionEngine.select(&catalog, &constraints(None, false));

    assert_eq!(result.selected_items[0].candidate.name, "Boot C");
    assert_eq!(result.total_price, 18_000);
    assert!(result.budget_adherence);
}

#[test]
fn empty_catalog_selects_nothing_and_adheres() {
    let result = SelectionEngine.select(&catalog(Vec::new()), &constraints(Some(5_000), true));
    assert!(result.selected_items.is_empty());
    assert_eq!(result.total_price, 0);
    assert!(result.budget_adherence);
    assert!(result.notes.is_empty());
}

#[test]
fn zero_budget_with_no_free_candidates_selects_nothing_and_adheres() {
    let catalog = catalog(vec![("boots", boots())]);
    let result = SelectionEngine.select(&catalog, &constraints(Some(0), false));
    assert!(result.selected_items.is_empty());
    assert_eq!(result.total_price, 0);
    // 0 <= 0: the iff rule makes the vacuous case adherent.
    assert!(result.budget_adherence);
}

#[test]
fn fallback_note_appears_once_and_full_list_stays_eligible() {
    let catalog = catalog(vec![(
        "jacket",
        vec![
            candidate("Jacket Beta", Some(20_000), Some(4.9), None),
            candidate("Jacket Gamma", Some(18_000), Some(4.1), None),
        ],
    )]);
    let result = SelectionEngine.select(&catalog, &constraints(Some(40_000), true));

    assert_eq!(
        result.notes,
        vec!["no sustainable option available for category jacket; used standard catalog"]
    );
    assert_eq!(result.selected_items[0].candidate.name, "Jacket Beta");
}

#[test]
fn each_category_appears_at_most_once_in_catalog_order() {
    let catalog = catalog(vec![
        ("jacket", boots()),
        ("boots", boots()),
        ("backpack", Vec::new()),
    ]);
    let result = SelectionEngine.select(&catalog, &constraints(None, false));

    let categories: Vec<&str> = result
        .selected_items
        .iter()
        .map(|item| item.category.as_str())
        .collect();
    assert_eq!(categories, vec!["jacket", "boots"]);
}

#[test]
fn total_price_is_the_exact_sum_of_selected_items() {
    let catalog = catalog(vec![
        ("boots", boots()),
        (
            "jacket",
            vec![candidate("Jacket Alpha", Some(22_000), Some(4.6), Some("Organic Cotton"))],
        ),
    ]);
    let result = SelectionEngine.select(&catalog, &constraints(Some(40_000), true));

    let sum: u64 = result
        .selected_items
        .iter()
        .map(|item| item.candidate.price.expect("selected items carry prices"))
        .sum();
    assert_eq!(result.total_price, sum);
    assert_eq!(result.budget_adherence, result.total_price <= 40_000);
}

#[test]
fn identical_inputs_yield_byte_identical_results() {
    let catalog = catalog(vec![
        ("boots", boots()),
        (
            "jacket",
            vec![
                candidate("Jacket Alpha", Some(22_000), Some(4.6), Some("Organic Cotton")),
                candidate("Jacket Beta", Some(20_000), Some(4.9), None),
            ],
        ),
    ]);
    let constraints = constraints(Some(40_000), true);

    let first = SelectionEngine.select(&catalog, &constraints);
    let second = SelectionEngine.select(&catalog, &constraints);

    let first_bytes = serde_json::to_string(&first).expect("serializes");
    let second_bytes = serde_json::to_string(&second).expect("serializes");
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn removing_a_candidate_never_improves_the_choice() {
    let full = catalog(vec![("boots", boots())]);
    let constraints = constraints(Some(40_000), false);
    let baseline = SelectionEngine.select(&full, &constraints);
    let chosen = &baseline.selected_items[0].candidate;
    let chosen_rating = chosen.rating.expect("rated");

    for removed in 0..boots().len() {
        let mut remaining = boots();
        let dropped = remaining.remove(removed);
        let reduced = common::catalog(vec![("boots", remaining)]);
        let result = SelectionEngine.select(&reduced, &constraints);

        if dropped.name != chosen.name {
            // Removing a non-chosen candidate leaves the choice untouched.
            assert_eq!(result.selected_items[0].candidate.name, chosen.name);
        } else if let Some(item) = result.selected_items.first() {
            // The replacement sits later in the ranking: never a higher rating.
            assert!(item.candidate.rating.expect("rated") <= chosen_rating);
        }
    }
}
