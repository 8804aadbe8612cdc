//! Budget-constrained greedy selection over a researched catalog.

mod ranking;

use super::domain::{
    CategoryCatalog, ConstraintSet, ProductCandidate, SelectedItem, SelectionResult,
};
use tracing::debug;

/// Stateless selector choosing at most one candidate per category.
///
/// The walk is greedy in the catalog's category order: once a category's pick
/// is made it is never revisited to make room for a later category. A cheaper
/// global combination may exist; the trade is deliberate, favoring
/// explainable, deterministic results over combinatorial search. Identical
/// inputs (including candidate order) always produce identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionEngine;

impl SelectionEngine {
    /// Pure function of its inputs: no I/O, no shared state, never fails on
    /// well-formed input. Unselectable categories are simply absent from the
    /// result.
    pub fn select(&self, catalog: &CategoryCatalog, constraints: &ConstraintSet) -> SelectionResult {
        let mut selected_items: Vec<SelectedItem> = Vec::new();
        let mut notes: Vec<String> = Vec::new();
        let mut total_price: u64 = 0;

        for entry in catalog.iter() {
            if entry.candidates.is_empty() {
                continue;
            }

            let mut pool: Vec<&ProductCandidate> = entry.candidates.iter().collect();
            if constraints.prefer_sustainable {
                let sustainable: Vec<&ProductCandidate> = pool
                    .iter()
                    .copied()
                    .filter(|candidate| candidate.is_sustainable())
                    .collect();
                if sustainable.is_empty() {
                    // Sustainability is a soft preference, never a hard
                    // exclusion: fall back to the full list, unconditionally.
                    push_note(
                        &mut notes,
                        format!(
                            "no sustainable option available for category {}; used standard catalog",
                            entry.category
                        ),
                    );
                } else {
                    pool = sustainable;
                }
            }

            let ranked = ranking::rank(pool);
            let Some((candidate, price)) =
                first_affordable(&ranked, total_price, constraints.budget_limit)
            else {
                debug!(category = %entry.category, "no affordable candidate; category skipped");
                continue;
            };

            total_price += price;
            selected_items.push(SelectedItem {
                category: entry.category.clone(),
                candidate: candidate.clone(),
            });
        }

        let budget_adherence = constraints
            .budget_limit
            .map_or(true, |limit| total_price <= limit);

        SelectionResult {
            selected_items,
            total_price,
            budget_adherence,
            notes,
        }
    }
}

/// First ranked candidate whose price fits under the remaining budget.
/// Candidates without a price are never picked, under finite or unbounded
/// budgets alike, so no placeholder value can reach the summation.
fn first_affordable<'a>(
    ranked: &[&'a ProductCandidate],
    running_total: u64,
    budget_limit: Option<u64>,
) -> Option<(&'a ProductCandidate, u64)> {
    ranked.iter().find_map(|candidate| {
        let price = candidate.price?;
        if let Some(limit) = budget_limit {
            let projected = running_total.checked_add(price)?;
            if projected > limit {
                return None;
            }
        }
        Some((*candidate, price))
    })
}

/// Set semantics over note text, preserving first-occurrence order.
fn push_note(notes: &mut Vec<String>, note: String) {
    if !notes.contains(&note) {
        notes.push(note);
    }
}
