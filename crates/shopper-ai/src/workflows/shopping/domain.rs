use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Currency assumed when a candidate record carries none. Amounts are exact
/// unsigned integers in whole units of the run currency; summation never
/// touches floating point.
pub const DEFAULT_CURRENCY: &str = "INR";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Normalized product entry produced by the research stage.
///
/// Wire records may carry extra fields; they are ignored rather than
/// rejected. Names are not guaranteed unique across categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCandidate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Price in whole currency units. A candidate without a price is never
    /// selected; "free" requires an explicit price of 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Quality score in `[0, 5]`. Absent ranks as 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Eco/ethical certification text. Absence means not sustainable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability: Option<String>,
    /// Redundant with the catalog key, carried for traceability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductCandidate {
    pub fn is_sustainable(&self) -> bool {
        self.sustainability
            .as_deref()
            .map(|tag| !tag.trim().is_empty())
            .unwrap_or(false)
    }

    fn validate(&self, category: &str) -> Result<(), CatalogError> {
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(CatalogError::RatingOutOfRange {
                    category: category.to_string(),
                    name: self.name.clone(),
                    rating,
                });
            }
        }
        Ok(())
    }
}

/// Malformed catalog data caught at the research boundary, before the
/// selection engine ever sees it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate category '{0}' in catalog")]
    DuplicateCategory(String),
    #[error("rating {rating} for '{name}' in category '{category}' is outside [0, 5]")]
    RatingOutOfRange {
        category: String,
        name: String,
        rating: f32,
    },
}

/// One catalog slot: a category name and its candidates in research order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEntry {
    pub category: String,
    pub candidates: Vec<ProductCandidate>,
}

/// Mapping from category name to an ordered candidate list.
///
/// Iteration order is exactly the order categories were supplied (or appeared
/// in the wire document); the engine must not assume pre-sorting and the
/// selection's category order follows this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCatalog {
    entries: Vec<CategoryEntry>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, Vec<ProductCandidate>)>,
        S: Into<String>,
    {
        let mut catalog = Self::new();
        for (category, candidates) in entries {
            catalog.push(category.into(), candidates)?;
        }
        Ok(catalog)
    }

    /// Append a category, rejecting duplicates (category names are unique keys).
    pub fn push(
        &mut self,
        category: String,
        candidates: Vec<ProductCandidate>,
    ) -> Result<(), CatalogError> {
        if self.entries.iter().any(|entry| entry.category == category) {
            return Err(CatalogError::DuplicateCategory(category));
        }
        self.entries.push(CategoryEntry {
            category,
            candidates,
        });
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<&[ProductCandidate]> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.candidates.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.iter()
    }

    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&CategoryEntry) -> bool,
    {
        self.entries.retain(predicate);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Boundary validation for §3 invariants (rating range; prices are
    /// non-negative by construction).
    pub fn validate(&self) -> Result<(), CatalogError> {
        for entry in &self.entries {
            for candidate in &entry.candidates {
                candidate.validate(&entry.category)?;
            }
        }
        Ok(())
    }
}

impl Serialize for CategoryCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.candidates)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = CategoryCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to candidate list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut catalog = CategoryCatalog::new();
                while let Some((category, candidates)) =
                    access.next_entry::<String, Vec<ProductCandidate>>()?
                {
                    catalog
                        .push(category, candidates)
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Hard and soft constraints distilled from goal decomposition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// Ceiling on the aggregate selected price. `None` means unbounded; a
    /// present zero is a valid hard constraint.
    #[serde(default)]
    pub budget_limit: Option<u64>,
    /// Soft preference: narrows each category to sustainable candidates, with
    /// an unconditional fallback to the full list when none qualify.
    #[serde(default)]
    pub prefer_sustainable: bool,
    /// Recorded but not enforced by the engine; applied at the research
    /// boundary.
    #[serde(default)]
    pub exclusions: Vec<String>,
}

/// One chosen `(category, candidate)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedItem {
    pub category: String,
    pub candidate: ProductCandidate,
}

impl SelectedItem {
    pub fn to_view(&self) -> SelectedItemView {
        SelectedItemView {
            category: self.category.clone(),
            name: self.candidate.name.clone(),
            brand: self.candidate.brand.clone(),
            price: self.candidate.price,
            currency: self.candidate.currency.clone(),
            rating: self.candidate.rating,
            sustainability: self.candidate.sustainability.clone(),
        }
    }
}

/// Flattened item representation for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedItemView {
    pub category: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sustainability: Option<String>,
}

/// Outcome of one deliberation run: at most one item per catalog category, in
/// catalog order, plus the aggregate cost and fallback notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub selected_items: Vec<SelectedItem>,
    pub total_price: u64,
    /// True iff `total_price <= budget_limit`, vacuously true with no limit.
    pub budget_adherence: bool,
    /// Human-readable fallback decisions, deduplicated in first-occurrence order.
    pub notes: Vec<String>,
}

impl SelectionResult {
    pub fn item_views(&self) -> Vec<SelectedItemView> {
        self.selected_items.iter().map(SelectedItem::to_view).collect()
    }

    /// Display currency for aggregate lines: the first selected item's
    /// currency, falling back to the default when nothing was selected.
    pub fn display_currency(&self) -> &str {
        self.selected_items
            .first()
            .map(|item| item.candidate.currency.as_str())
            .unwrap_or(DEFAULT_CURRENCY)
    }
}
