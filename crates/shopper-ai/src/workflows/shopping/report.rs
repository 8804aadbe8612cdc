//! Report rendering: turns a selection into prose. Pure formatting, no
//! decision logic.

use super::domain::{SelectedItem, SelectionResult};

const REQUEST_PREVIEW_CHARS: usize = 50;
const CALL_TO_ACTION: &str = "[View Cart] or [Request Alternatives]";

/// Render the user-facing report: header restating the (truncated) request,
/// cost summary keyed on budget adherence, one line per selected item, the
/// deduplicated fallback notes, and a fixed closing call to action.
pub fn render_report(selection: &SelectionResult, original_request: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Report for your request: \"{}\"",
        preview(original_request)
    ));

    let currency = selection.display_currency();
    if selection.budget_adherence {
        lines.push(format!(
            "I've assembled a gear list for you with a total cost of {currency} {}.",
            selection.total_price
        ));
    } else {
        lines.push(format!(
            "I've assembled a gear list with a total cost of {currency} {}. This is over the specified budget.",
            selection.total_price
        ));
    }

    if selection.selected_items.is_empty() {
        lines.push("I could not find suitable items based on the criteria.".to_string());
    } else {
        lines.push("Here's what I recommend:".to_string());
        for item in &selection.selected_items {
            lines.push(item_line(item));
        }
    }

    for note in &selection.notes {
        lines.push(format!("Note: {note}"));
    }

    lines.push(CALL_TO_ACTION.to_string());
    lines.join("\n")
}

fn item_line(item: &SelectedItem) -> String {
    let candidate = &item.candidate;
    let mut line = format!("- {}: {}", display_category(&item.category), candidate.name);
    if let Some(brand) = &candidate.brand {
        line.push_str(&format!(" by {brand}"));
    }

    let price = match candidate.price {
        Some(price) => format!("{} {price}", candidate.currency),
        None => "no price data".to_string(),
    };
    let rating = match candidate.rating {
        Some(rating) => format!("{rating:.1}"),
        None => "N/A".to_string(),
    };
    line.push_str(&format!(" (Price: {price}, Rating: {rating})"));

    if let Some(tag) = candidate.sustainability.as_deref().filter(|tag| !tag.trim().is_empty()) {
        line.push_str(&format!(" [Sustainable: {tag}]"));
    }
    line
}

/// First 50 characters of the request, char-boundary safe, with an ellipsis
/// when truncated.
fn preview(request: &str) -> String {
    let mut preview: String = request.chars().take(REQUEST_PREVIEW_CHARS).collect();
    if request.chars().count() > REQUEST_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

fn display_category(category: &str) -> String {
    category
        .split(|c: char| c == '_' || c == ' ')
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
