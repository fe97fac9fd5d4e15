//! Plain-text rendering.

use std::fmt::Write;

use crate::models::{Assignment, Category, DomainModel};

/// Renders one block per slot: the label with its total topic count,
/// then one line per list (`-` when the list is empty).
///
/// ```text
/// Monday (total topics: 6)
///   Biochem:      Transcription, RNA-localisation, Alternative-Splicing
///   Development:  Santos+Scarpa, StJohnston
///   M1:           Farr
/// ```
pub fn render_text(assignment: &Assignment, model: &DomainModel) -> String {
    let width = Category::ALL
        .iter()
        .map(|&c| model.list_name(c).len())
        .max()
        .unwrap_or(0)
        + 2;

    let mut out = String::new();
    for (i, slot) in assignment.slots.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "{} (total topics: {})",
            slot.slot.label,
            slot.total()
        );
        for category in Category::ALL {
            let topics = slot.topics(category);
            let joined = if topics.is_empty() {
                "-".to_string()
            } else {
                topics.join(", ")
            };
            let heading = format!("{}:", model.list_name(category));
            let _ = writeln!(out, "  {heading:<width$} {joined}");
        }
    }
    out
}
