//! SVG calendar grid.
//!
//! Rows are slots, columns are the two free lists followed by the primary
//! list. Each cell is filled with its list's color and lists one topic per
//! line. The font shrinks (down to 8px) until the busiest cell fits.

use std::path::Path;

use svg::node::element::{Rectangle, Text};
use svg::Document;

use crate::models::{Assignment, Category, DomainModel};

const INNER_WIDTH: f64 = 1200.0;
const INNER_HEIGHT: f64 = 900.0;
const MARGIN: f64 = 160.0;
const PADDING: f64 = 10.0;
const HEADER_FONT: f64 = 22.0;
const MAX_FONT: f64 = 18.0;
const MIN_FONT: f64 = 8.0;
const LINE_SPACING: f64 = 4.0;

fn fill(category: Category) -> &'static str {
    match category {
        Category::A => "#FFCC99",
        Category::B => "#99CCFF",
        Category::Primary => "#CCFF99",
    }
}

/// Largest font size (capped) at which `lines` lines fit in `height`.
fn fit_font(lines: usize, height: f64) -> f64 {
    if lines == 0 {
        return MAX_FONT;
    }
    let per_line = height / lines as f64 - LINE_SPACING;
    per_line.clamp(MIN_FONT, MAX_FONT)
}

/// Builds the calendar grid document.
pub fn render_svg(assignment: &Assignment, model: &DomainModel) -> Document {
    let rows = assignment.len().max(1);
    let cols = Category::ALL.len();
    let col_width = INNER_WIDTH / cols as f64;
    let row_height = INNER_HEIGHT / rows as f64;
    let width = INNER_WIDTH + 2.0 * MARGIN;
    let height = INNER_HEIGHT + 2.0 * MARGIN;

    let busiest = assignment
        .slots
        .iter()
        .flat_map(|s| Category::ALL.map(|c| s.topics(c).len()))
        .max()
        .unwrap_or(0);
    let font = fit_font(busiest, row_height - 2.0 * PADDING);

    let mut document = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0.0, 0.0, width, height))
        .add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", "white"),
        );

    for (j, category) in Category::ALL.into_iter().enumerate() {
        let header = Text::new(model.list_name(category))
            .set("x", MARGIN + (j as f64 + 0.5) * col_width)
            .set("y", MARGIN / 2.0)
            .set("text-anchor", "middle")
            .set("font-size", HEADER_FONT);
        document = document.add(header);
    }

    for (i, slot) in assignment.slots.iter().enumerate() {
        let y_top = MARGIN + i as f64 * row_height;

        let label = Text::new(slot.slot.label.as_str())
            .set("x", MARGIN / 2.0)
            .set("y", y_top + row_height / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-size", HEADER_FONT);
        document = document.add(label);

        for (j, category) in Category::ALL.into_iter().enumerate() {
            let x_left = MARGIN + j as f64 * col_width;
            let cell = Rectangle::new()
                .set("x", x_left)
                .set("y", y_top)
                .set("width", col_width)
                .set("height", row_height)
                .set("fill", fill(category))
                .set("stroke", "black");
            document = document.add(cell);

            for (k, topic) in slot.topics(category).iter().enumerate() {
                let line = Text::new(topic.as_str())
                    .set("x", x_left + PADDING)
                    .set("y", y_top + PADDING + font + k as f64 * (font + LINE_SPACING))
                    .set("font-size", font);
                document = document.add(line);
            }
        }
    }

    document
}

/// Renders the grid and writes it to `path`.
pub fn save_svg(
    path: impl AsRef<Path>,
    assignment: &Assignment,
    model: &DomainModel,
) -> std::io::Result<()> {
    svg::save(path, &render_svg(assignment, model))
}
