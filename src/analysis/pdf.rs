/**
 * Analysis PDF Rendering
 *
 * Renders one analysis as a single-page A4 PDF: title, submitted-text
 * summary, and the result metrics. Uses the built-in Helvetica fonts so no
 * font files ship with the binary.
 */

use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde_json::Value;

use crate::error::ApiError;

/// Wrap text into lines of at most `width` characters
///
/// Greedy word wrap; a single overlong word gets a line of its own rather
/// than being split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Render an analysis to PDF bytes
///
/// # Arguments
/// * `title` - Analysis title
/// * `input_summary` - Truncated submitted text
/// * `result` - Result metrics as stored in `result_json`
///
/// # Returns
/// The finished PDF file as bytes
pub fn build_analysis_pdf(
    title: &str,
    input_summary: &str,
    result: &Value,
) -> Result<Vec<u8>, ApiError> {
    // A4 page
    let (doc, page, layer) =
        PdfDocument::new("AlertTrail Analysis", Mm(210.0), Mm(297.0), "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ApiError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ApiError::Pdf(e.to_string()))?;

    let layer = doc.get_page(page).get_layer(layer);

    let margin = 20.0;
    let line_height = 7.0;
    let mut y = 297.0 - margin;

    layer.use_text("AlertTrail Analysis Report", 16.0, Mm(margin), Mm(y), &bold);
    y -= 2.0 * line_height;

    layer.use_text(format!("Title: {title}"), 12.0, Mm(margin), Mm(y), &bold);
    y -= 2.0 * line_height;

    layer.use_text("Submitted text (summary):", 11.0, Mm(margin), Mm(y), &bold);
    y -= line_height;

    for line in wrap_text(input_summary, 90) {
        layer.use_text(line, 10.0, Mm(margin), Mm(y), &font);
        y -= line_height;
    }
    y -= line_height;

    layer.use_text("Result:", 11.0, Mm(margin), Mm(y), &bold);
    y -= line_height;

    if let Some(map) = result.as_object() {
        for (key, value) in map {
            layer.use_text(format!("{key}: {value}"), 10.0, Mm(margin), Mm(y), &font);
            y -= line_height;
        }
    } else {
        layer.use_text(result.to_string(), 10.0, Mm(margin), Mm(y), &font);
    }

    doc.save_to_bytes().map_err(|e| ApiError::Pdf(e.to_string()))
}
