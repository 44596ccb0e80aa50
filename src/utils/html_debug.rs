// src/utils/html_debug.rs
use std::fs;
use std::path::Path;
use regex::Regex;
use crate::utils::error::AppError;

/// Writes `html` with debug highlights wrapped around the given byte ranges
fn save_debug_html(
    html: &str,
    path: &Path,
    highlights: &[(usize, usize, &str)],
) -> Result<(), AppError> {
    // Add debug styling in head
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str(".highlight-start { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-end { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, highlight_type) in sorted_highlights {
        // Overlapping matches keep the first highlight only
        if start < last_pos {
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);

        let css_class = match highlight_type {
            "start" => "highlight-start",
            "end" => "highlight-end",
            _ => "highlight-custom",
        };

        debug_html.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type
        ));
        debug_html.push_str(&html[start..end]);
        debug_html.push_str("</span>");

        last_pos = end;
    }

    debug_html.push_str(&html[last_pos..]);
    debug_html.push_str("\n</body>\n</html>");

    fs::write(path, debug_html)?;

    tracing::info!("Saved debug HTML to {}", path.display());
    Ok(())
}

/// Pattern matching `item <label>` in serialized markup, tolerating the
/// whitespace entities filings put between the two words.
fn marker_pattern(label: &str) -> String {
    format!(r"(?i)\bitem(?:\s|&nbsp;|&#160;|\u{{a0}})+{}\b", regex::escape(label))
}

/// Creates a debug copy of `html` with every `item <label>` occurrence highlighted.
/// `markers` pairs a section label with its highlight type (`start`, `end`, ...).
pub fn create_debug_html(
    html: &str,
    path: &Path,
    markers: &[(&str, &str)],
) -> Result<(), AppError> {
    let mut highlights = Vec::new();

    for (label, highlight_type) in markers {
        let pattern = marker_pattern(label);
        let re = Regex::new(&pattern).map_err(|e| {
            AppError::Config(format!("Invalid marker pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    tracing::debug!("Highlighting {} marker occurrences", highlights.len());
    save_debug_html(html, path, &highlights)
}
