//! HTML Rendering
//!
//! Turns a layout tree into a standalone page. Charts are drawn client-side
//! by Vega-Embed; the bundled script wires control changes to the server.

use super::Node;
use crate::reactive::OutputUpdate;
use std::fmt::Write;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const VEGA_JS: &str = "https://cdn.jsdelivr.net/npm/vega@5";
const VEGA_LITE_JS: &str = "https://cdn.jsdelivr.net/npm/vega-lite@5";
const VEGA_EMBED_JS: &str = "https://cdn.jsdelivr.net/npm/vega-embed@6";

const DASHBOARD_JS: &str = include_str!("../../assets/dashboard.js");

/// Render `layout` as a complete document with `initial` outputs embedded
pub fn render_page(layout: &Node, initial: &[OutputUpdate]) -> String {
    let mut out = String::with_capacity(16 * 1024);

    let title = match layout {
        Node::Page { title, .. } => title.as_str(),
        _ => "",
    };

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(title));
    let _ = writeln!(out, "<link rel=\"stylesheet\" href=\"{}\">", BOOTSTRAP_CSS);
    for src in [VEGA_JS, VEGA_LITE_JS, VEGA_EMBED_JS] {
        let _ = writeln!(out, "<script src=\"{}\"></script>", src);
    }
    out.push_str("</head>\n<body>\n");

    render_node(&mut out, layout);

    // `</` would end the script element early
    let initial_json = serde_json::to_string(initial)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/");
    let _ = writeln!(
        out,
        "<script id=\"initial-outputs\" type=\"application/json\">{}</script>",
        initial_json
    );
    let _ = writeln!(out, "<script>\n{}</script>", DASHBOARD_JS);

    out.push_str("</body>\n</html>\n");
    out
}

fn render_node(out: &mut String, node: &Node) {
    match node {
        Node::Page { children, .. } => {
            out.push_str("<div class=\"container-fluid\" style=\"padding: 20px\">\n");
            render_children(out, children);
            out.push_str("</div>\n");
        }
        Node::Row { children } => {
            out.push_str("<div class=\"row mb-4\">\n");
            render_children(out, children);
            out.push_str("</div>\n");
        }
        Node::Col { width, children } => {
            match width {
                Some(w) => {
                    let _ = writeln!(out, "<div class=\"col-{}\">", w);
                }
                None => out.push_str("<div class=\"col\">\n"),
            }
            render_children(out, children);
            out.push_str("</div>\n");
        }
        Node::Heading { text } => {
            let _ = writeln!(out, "<h1 class=\"text-center\">{}</h1>", escape(text));
        }
        Node::Paragraph { text } => {
            let _ = writeln!(out, "<p class=\"text-center\">{}</p>", escape(text));
        }
        Node::Label { text } => {
            let _ = writeln!(out, "<div class=\"mb-2\">{}</div>", escape(text));
        }
        Node::Dropdown {
            id,
            options,
            value,
            multi,
        } => {
            let _ = writeln!(
                out,
                "<select id=\"{}\" class=\"form-select dash-control\" data-kind=\"multi\"{} size=\"{}\">",
                id,
                if *multi { " multiple" } else { "" },
                options.len().clamp(1, 8)
            );
            for option in options {
                let selected = if value.contains(option) { " selected" } else { "" };
                let _ = writeln!(
                    out,
                    "<option value=\"{0}\"{1}>{0}</option>",
                    escape(option),
                    selected
                );
            }
            out.push_str("</select>\n");
        }
        Node::RangeSlider {
            id,
            min,
            max,
            step,
            value,
            marks,
        } => {
            let _ = writeln!(
                out,
                "<div id=\"{}\" class=\"dash-control\" data-kind=\"range\">",
                id
            );
            let _ = writeln!(out, "<datalist id=\"{}-marks\">", id);
            for (year, label) in marks {
                let _ = writeln!(
                    out,
                    "<option value=\"{}\" label=\"{}\"></option>",
                    year,
                    escape(label)
                );
            }
            out.push_str("</datalist>\n");
            for (bound, current) in [("low", value[0]), ("high", value[1])] {
                let _ = writeln!(
                    out,
                    "<input type=\"range\" class=\"form-range\" data-bound=\"{}\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\" list=\"{}-marks\">",
                    bound, min, max, step, current, id
                );
            }
            let _ = writeln!(
                out,
                "<div class=\"text-center\" data-role=\"readout\">{} - {}</div>",
                value[0], value[1]
            );
            out.push_str("</div>\n");
        }
        Node::Graph { id } => {
            let _ = writeln!(
                out,
                "<div id=\"{}\" class=\"dash-graph mb-4\" style=\"width: 100%; min-height: 400px\"></div>",
                id
            );
        }
        Node::Text { id } => {
            let _ = writeln!(out, "<div id=\"{}\" class=\"fw-bold mb-4\"></div>", id);
        }
    }
}

fn render_children(out: &mut String, children: &[Node]) {
    for child in children {
        render_node(out, child);
    }
}

/// Escape text for element content and double-quoted attributes
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CleanedDataset, GameRecord, LoadStats};
    use crate::layout::build_layout;
    use crate::reactive::{OutputId, OutputValue};
    use crate::recompute::FilterSelection;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"R&D\"</b>"), "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;");
        assert_eq!(escape("Tom's"), "Tom&#39;s");
    }

    #[test]
    fn test_page_contains_controls_and_outputs() {
        let records = vec![
            GameRecord::new("A", "PS2", 2003, "Role-Playing", "E", 8.0, 80.0),
            GameRecord::new("B", "Wii", 2008, "<Racing>", "T", 7.0, 70.0),
        ];
        let ds = CleanedDataset::from_records(records, None, LoadStats::default());
        let layout = build_layout(&ds, &FilterSelection::full(&ds));
        let initial = vec![OutputUpdate {
            output: OutputId::SelectedGames,
            value: OutputValue::Count(2),
        }];

        let html = render_page(&layout, &initial);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Game Industry History</title>"));
        assert!(html.contains("id=\"genre_dropdown\""));
        assert!(html.contains("id=\"rating_dropdown\""));
        assert!(html.contains("id=\"year_selector\""));
        assert!(html.contains("id=\"stacked_area\""));
        assert!(html.contains("id=\"critic_user_scatter\""));
        assert!(html.contains("id=\"selected_games\""));
        assert!(html.contains("<option value=\"Role-Playing\" selected>"));
        assert!(html.contains("&lt;Racing&gt;"));
        assert!(html.contains(r#""output":"selected_games""#));
    }
}
