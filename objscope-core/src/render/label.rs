//! Node labels
//!
//! A label is an HTML fragment: optional field name, type (with the
//! qualified name as tooltip) and representation (with a doc excerpt as
//! tooltip). Everything derived from the inspected value is escaped.

use crate::config::InspectorConfig;
use crate::object::Value;

use super::naming::TypeName;

/// Marker line appended to truncated doc excerpts
pub const ELLIPSIS: &str = "…";

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Keep at most `max_lines` lines, the last being [`ELLIPSIS`] when cut
pub fn doc_excerpt(doc: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = doc.split('\n').collect();
    if lines.len() <= max_lines {
        return doc.to_string();
    }
    let mut kept = lines[..max_lines.saturating_sub(1)].to_vec();
    kept.push(ELLIPSIS);
    kept.join("\n")
}

/// Render the label of a node wrapping `value`
pub fn render_label(
    value: &Value,
    field_name: Option<&str>,
    type_name: &TypeName,
    config: &InspectorConfig,
) -> String {
    let mut label = format!(r#"<span style="{}">"#, escape_html(&config.item_style));

    if let Some(name) = field_name {
        label.push_str(&format!(
            r#"<span style="{}">{}</span>: "#,
            escape_html(&config.name_style),
            escape_html(name)
        ));
    }

    label.push_str(&format!(
        r#"<span style="{}" title="{}">{}</span>"#,
        escape_html(&config.type_style),
        escape_html(&type_name.qualified),
        escape_html(&type_name.short)
    ));

    if config.shows_repr(&type_name.short) {
        label.push_str(&format!(r#" <span style="{}""#, escape_html(&config.repr_style)));
        if let Some(doc) = value.value_type().doc() {
            let excerpt = doc_excerpt(&doc, config.max_doc_lines);
            label.push_str(&format!(r#" title="{}""#, escape_html(&excerpt)));
        }
        label.push_str(&format!(">{}</span>", escape_html(&value.repr())));
    }

    label.push_str("</span>");
    label
}
