//! HTML rendering of a whole inspector tree
//!
//! Output is a scrollable container with nested lists. Only open nodes
//! render their children; the icon shows whether a node can be opened.

use crate::tree::{Inspector, NodeId};

use super::label::escape_html;

pub fn render_tree(inspector: &Inspector) -> String {
    let config = inspector.config();
    let mut html = format!(
        r#"<div class="objscope {}" style="max-height: {}; overflow-y: auto">"#,
        inspector.kind().css_class(),
        escape_html(&config.max_height)
    );
    render_list(inspector, inspector.roots(), &mut html);
    html.push_str("</div>");
    html
}

fn render_list(inspector: &Inspector, ids: &[NodeId], html: &mut String) {
    html.push_str("<ul>");
    for &id in ids {
        render_node(inspector, id, html);
    }
    html.push_str("</ul>");
}

fn render_node(inspector: &Inspector, id: NodeId, html: &mut String) {
    let Some(node) = inspector.node(id) else {
        return;
    };
    let config = inspector.config();

    let (state, icon) = if !node.is_expanded() {
        ("collapsed", Some(&config.open_icon))
    } else if node.children().is_empty() {
        ("leaf", None)
    } else if node.is_opened() {
        ("open", Some(&config.close_icon))
    } else {
        ("closed", Some(&config.open_icon))
    };

    html.push_str(&format!(
        r#"<li class="{}" data-node="{}">"#,
        state,
        id.index()
    ));
    if let Some(icon) = icon {
        html.push_str(&format!(r#"<i class="fa fa-{}"></i> "#, escape_html(icon)));
    }
    html.push_str(node.label());
    if node.is_opened() && !node.children().is_empty() {
        render_list(inspector, node.children(), html);
    }
    html.push_str("</li>");
}
