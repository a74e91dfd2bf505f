//! Rendering of labels and trees as HTML

pub mod html;
pub mod label;
pub mod naming;

pub use label::{doc_excerpt, escape_html, render_label};
pub use naming::TypeName;
