//! Sidebar navigation tree rendering.
//!
//! The sidebar tree arrives as data in
//! [`NavigationConfig`](crate::NavigationConfig); item paths are relative
//! to the page's source partition and get mounted under `/{base_path}`
//! when rendered.

use std::fmt::Write;

use ds_renderer::escape_html;
use serde::{Deserialize, Serialize};

/// Navigation item with children for the sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Display label.
    pub label: String,
    /// Link target path, relative to the docset base path. An empty path
    /// links to the base path itself; a leading slash opts out of scoping.
    pub path: String,
    /// Child navigation items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Render the sidebar navigation tree.
///
/// Entries link under `/{base_path}`; the entry whose target equals
/// `current_uri` is marked active.
#[must_use]
pub fn render_nav(items: &[NavItem], base_path: &str, current_uri: &str) -> String {
    let mut html = String::with_capacity(256);
    html.push_str(r#"<nav class="sidebar-nav"><ul>"#);
    render_items(&mut html, items, base_path, current_uri);
    html.push_str("</ul></nav>");
    html
}

fn render_items(html: &mut String, items: &[NavItem], base_path: &str, current_uri: &str) {
    for item in items {
        let target = nav_target(base_path, &item.path);
        let class = if target == current_uri {
            "nav-link active"
        } else {
            "nav-link"
        };

        html.push_str("<li>");
        let _ = write!(
            html,
            r#"<a href="{}" class="{class}">{}</a>"#,
            escape_html(&target),
            escape_html(&item.label)
        );

        if !item.children.is_empty() {
            html.push_str("<ul>");
            render_items(html, &item.children, base_path, current_uri);
            html.push_str("</ul>");
        }
        html.push_str("</li>");
    }
}

/// Mount an item path under the docset base path.
fn nav_target(base_path: &str, path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else if path.is_empty() {
        format!("/{base_path}")
    } else {
        format!("/{base_path}/{path}")
    }
}
