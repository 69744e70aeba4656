//! Format snapshots, search results and workflow outcomes as text.

use crate::index::{ChildRef, IndexedNode, Snapshot};
use crate::session::Outcome;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::collections::HashMap;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Indented outline of the whole tree; the untitled root is not printed.
pub fn format_tree(snapshot: &Snapshot) -> String {
    let mut depths: HashMap<&str, usize> = HashMap::new();
    let mut out = String::new();
    for node in snapshot.iter() {
        let depth = node
            .parent_id
            .as_deref()
            .and_then(|parent| depths.get(parent))
            .map(|d| d + 1)
            .unwrap_or(0);
        depths.insert(node.id.as_str(), depth);
        if depth == 0 {
            continue;
        }
        let indent = "  ".repeat(depth - 1);
        match &node.url {
            Some(url) => out.push_str(&format!("{}{} <{}> [{}]\n", indent, node.title, url, node.id)),
            None => out.push_str(&format!(
                "{}{}/ [{}]\n",
                indent,
                node.title.bold(),
                node.id
            )),
        }
    }
    out
}

/// Folder search results as a table
pub fn format_folder_results(results: &[IndexedNode], snapshot: &Snapshot) -> String {
    if results.is_empty() {
        return "No matching folders\n".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Folder", "Parent", "Bookmarks"]);
    for folder in results {
        let parent = snapshot
            .parent_folder_of(folder)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            folder.id.clone(),
            folder.title.clone(),
            parent,
            snapshot.folder_bookmarks(&folder.id).len().to_string(),
        ]);
    }
    format!("{}\n", table)
}

/// Bookmarks of one folder as a table
pub fn format_folder_contents(folder: &IndexedNode, bookmarks: &[ChildRef]) -> String {
    let mut out = format!("{}\n", format_section_heading(&folder.title));
    if bookmarks.is_empty() {
        out.push_str("  (no bookmarks)\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Title", "Url"]);
    for bookmark in bookmarks {
        table.add_row(vec![
            bookmark.id.clone(),
            bookmark.title.clone(),
            bookmark.url.clone().unwrap_or_default(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// One status line for the progress indicator
pub fn format_outcome(outcome: &Outcome, success_message: &str) -> String {
    match outcome {
        Outcome::Success => format!("{} {}", "ok".green(), success_message),
        Outcome::Skipped(reason) => format!("{} {}", "skipped".yellow(), reason),
        Outcome::Failure(message) => format!("{} {}", "failed".red(), message),
    }
}
