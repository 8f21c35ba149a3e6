//! Format trees, listings and statistics as text.

use crate::api::DirectoryListing;
use crate::import::ImportReport;
use crate::store::StatusUpdateReport;
use crate::tree::{BuildReport, FileEntry, TreeNode, TreeStats};
use crate::types::{Status, UNSET_STATUS_KEY};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn status_label(status: Option<&Status>) -> String {
    match status {
        Some(Status::Approved) => format!("{}", "approved".green()),
        Some(Status::Rejected) => format!("{}", "rejected".red()),
        Some(Status::Published) => format!("{}", "published".blue()),
        Some(Status::Review) => format!("{}", "review".yellow()),
        Some(other) => other.to_string(),
        None => format!("{}", "-".dimmed()),
    }
}

fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

fn skipped_note(report: &BuildReport) -> Option<String> {
    if report.skipped() == 0 {
        return None;
    }
    Some(format!(
        "{} record(s) skipped: {} empty path, {} too deep",
        report.skipped(),
        report.skipped_empty,
        report.skipped_too_deep
    ))
}

/// Indented outline of the tree, directories first, down to `depth` levels
pub fn format_tree_text(root: &TreeNode, depth: Option<usize>, report: &BuildReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Photo tree")));
    if root.is_empty() {
        out.push_str("Tree is empty.\n");
    } else {
        write_node(&mut out, root, 0, depth);
    }
    out.push_str(&format!(
        "\n{} file(s) from {} record(s)\n",
        report.files_inserted, report.records_seen
    ));
    if let Some(note) = skipped_note(report) {
        out.push_str(&format!("{}\n", note.yellow()));
    }
    out
}

fn write_node(out: &mut String, node: &TreeNode, level: usize, depth: Option<usize>) {
    let indent = "  ".repeat(level);
    for (name, child) in node.children() {
        out.push_str(&format!("{}{}/\n", indent, name.bold()));
        if depth.map_or(true, |max| level + 1 < max) {
            write_node(out, child, level + 1, depth);
        } else if !child.is_empty() {
            out.push_str(&format!("{}  ...\n", indent));
        }
    }
    for file in node.files() {
        out.push_str(&format!(
            "{}{} [{}]\n",
            indent,
            file.name(),
            status_label(file.status.as_ref())
        ));
    }
}

/// Table of one directory's direct contents
pub fn format_listing_text(path: &str, listing: &DirectoryListing) -> String {
    let mut out = String::new();
    let title = if path.is_empty() { "/" } else { path };
    out.push_str(&format!("{}\n\n", format_section_heading(title)));
    if listing.files.is_empty() && listing.directories.is_empty() {
        out.push_str("Directory is empty.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Type", "Status", "Nude", "Face"]);
    for dir in &listing.directories {
        table.add_row(vec![
            format!("{}/", dir),
            "dir".to_string(),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }
    for file in &listing.files {
        table.add_row(vec![
            file.name().to_string(),
            "file".to_string(),
            status_label(file.status.as_ref()),
            flag(file.is_nude).to_string(),
            flag(file.has_face).to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_file_text(entry: &FileEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(&entry.path)));
    out.push_str(&format!("  Status: {}\n", status_label(entry.status.as_ref())));
    out.push_str(&format!("  Nude: {}\n", flag(entry.is_nude)));
    out.push_str(&format!("  Face: {}\n", flag(entry.has_face)));
    let score = entry
        .nsfw_score
        .map(|s| format!("{:.3}", s))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!("  NSFW score: {}\n", score));
    out
}

/// Totals plus a per-status breakdown
pub fn format_stats_text(scope: &str, stats: &TreeStats, report: Option<&BuildReport>) -> String {
    let mut out = String::new();
    let title = if scope.is_empty() {
        "Statistics".to_string()
    } else {
        format!("Statistics: {}", scope)
    };
    out.push_str(&format!("{}\n\n", format_section_heading(&title)));

    let mut totals = Table::new();
    totals.load_preset(UTF8_BORDERS_ONLY);
    totals.set_header(vec!["Metric", "Count"]);
    totals.add_row(vec!["Files".to_string(), stats.total_files.to_string()]);
    totals.add_row(vec!["Nude".to_string(), stats.nude_files.to_string()]);
    totals.add_row(vec!["With face".to_string(), stats.face_files.to_string()]);
    totals.add_row(vec!["Directories".to_string(), stats.directories.to_string()]);
    out.push_str(&format!("{}\n\n", totals));

    if !stats.by_status.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("By status")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Status", "Files"]);
        for (status, count) in stats.by_status.iter() {
            let label = status
                .map(|s| s.to_string())
                .unwrap_or_else(|| UNSET_STATUS_KEY.to_string());
            table.add_row(vec![label, count.to_string()]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if let Some(note) = report.and_then(skipped_note) {
        out.push_str(&format!("\n{}\n", note.yellow()));
    }
    out
}

pub fn format_import_text(dir: &str, report: &ImportReport, dry_run: bool) -> String {
    let verb = if dry_run { "Would import" } else { "Imported" };
    format!(
        "{} {} new photo(s) from {} ({} found, {} already known)",
        verb, report.inserted, dir, report.discovered, report.existing
    )
}

pub fn format_status_update_text(path: &str, status: &Status, report: &StatusUpdateReport) -> String {
    let action = if report.inserted > 0 { "Created" } else { "Updated" };
    format!("{} {} -> {}", action, path, status)
}
