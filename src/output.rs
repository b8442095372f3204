//! CLI output formatting.
//!
//! # Run Report
//!
//! ```text
//! Images found: 3
//! Written: 1
//! Skipped (no matching root): 2
//!
//! Manifest: /home/me/out/manifest.txt
//!
//! Sample (first 5 lines):
//!     https://cdn.example/Brochures/cover.png?v=20250101120000
//! ```
//!
//! With `--verbose` the skipped files are listed after the sample.
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::PublishRoot;
use crate::pipeline::RunSummary;
use std::path::Path;

/// How many manifest lines the report shows.
const SAMPLE_LINES: usize = 5;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// One line per configured root, in priority order.
///
/// ```text
/// 1. /data/Brochures → https://cdn.example/Brochures  [markers: Brochures]
/// 2. /data/Flyers → https://cdn.example/Flyers
/// ```
pub fn format_roots(roots: &[PublishRoot]) -> Vec<String> {
    if roots.is_empty() {
        return vec![format!("{}(none configured)", indent(1))];
    }
    roots
        .iter()
        .enumerate()
        .map(|(i, root)| {
            let mut line = format!(
                "{}{}. {} → {}",
                indent(1),
                i + 1,
                root.local_root.display(),
                root.base_url
            );
            if !root.marker_segments.is_empty() {
                line.push_str(&format!("  [markers: {}]", root.marker_segments.join("/")));
            }
            line
        })
        .collect()
}

pub fn format_empty(source: &Path) -> Vec<String> {
    vec![format!("No PNG/WEBP images found in {}", source.display())]
}

pub fn format_run_summary(summary: &RunSummary, verbose: bool) -> Vec<String> {
    let mut lines = vec![
        format!("Images found: {}", summary.total),
        format!("Written: {}", summary.written),
        format!("Skipped (no matching root): {}", summary.skipped),
        String::new(),
    ];

    match &summary.manifest_path {
        Some(path) => lines.push(format!("Manifest: {}", path.display())),
        None => lines.push("Manifest: not written (check only)".to_string()),
    }

    if !summary.lines.is_empty() {
        lines.push(String::new());
        lines.push(format!("Sample (first {SAMPLE_LINES} lines):"));
        lines.extend(
            summary
                .lines
                .iter()
                .take(SAMPLE_LINES)
                .map(|url| format!("{}{}", indent(1), url)),
        );
    }

    if verbose && !summary.unmapped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped files:".to_string());
        lines.extend(
            summary
                .unmapped
                .iter()
                .map(|p| format!("{}{}", indent(1), p.display())),
        );
    }

    lines
}

pub fn format_summary_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

pub fn print_roots(roots: &[PublishRoot]) {
    println!("Publish roots (first match wins):");
    for line in format_roots(roots) {
        println!("{}", line);
    }
}

pub fn print_empty(source: &Path) {
    for line in format_empty(source) {
        println!("{}", line);
    }
}

pub fn print_run_summary(summary: &RunSummary, verbose: bool) {
    for line in format_run_summary(summary, verbose) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::fixed_stamp;
    use std::path::PathBuf;

    fn summary(lines: usize, unmapped: usize, written_to: Option<&str>) -> RunSummary {
        RunSummary {
            total: lines + unmapped,
            written: lines,
            skipped: unmapped,
            manifest_path: written_to.map(PathBuf::from),
            stamp: fixed_stamp(),
            lines: (0..lines)
                .map(|i| format!("https://cdn.example/{i}.png?v=20250101120000"))
                .collect(),
            unmapped: (0..unmapped)
                .map(|i| PathBuf::from(format!("/elsewhere/{i}.png")))
                .collect(),
        }
    }

    #[test]
    fn roots_listed_in_order_with_markers() {
        let roots = vec![
            PublishRoot::new("/data/A", "https://a.example").with_markers(["x", "A"]),
            PublishRoot::new("/data/B", "https://b.example"),
        ];
        let lines = format_roots(&roots);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("    1. "));
        assert!(lines[0].contains("https://a.example"));
        assert!(lines[0].ends_with("[markers: x/A]"));
        assert!(lines[1].starts_with("    2. "));
        assert!(!lines[1].contains("markers"));
    }

    #[test]
    fn no_roots_says_so() {
        assert_eq!(format_roots(&[]), vec!["    (none configured)"]);
    }

    #[test]
    fn summary_shows_counts_and_path() {
        let lines = format_run_summary(&summary(1, 2, Some("/out/manifest.txt")), false);
        assert_eq!(lines[0], "Images found: 3");
        assert_eq!(lines[1], "Written: 1");
        assert_eq!(lines[2], "Skipped (no matching root): 2");
        assert!(lines.iter().any(|l| l.starts_with("Manifest: ") && l.contains("manifest.txt")));
    }

    #[test]
    fn sample_is_capped_at_five() {
        let lines = format_run_summary(&summary(8, 0, Some("/out/manifest.txt")), false);
        let sample: Vec<&String> = lines.iter().filter(|l| l.starts_with("    https://")).collect();
        assert_eq!(sample.len(), 5);
        assert!(sample[0].contains("/0.png"));
    }

    #[test]
    fn check_only_summary_mentions_no_write() {
        let lines = format_run_summary(&summary(1, 0, None), false);
        assert!(lines.contains(&"Manifest: not written (check only)".to_string()));
    }

    #[test]
    fn skipped_files_only_when_verbose() {
        let quiet = format_run_summary(&summary(1, 2, Some("/m")), false);
        assert!(!quiet.iter().any(|l| l == "Skipped files:"));

        let verbose = format_run_summary(&summary(1, 2, Some("/m")), true);
        assert!(verbose.iter().any(|l| l == "Skipped files:"));
        assert!(verbose.iter().any(|l| l.contains("elsewhere")));
    }

    #[test]
    fn json_summary_has_counts_and_stamp() {
        let json = format_summary_json(&summary(2, 1, Some("/out/manifest.txt"))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["written"], 2);
        assert_eq!(value["skipped"], 1);
        assert_eq!(value["stamp"], "20250101120000");
        assert_eq!(value["lines"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn json_summary_for_empty_run_has_same_shape() {
        let empty = serde_json::from_str::<serde_json::Value>(
            &format_summary_json(&RunSummary::empty(fixed_stamp())).unwrap(),
        )
        .unwrap();
        let full = serde_json::from_str::<serde_json::Value>(
            &format_summary_json(&summary(1, 0, Some("/m"))).unwrap(),
        )
        .unwrap();

        let keys = |v: &serde_json::Value| v.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys(&empty), keys(&full));
        assert_eq!(empty["total"], 0);
        assert_eq!(empty["written"], 0);
        assert_eq!(empty["skipped"], 0);
        assert!(empty["manifest_path"].is_null());
        assert_eq!(empty["stamp"], "20250101120000");
    }

    #[test]
    fn empty_message_names_folder() {
        let lines = format_empty(Path::new("/photos"));
        assert!(lines[0].contains("/photos"));
    }
}
