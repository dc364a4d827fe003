//! Markdown summary generation
//!
//! This module writes a human-readable markdown summary of a crawl report.

use crate::output::report::CrawlReport;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Failed assets listed before the table is truncated
const MAX_ASSET_ROWS: usize = 50;

/// Generates a markdown summary from a crawl report
///
/// # Arguments
///
/// * `report` - The crawl report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_summary(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Sumi-Mirror Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Root URL**: {}\n", report.root_url));
    md.push_str(&format!("- **Strategy**: {:?}\n", report.strategy));
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration() {
        md.push_str(&format!(
            "- **Duration**: {:.2} seconds\n",
            duration.num_milliseconds() as f64 / 1000.0
        ));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Saved**: {}\n", report.pages.len()));
    md.push_str(&format!("- **Pages Failed**: {}\n", report.failures.len()));
    md.push_str(&format!(
        "- **Asset Failures**: {}\n",
        report.asset_failures.len()
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        report.success_rate()
    ));

    if !report.pages.is_empty() {
        md.push_str("## Saved Pages\n\n");
        md.push_str("| URL | Directory | Depth | Links | CSS bytes | JS bytes |\n");
        md.push_str("|-----|-----------|-------|-------|-----------|----------|\n");
        for page in &report.pages {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                page.url,
                page.directory.display(),
                page.depth,
                page.links_found,
                page.css_bytes,
                page.js_bytes
            ));
        }
        md.push('\n');
    }

    if !report.failures.is_empty() {
        md.push_str("## Failed Pages\n\n");
        md.push_str("| URL | Depth | Error |\n");
        md.push_str("|-----|-------|-------|\n");
        for failure in &report.failures {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                failure.url, failure.depth, failure.error
            ));
        }
        md.push('\n');
    }

    if !report.asset_failures.is_empty() {
        md.push_str("## Failed Assets\n\n");
        md.push_str("| Page | Kind | Asset | Error |\n");
        md.push_str("|------|------|-------|-------|\n");
        for failure in report.asset_failures.iter().take(MAX_ASSET_ROWS) {
            md.push_str(&format!(
                "| {} | {:?} | {} | {} |\n",
                failure.page, failure.kind, failure.asset, failure.message
            ));
        }
        if report.asset_failures.len() > MAX_ASSET_ROWS {
            md.push_str(&format!(
                "\n... and {} more\n",
                report.asset_failures.len() - MAX_ASSET_ROWS
            ));
        }
        md.push('\n');
    }

    md
}
