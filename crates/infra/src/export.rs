//! Report export
//!
//! Reports are written atomically: the payload goes to a temporary file in
//! the destination directory which is then persisted over the target path.

use std::io::Write as _;
use std::path::Path;

use serde::Serialize;
use tallyline_common::time::{format_clock, format_duration};
use tallyline_domain::{
    impl_domain_enum_conversions, AggregationNode, PeriodTotals, SummaryReport, TallylineError,
    TimeTotals, TotalsReport,
};
use tracing::info;

/// On-disk representation of an exported report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Pretty-printed camelCase JSON, the same shape the controller layer serves
    #[default]
    Json,
    /// Indented plain-text tree
    Outline,
}

impl_domain_enum_conversions!(ReportFormat {
    Json => "json",
    Outline => "outline",
});

/// Reports that can be exported in every [`ReportFormat`]
pub trait ExportableReport: Serialize {
    fn outline(&self) -> String;
}

impl ExportableReport for SummaryReport {
    fn outline(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} summary {} .. {}\n",
            self.grouping,
            self.from_time.format("%Y-%m-%d %H:%M"),
            self.to_time.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&format!(
            "periods: {}\n",
            self.period_start_dates.iter().map(|start| start.format("%Y-%m-%d").to_string()).collect::<Vec<_>>().join(" | ")
        ));
        write_summary_nodes(&mut out, &self.activities, 0);
        out
    }
}

impl ExportableReport for TotalsReport {
    fn outline(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "totals {} .. {}\n",
            self.from_time.format("%Y-%m-%d %H:%M"),
            self.to_time.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&render_outline(&self.activities));
        out
    }
}

/// Indented tree of node names and their total time, one node per line
pub fn render_outline<T: TimeTotals>(nodes: &[AggregationNode<T>]) -> String {
    let mut out = String::new();
    write_outline_nodes(&mut out, nodes, 0);
    out
}

fn write_outline_nodes<T: TimeTotals>(out: &mut String, nodes: &[AggregationNode<T>], depth: usize) {
    for node in nodes {
        out.push_str(&format!(
            "{:indent$}{}  {}\n",
            "",
            node.name,
            format_duration(node.totals.total()),
            indent = depth * 2
        ));
        write_outline_nodes(out, node.children(), depth + 1);
    }
}

fn write_summary_nodes(out: &mut String, nodes: &[AggregationNode<PeriodTotals>], depth: usize) {
    for node in nodes {
        let cells = (0..node.totals.time_spent_per_period.len())
            .filter_map(|index| node.totals.slot(index))
            .map(format_clock)
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&format!(
            "{:indent$}{}  {}  [{}]\n",
            "",
            node.name,
            format_duration(node.totals.total()),
            cells,
            indent = depth * 2
        ));
        write_summary_nodes(out, node.children(), depth + 1);
    }
}

/// Render `report` as `format`
pub fn render_report<R: ExportableReport>(report: &R, format: ReportFormat) -> tallyline_domain::Result<String> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| TallylineError::Internal(format!("failed to serialize report: {e}"))),
        ReportFormat::Outline => Ok(report.outline()),
    }
}

/// Write `report` to `path`, replacing any existing file.
///
/// # Errors
/// `Storage` when the destination directory is missing or not writable.
pub fn export_report<R: ExportableReport>(
    report: &R,
    format: ReportFormat,
    path: &Path,
) -> tallyline_domain::Result<()> {
    let payload = render_report(report, format)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| TallylineError::Storage(format!("failed to create temp file in {}: {e}", dir.display())))?;
    file.write_all(payload.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| TallylineError::Storage(format!("failed to write report: {e}")))?;
    file.persist(path)
        .map_err(|e| TallylineError::Storage(format!("failed to persist report to {}: {e}", path.display())))?;

    info!(path = %path.display(), format = %format, bytes = payload.len(), "Exported report");
    Ok(())
}
