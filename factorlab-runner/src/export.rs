//! Reporting and export: JSON, CSV, Markdown and terminal output.
//!
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: result rows for spreadsheets
//! - **Markdown**: human-readable single-run report
//! - **Table**: fixed-width text for the terminal
//!
//! All persisted artifacts include a `schema_version` field. Unknown versions
//! are rejected on load.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::result::{ResultRow, RunResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `RunResult` to pretty JSON.
pub fn export_json(result: &RunResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize RunResult to JSON")
}

/// Deserialize a `RunResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<RunResult> {
    let result: RunResult =
        serde_json::from_str(json).context("failed to deserialize RunResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export result rows as CSV.
///
/// Columns: rank, identifier, name, sector, current_price, predicted_price,
/// predicted_growth_pct, return_3, return_6, return_12
pub fn export_results_csv(rows: &[ResultRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "rank",
        "identifier",
        "name",
        "sector",
        "current_price",
        "predicted_price",
        "predicted_growth_pct",
        "return_3",
        "return_6",
        "return_12",
    ])?;

    for r in rows {
        wtr.write_record([
            &r.rank.to_string(),
            &r.identifier,
            &r.name,
            r.sector.name(),
            &format!("{:.4}", r.current_price),
            &format!("{:.4}", r.predicted_price),
            &format!("{:.6}", r.predicted_growth_pct),
            &format!("{:.4}", r.returns.return_3),
            &format!("{:.4}", r.returns.return_6),
            &format!("{:.4}", r.returns.return_12),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Directory name for a run's artifacts: `{mode}_{run_date}`.
pub fn artifact_dir_name(result: &RunResult) -> String {
    format!(
        "{}_{}",
        result.data_mode.as_str().to_ascii_lowercase(),
        result.run_date.format("%Y%m%d")
    )
}

/// Save the artifact set for one run.
///
/// Creates `{mode}_{run_date}/` under `output_dir` containing:
/// - `result.json`: the full `RunResult`
/// - `results.csv`: ranked rows plus the required row
/// - `report.md`: Markdown report
///
/// Returns the path to the created directory.
pub fn save_artifacts(result: &RunResult, output_dir: &Path) -> Result<PathBuf> {
    let run_dir = output_dir.join(artifact_dir_name(result));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("result.json"), export_json(result)?)?;
    std::fs::write(run_dir.join("results.csv"), export_results_csv(&result.results)?)?;
    std::fs::write(run_dir.join("report.md"), generate_report(result))?;

    Ok(run_dir)
}

/// Load a `RunResult` from an artifact directory's result.json.
pub fn load_artifacts(dir: &Path) -> Result<RunResult> {
    let path = dir.join("result.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for one run.
pub fn generate_report(result: &RunResult) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# FactorLab Run Report\n\n");

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    let _ = writeln!(md, "| Model | {} |", result.model_version);
    let _ = writeln!(md, "| Data | **{}** |", result.data_mode);
    let _ = writeln!(md, "| Run Date | {} |", result.run_date);
    let _ = writeln!(md, "| Horizon Date | {} |", result.horizon_date);
    md.push('\n');

    let m = &result.metrics;
    md.push_str("## Decision\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    let _ = writeln!(md, "| Decision | **{}** |", result.decision);
    let _ = writeln!(md, "| Avg Top Growth | {:.3}% |", m.avg_top_growth_pct);
    let _ = writeln!(md, "| Dispersion | {:.3}% |", m.dispersion_pct);
    let _ = writeln!(md, "| Max Sector Count | {} |", m.max_sector_count);
    if result.sector_warning {
        md.push_str("| Sector Warning | concentrated top set |\n");
    }
    md.push('\n');

    md.push_str("## Results\n\n");
    md.push_str("| Rank | Identifier | Name | Sector | Price | Predicted | Growth | 3M | 6M | 12M |\n");
    md.push_str("| --- | --- | --- | --- | --- | --- | --- | --- | --- | --- |\n");
    for r in &result.results {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {:.2} | {:.2} | {:+.3}% | {:+.2}% | {:+.2}% | {:+.2}% |",
            r.rank,
            r.identifier,
            r.name,
            r.sector,
            r.current_price,
            r.predicted_price,
            r.predicted_growth_pct,
            r.returns.return_3,
            r.returns.return_6,
            r.returns.return_12,
        );
    }

    md
}

// ─── Terminal table ─────────────────────────────────────────────────

/// Fixed-width table for terminal output.
pub fn format_table(result: &RunResult) -> String {
    let mut out = String::with_capacity(1024);
    let _ = writeln!(
        out,
        "{} | {} | run {} → horizon {}",
        result.model_version, result.data_mode, result.run_date, result.horizon_date
    );
    let _ = writeln!(
        out,
        "{:>4}  {:<6} {:<28} {:<24} {:>9} {:>9} {:>8} {:>8} {:>8} {:>8}",
        "RANK", "ID", "NAME", "SECTOR", "PRICE", "PRED", "GROWTH", "3M", "6M", "12M"
    );
    for r in &result.results {
        let _ = writeln!(
            out,
            "{:>4}  {:<6} {:<28} {:<24} {:>9.2} {:>9.2} {:>+7.3}% {:>+7.2}% {:>+7.2}% {:>+7.2}%",
            r.rank.to_string(),
            r.identifier,
            truncate(&r.name, 28),
            r.sector.name(),
            r.current_price,
            r.predicted_price,
            r.predicted_growth_pct,
            r.returns.return_3,
            r.returns.return_6,
            r.returns.return_12,
        );
    }
    let m = &result.metrics;
    let _ = writeln!(
        out,
        "avg {:.3}%  dispersion {:.3}%  max sector {}  →  {}",
        m.avg_top_growth_pct, m.dispersion_pct, m.max_sector_count, result.decision
    );
    if result.sector_warning {
        out.push_str("warning: top set is concentrated in one sector\n");
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 1).collect();
        t.push('…');
        t
    }
}
