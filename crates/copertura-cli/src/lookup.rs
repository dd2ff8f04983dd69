//! Command handlers for `lookup` and `normalize`.

use std::path::Path;
use std::sync::Arc;

use copertura_core::AppConfig;
use copertura_lookup::{
    normalize_address, CoverageOutcome, CoveragePipeline, CoverageReport, HttpTransport,
};
use serde_json::Value;

const HEADERS: [&str; 4] = ["Velocità Massima", "Tipo di Servizio", "Fascia", "Stato"];

/// Runs one coverage resolution and prints the result.
///
/// # Errors
///
/// Returns an error if the vocabulary or transport cannot be built, or if the
/// resolution fails on input, transport, or payload shape.
pub(crate) async fn run_lookup(
    config: &AppConfig,
    city: &str,
    address: &str,
    number: &str,
    json: bool,
) -> anyhow::Result<()> {
    let vocabulary = copertura_core::load_vocabulary(config.prefixes_path.as_deref())?;
    let transport = HttpTransport::from_app_config(config)?;
    let pipeline = CoveragePipeline::new(Arc::new(transport), Arc::new(vocabulary));

    match pipeline.resolve_coverage(city, address, number).await? {
        CoverageOutcome::Report(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_table(&report));
            }
        }
        CoverageOutcome::NotFound(stage) => {
            tracing::info!(%stage, "no result");
            println!("Nessun risultato trovato. Controlla i dati inseriti.");
        }
    }

    Ok(())
}

/// Prints the street type and bare address produced by normalization.
///
/// # Errors
///
/// Returns an error if the vocabulary file cannot be read or parsed.
pub(crate) fn run_normalize(address: &str, prefixes: Option<&Path>) -> anyhow::Result<()> {
    let vocabulary = copertura_core::load_vocabulary(prefixes)?;
    let normalized = normalize_address(address, &vocabulary);

    println!(
        "street type: {}",
        normalized.street_type.as_deref().unwrap_or("\u{2014}")
    );
    if normalized.is_empty() {
        println!("address:     (empty; nothing left after prefix removal)");
    } else {
        println!("address:     {}", normalized.address);
    }
    Ok(())
}

fn speed_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Left-aligned fixed-width table, one line per row, provider last.
pub(crate) fn render_table(report: &CoverageReport) -> String {
    let cells: Vec<[String; 4]> = report
        .rows
        .iter()
        .map(|row| {
            [
                speed_text(&row.max_speed),
                row.service_type.clone(),
                row.fiber_range.clone(),
                row.status.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    if let Some(provider) = &report.provider {
        out.push_str(&format!("\nProvider: {provider}\n"));
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
