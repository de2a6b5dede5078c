use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use strata_core::block::display_name;
use strata_sim::{SurveyResults, Table};

/// Write one block per block type: the block's name, a header row of
/// strategy names, then one row of averages per depth.
pub fn write_text_report<W: Write>(results: &SurveyResults, writer: &mut W) -> io::Result<()> {
    for table in results.tables() {
        writeln!(writer, "{}", display_name(table.block))?;
        write_table(&table, writer)?;
        writeln!(writer)?;
    }
    Ok(())
}

fn write_table<W: Write>(table: &Table, writer: &mut W) -> io::Result<()> {
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(table.rows.len() + 1);
    cells.push(
        std::iter::once(String::new())
            .chain(table.columns.iter().cloned())
            .collect(),
    );
    for (depth, values) in &table.rows {
        cells.push(
            std::iter::once(depth.to_string())
                .chain(values.iter().map(|v| format!("{v:.2}")))
                .collect(),
        );
    }

    let column_count = table.columns.len() + 1;
    let widths: Vec<usize> = (0..column_count)
        .map(|col| cells.iter().map(|row| row[col].len()).max().unwrap_or(0))
        .collect();

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, &width))| {
                // Depth labels left-aligned, numbers right-aligned.
                if col == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect();
        writeln!(writer, "{}", line.join("  ").trim_end())?;
    }
    Ok(())
}

/// Write the text report to `path`.
pub fn save_text_report(path: &Path, results: &SurveyResults) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = Vec::new();
    write_text_report(results, &mut out)?;
    std::fs::write(path, out)
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    depths: Vec<JsonDepth<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonDepth<'a> {
    depth: i32,
    strategies: Vec<JsonStrategy<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonStrategy<'a> {
    name: &'a str,
    encounters: BTreeMap<String, f64>,
}

fn json_report(results: &SurveyResults) -> JsonReport<'_> {
    JsonReport {
        depths: results
            .depths
            .iter()
            .map(|depth| JsonDepth {
                depth: depth.depth,
                strategies: depth
                    .strategies
                    .iter()
                    .map(|s| JsonStrategy {
                        name: &s.strategy,
                        encounters: s
                            .counts
                            .iter()
                            .map(|(id, value)| (display_name(id), value))
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Save the survey results as pretty-printed JSON.
pub fn write_json_report(path: &Path, results: &SurveyResults) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&json_report(results)).map_err(io::Error::other)?;
    std::fs::write(path, json)
}
