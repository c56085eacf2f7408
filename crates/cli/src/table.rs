//! CSV tables of placed shapes: `Index, Type, <fields…>`.
//!
//! One table holds one shape kind; the field columns follow
//! `ArcKind::field_names` (or `Ellipse::FIELDS`).

use anyhow::{bail, Context, Result};
use arcplace::api::export_header;
use arcplace::factory::Ellipse;
use arcplace::{Arc, ArcKind, Canvas};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn frame(kind_label: &str, names: &[&str], rows: &[Vec<f64>]) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(names.len() + 2);
    let index: Vec<u64> = (0..rows.len() as u64).collect();
    columns.push(Series::new("Index".into(), index));
    columns.push(Series::new("Type".into(), vec![kind_label; rows.len()]));
    for (k, name) in names.iter().enumerate() {
        let values: Vec<f64> = rows.iter().map(|r| r[k]).collect();
        columns.push(Series::new((*name).into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Table of arcs that all share `kind`.
pub fn arcs_frame(kind: ArcKind, arcs: &[Arc]) -> Result<DataFrame> {
    if let Some(other) = arcs.iter().find(|a| a.kind != kind) {
        bail!(
            "mixed table: expected {}, found {}",
            kind.label(),
            other.kind.label()
        );
    }
    let header = export_header(kind);
    let rows: Vec<Vec<f64>> = arcs.iter().map(|a| a.field_values()).collect();
    frame(kind.label(), &header[2..], &rows)
}

pub fn ellipse_frame(ellipse: &Ellipse) -> Result<DataFrame> {
    frame(Ellipse::LABEL, Ellipse::FIELDS, &[ellipse.field_values()])
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read arcs back from a table written by `arcs_frame`. Rows of other shapes are skipped.
pub fn read_arcs(path: &Path, canvas: Canvas) -> Result<Vec<Arc>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let kinds: Vec<Option<String>> = df
        .column("Type")?
        .str()?
        .into_iter()
        .map(|s| s.map(str::to_string))
        .collect();
    let kind = match kinds.iter().flatten().find_map(|s| ArcKind::from_label(s)) {
        Some(kind) => kind,
        None => return Ok(Vec::new()),
    };
    let mut columns: Vec<Vec<Option<f64>>> = Vec::new();
    for name in kind.field_names() {
        let series = df
            .column(name)
            .with_context(|| format!("{} table without column {name:?}", kind.label()))?
            .cast(&DataType::Float64)?;
        columns.push(series.f64()?.into_iter().collect());
    }
    let mut arcs = Vec::with_capacity(df.height());
    for (row, label) in kinds.iter().enumerate() {
        if label.as_deref().and_then(ArcKind::from_label) != Some(kind) {
            tracing::warn!(row, label = ?label, "skipping row of another shape");
            continue;
        }
        let values: Option<Vec<f64>> = columns.iter().map(|c| c[row]).collect();
        let values = values.with_context(|| format!("row {row} has empty fields"))?;
        let arc = Arc::from_fields(kind, &values, canvas)
            .with_context(|| format!("row {row} is not a valid arc"))?;
        arcs.push(arc);
    }
    Ok(arcs)
}
