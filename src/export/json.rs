//! JSON出力

use super::ExportContext;
use crate::error::Result;
use chrono::Local;
use picking_sizer_common::{
    ClassifiedItem, ColumnMapping, FormatParameters, PickingFormat, PickingSummary, ThresholdTable,
};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRow {
    pub format: PickingFormat,
    pub label: &'static str,
    /// 上限消費量（m³/日）
    pub max_daily_output: f64,
}

/// JSON出力の最上位構造
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub generated_at: String,
    pub source: &'a str,
    pub mapping: &'a ColumnMapping,
    pub parameters: &'a FormatParameters,
    pub thresholds: Vec<ThresholdRow>,
    pub summary: &'a PickingSummary,
    pub items: &'a [ClassifiedItem],
}

impl<'a> ExportDocument<'a> {
    pub fn new(ctx: &ExportContext<'a>) -> Self {
        let table = ThresholdTable::compile(ctx.parameters);
        let thresholds = table
            .thresholds()
            .iter()
            .map(|(format, threshold)| ThresholdRow {
                format: *format,
                label: format.label(),
                max_daily_output: *threshold,
            })
            .collect();

        Self {
            generated_at: Local::now().to_rfc3339(),
            source: ctx.source,
            mapping: ctx.mapping,
            parameters: ctx.parameters,
            thresholds,
            summary: ctx.summary,
            items: ctx.items,
        }
    }
}

pub fn write_json(ctx: &ExportContext<'_>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let document = ExportDocument::new(ctx);
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, json)?;
    Ok(())
}
