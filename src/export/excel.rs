//! Excel出力
//!
//! 「Base」シートに元の全列 + 出庫量 + 判定形式、
//! 「Resumo」シートに形式別・部門別の集計とパラメータを書き出す。

use super::ExportContext;
use crate::error::Result;
use chrono::Local;
use picking_sizer_common::{PickingFormat, Scalar, ThresholdTable};
use rust_xlsxwriter::*;
use std::path::Path;

pub const BASE_SHEET: &str = "Base";
pub const SUMMARY_SHEET: &str = "Resumo";
pub const OUTPUT_COLUMN: &str = "Saída Cúbica/Dia";
pub const FORMAT_COLUMN: &str = "Tipo de Picking";

struct Formats {
    header: Format,
    title: Format,
    decimal: Format,
    percent: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0xF5F5F5))
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::RGB(0xAAAAAA)),
            title: Format::new().set_bold().set_font_size(13.0),
            decimal: Format::new().set_num_format("0.000000"),
            percent: Format::new().set_num_format("0.00\"%\""),
        }
    }
}

/// 追加列の見出し（元の列と重なる場合は `_1`, `_2` … を付ける）
fn unique_header(headers: &[String], taken: &[&str], base: &str) -> String {
    let in_use = |name: &str| headers.iter().any(|h| h == name) || taken.contains(&name);

    let mut name = base.to_string();
    let mut suffix = 1;
    while in_use(&name) {
        name = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    name
}

pub fn write_excel(ctx: &ExportContext<'_>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let formats = Formats::new();
    let mut workbook = Workbook::new();

    write_base_sheet(workbook.add_worksheet(), ctx, &formats)?;
    write_summary_sheet(workbook.add_worksheet(), ctx, &formats)?;

    workbook.save(path)?;
    Ok(())
}

fn write_base_sheet(sheet: &mut Worksheet, ctx: &ExportContext<'_>, formats: &Formats) -> Result<()> {
    sheet.set_name(BASE_SHEET)?;

    let output_col = ctx.headers.len() as u16;
    let format_col = output_col + 1;
    let output_header = unique_header(ctx.headers, &[], OUTPUT_COLUMN);
    let format_header = unique_header(ctx.headers, &[output_header.as_str()], FORMAT_COLUMN);

    for (col, header) in ctx.headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header.as_str(), &formats.header)?;
    }
    sheet.write_string_with_format(0, output_col, output_header, &formats.header)?;
    sheet.write_string_with_format(0, format_col, format_header, &formats.header)?;

    for (idx, item) in ctx.items.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, header) in ctx.headers.iter().enumerate() {
            match item.fields.get(header) {
                Some(Scalar::Number(n)) if n.is_finite() => {
                    sheet.write_number(row, col as u16, *n)?;
                }
                Some(Scalar::Number(_)) | Some(Scalar::Empty) | None => {}
                Some(Scalar::Text(s)) => {
                    sheet.write_string(row, col as u16, s.as_str())?;
                }
            }
        }
        sheet.write_number_with_format(row, output_col, item.daily_cubic_output, &formats.decimal)?;
        sheet.write_string(row, format_col, item.format.label())?;
    }

    sheet.set_column_width(output_col, 18.0)?;
    sheet.set_column_width(format_col, 16.0)?;
    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    ctx: &ExportContext<'_>,
    formats: &Formats,
) -> Result<()> {
    sheet.set_name(SUMMARY_SHEET)?;
    sheet.set_column_width(0, 28.0)?;

    let summary = ctx.summary;
    let mut row: u32 = 0;

    sheet.write_string_with_format(row, 0, "Dimensionamento de Picking", &formats.title)?;
    row += 1;
    sheet.write_string(row, 0, "Arquivo")?;
    sheet.write_string(row, 1, ctx.source)?;
    row += 1;
    sheet.write_string(row, 0, "Gerado em")?;
    sheet.write_string(row, 1, Local::now().format("%Y-%m-%d %H:%M:%S").to_string())?;
    row += 1;
    sheet.write_string(row, 0, "Total de Itens")?;
    sheet.write_number(row, 1, summary.total_items as f64)?;
    row += 2;

    // 形式別
    for (col, title) in ["Tipo de Picking", "Quantidade", "Percentual"].iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *title, &formats.header)?;
    }
    row += 1;
    for count in &summary.by_format {
        sheet.write_string(row, 0, count.format.label())?;
        sheet.write_number(row, 1, count.count as f64)?;
        sheet.write_number_with_format(row, 2, count.percentage, &formats.percent)?;
        row += 1;
    }
    row += 1;

    // 部門別
    sheet.write_string_with_format(row, 0, "Departamento", &formats.header)?;
    for (idx, format) in PickingFormat::ALL.iter().enumerate() {
        sheet.write_string_with_format(row, idx as u16 + 1, format.label(), &formats.header)?;
    }
    let total_col = PickingFormat::ALL.len() as u16 + 1;
    sheet.write_string_with_format(row, total_col, "Total", &formats.header)?;
    row += 1;
    for breakdown in &summary.by_department {
        let name = if breakdown.department.is_empty() {
            "(sem departamento)"
        } else {
            breakdown.department.as_str()
        };
        sheet.write_string(row, 0, name)?;
        for (idx, format) in PickingFormat::ALL.iter().enumerate() {
            sheet.write_number(row, idx as u16 + 1, breakdown.count(*format) as f64)?;
        }
        sheet.write_number(row, total_col, breakdown.total as f64)?;
        row += 1;
    }
    row += 1;

    // パラメータ
    let table = ThresholdTable::compile(ctx.parameters);
    for (col, title) in ["Parâmetro", "Valor"].iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *title, &formats.header)?;
    }
    row += 1;
    for (key, value) in ctx.parameters.to_labeled() {
        sheet.write_string(row, 0, key.as_str())?;
        sheet.write_number(row, 1, value)?;
        row += 1;
    }
    for (format, threshold) in table.thresholds() {
        sheet.write_string(row, 0, format!("{} - Consumo MÁX (m³/dia)", format.label()))?;
        if threshold.is_finite() {
            sheet.write_number_with_format(row, 1, *threshold, &formats.decimal)?;
        } else {
            sheet.write_string(row, 1, "-")?;
        }
        row += 1;
    }

    Ok(())
}
