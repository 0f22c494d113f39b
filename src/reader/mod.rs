//! 表計算読み込みモジュール
//!
//! CSV / Excel を読み込み、見出し（列名の並び）と行レコードに変換する。
//! 列の意味づけ（マッピング）はここでは行わない。

mod csv_reader;
mod excel_reader;

pub use csv_reader::{detect_delimiter, read_csv};
pub use excel_reader::{cell_to_scalar, read_excel};

use crate::error::{PickingError, Result};
use picking_sizer_common::Row;
use std::collections::HashSet;
use std::path::Path;

/// 読み込んだ表
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    /// 読み込んだシート名（CSVは None）
    pub name: Option<String>,
    /// 見出し（出現順、重複なし）
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// 拡張子に応じて CSV / Excel を読み込む
///
/// Excel は `preferred_sheet` と同名のシートを優先し、なければ先頭シート。
pub fn read_sheet(path: &Path, preferred_sheet: &str) -> Result<Sheet> {
    if !path.exists() {
        return Err(PickingError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let sheet = match ext.as_str() {
        "csv" | "txt" => read_csv(path)?,
        e if EXCEL_EXTENSIONS.contains(&e) => read_excel(path, preferred_sheet)?,
        _ => return Err(PickingError::UnsupportedFormat(ext)),
    };

    tracing::info!(
        path = %path.display(),
        sheet = sheet.name.as_deref().unwrap_or("-"),
        columns = sheet.headers.len(),
        rows = sheet.rows.len(),
        "sheet loaded"
    );
    Ok(sheet)
}

/// 見出しを正規化する
///
/// - 前後の空白を除去
/// - 空の見出しは `Unnamed: <列番号>`
/// - 重複した見出しは `_1`, `_2` … を付けて一意にする
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();

    for (idx, header) in raw.into_iter().enumerate() {
        let trimmed = header.as_ref().trim().trim_start_matches('\u{feff}').trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            trimmed.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}

/// すべてのセルが空の行か
fn is_blank_row(row: &Row) -> bool {
    row.values().all(|v| v.is_empty())
}
