use super::{is_blank_row, normalize_headers, Sheet};
use crate::error::{PickingError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use picking_sizer_common::{Row, Scalar};
use std::path::Path;

/// セル値を Scalar に変換（数値は数値のまま、その他は文字列）
pub fn cell_to_scalar(cell: &Data) -> Scalar {
    match cell {
        Data::Empty => Scalar::Empty,
        Data::Int(i) => Scalar::Number(*i as f64),
        Data::Float(f) => Scalar::Number(*f),
        Data::String(s) => Scalar::from(s.trim()),
        other => Scalar::from(other.to_string().trim()),
    }
}

/// Excel を読み込む
///
/// `preferred_sheet` と同名（大文字小文字無視）のシートを優先し、なければ先頭シート。
/// 1行目を見出しとする。
pub fn read_excel(path: &Path, preferred_sheet: &str) -> Result<Sheet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .iter()
        .find(|name| name.eq_ignore_ascii_case(preferred_sheet))
        .or_else(|| sheet_names.first())
        .cloned()
        .ok_or_else(|| PickingError::SheetRead("a pasta de trabalho não tem planilhas".into()))?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter
        .next()
        .ok_or_else(|| PickingError::SheetRead(format!("a planilha '{}' está vazia", sheet_name)))?;

    let headers = normalize_headers(header_row.iter().map(|cell| cell.to_string()));

    let mut rows = Vec::new();
    for data_row in rows_iter {
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = data_row.get(idx).map(cell_to_scalar).unwrap_or_default();
                (header.clone(), value)
            })
            .collect();

        if is_blank_row(&row) {
            continue;
        }
        rows.push(row);
    }

    Ok(Sheet {
        name: Some(sheet_name),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_scalar() {
        assert_eq!(cell_to_scalar(&Data::Empty), Scalar::Empty);
        assert_eq!(cell_to_scalar(&Data::Int(1001)), Scalar::Number(1001.0));
        assert_eq!(cell_to_scalar(&Data::Float(0.025492)), Scalar::Number(0.025492));
        assert_eq!(
            cell_to_scalar(&Data::String(" Alimentos ".into())),
            Scalar::Text("Alimentos".into())
        );
        assert_eq!(cell_to_scalar(&Data::String("".into())), Scalar::Empty);
        assert_eq!(cell_to_scalar(&Data::Bool(true)), Scalar::Text("true".into()));
    }
}
