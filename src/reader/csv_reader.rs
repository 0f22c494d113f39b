use super::{is_blank_row, normalize_headers, Sheet};
use crate::error::{PickingError, Result};
use csv::ReaderBuilder;
use picking_sizer_common::{Row, Scalar};
use std::io::{BufRead, BufReader};
use std::path::Path;

const CANDIDATE_DELIMITERS: [u8; 3] = [b';', b',', b'\t'];

/// 見出し行から区切り文字を推定（`;` / `,` / タブ、既定は `,`）
///
/// 小数点にカンマを使うファイルは `;` 区切りが多い。
pub fn detect_delimiter(header_line: &str) -> u8 {
    CANDIDATE_DELIMITERS
        .iter()
        .map(|d| (*d, header_line.bytes().filter(|b| b == d).count()))
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

fn read_header_line(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// CSV を読み込む
///
/// セルは文字列のまま保持する（数値化はマッピング後に行う）。
/// UTF-8 でないバイトは置換文字に変換する。
pub fn read_csv(path: &Path) -> Result<Sheet> {
    let delimiter = detect_delimiter(&read_header_line(path)?);
    tracing::debug!(delimiter = %(delimiter as char), "csv delimiter detected");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)?;

    let raw_headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    if raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(PickingError::SheetRead("linha de cabeçalho ausente".into()));
    }
    let headers = normalize_headers(&raw_headers);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record
                    .get(idx)
                    .map(|v| String::from_utf8_lossy(v).trim().to_string())
                    .unwrap_or_default();
                (header.clone(), Scalar::from(value))
            })
            .collect();

        if is_blank_row(&row) {
            continue;
        }
        rows.push(row);
    }

    Ok(Sheet {
        name: None,
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn csv_file() -> NamedTempFile {
        Builder::new().suffix(".csv").tempfile().unwrap()
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("Código;Setor;Saída"), b';');
        assert_eq!(detect_delimiter("Código,Setor,Saída"), b',');
        assert_eq!(detect_delimiter("Código\tSetor\tSaída"), b'\t');
        assert_eq!(detect_delimiter("Código"), b',');
    }

    #[test]
    fn test_read_csv_semicolon_decimal_comma() {
        let mut file = csv_file();
        writeln!(file, "Código;Setor;Saída Cúbica/Dia").unwrap();
        writeln!(file, "1001;Alimentos;0,025492").unwrap();
        writeln!(file, ";;").unwrap();
        writeln!(file, "1002;Bebidas").unwrap();

        let sheet = read_csv(file.path()).unwrap();
        assert_eq!(sheet.headers, vec!["Código", "Setor", "Saída Cúbica/Dia"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0]["Saída Cúbica/Dia"], Scalar::Text("0,025492".into()));
        // 列が足りない行は空セル扱い
        assert_eq!(sheet.rows[1]["Saída Cúbica/Dia"], Scalar::Empty);
    }

    #[test]
    fn test_read_csv_header_only() {
        let mut file = csv_file();
        writeln!(file, "SKU,Setor,Volume").unwrap();

        let sheet = read_csv(file.path()).unwrap();
        assert_eq!(sheet.headers.len(), 3);
        assert!(sheet.rows.is_empty());
    }
}
