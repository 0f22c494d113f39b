pub mod excel;
pub mod json;

use crate::cli::OutputFormat;
use crate::error::Result;
use picking_sizer_common::{ClassifiedItem, ColumnMapping, FormatParameters, PickingSummary};
use std::path::{Path, PathBuf};

/// 出力に必要な一式
pub struct ExportContext<'a> {
    /// 入力ファイル名（表示用）
    pub source: &'a str,
    /// 元の列順
    pub headers: &'a [String],
    pub mapping: &'a ColumnMapping,
    pub parameters: &'a FormatParameters,
    pub items: &'a [ClassifiedItem],
    pub summary: &'a PickingSummary,
}

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        (
            output.join(format!("{}.json", title)),
            output.join(format!("{}.xlsx", title)),
        )
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        (
            parent.join(format!("{}.json", stem)),
            parent.join(format!("{}.xlsx", stem)),
        )
    }
}

/// 判定結果を出力し、書き出したファイルの一覧を返す
pub fn export_results(
    ctx: &ExportContext<'_>,
    format: &OutputFormat,
    output: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    let written = match format {
        OutputFormat::Json => {
            let path = output_path_for_format(output, title, "json");
            json::write_json(ctx, &path)?;
            vec![path]
        }
        OutputFormat::Excel => {
            let path = output_path_for_format(output, title, "xlsx");
            excel::write_excel(ctx, &path)?;
            vec![path]
        }
        OutputFormat::Both => {
            let (json_path, excel_path) = output_paths_for_both(output, title);
            json::write_json(ctx, &json_path)?;
            excel::write_excel(ctx, &excel_path)?;
            vec![json_path, excel_path]
        }
    };

    for path in &written {
        tracing::info!(path = %path.display(), "result written");
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths_for_both_with_file() {
        let (json, excel) = output_paths_for_both(Path::new("out/resultado.xlsx"), "picking");
        assert_eq!(json, PathBuf::from("out/resultado.json"));
        assert_eq!(excel, PathBuf::from("out/resultado.xlsx"));
    }

    #[test]
    fn test_output_path_for_directory() {
        let path = output_path_for_format(Path::new("out"), "picking", "json");
        assert_eq!(path, PathBuf::from("out/picking.json"));

        let path = output_path_for_format(Path::new("out/r.json"), "picking", "json");
        assert_eq!(path, PathBuf::from("out/r.json"));
    }
}
