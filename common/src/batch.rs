//! バッチ処理モジュール
//!
//! 確定した列マッピングを全行に適用し、出庫量を数値化して形式を判定する。
//!
//! ## 数値化ポリシー
//! 文字列は前後の空白を除き、小数点のカンマを `.` に置き換えて、
//! 先頭の数値部分だけを解析する（`"0,5 m³"` → 0.5）。
//! 数値で始まらない値・空セル・非有限値はすべて 0 として扱う（= Duplo）。

use crate::classifier::{FormatParameters, PickingFormat, ThresholdTable};
use crate::error::Result;
use crate::matcher::ColumnMapping;
use crate::types::{Role, Row, Scalar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 判定済みの品目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedItem {
    /// 元の行（全フィールド保持）
    pub fields: Row,
    pub product_code: String,
    pub department: String,
    pub daily_cubic_output: f64,
    /// 参考情報ロールの値（マッピングされたもののみ）
    #[serde(default)]
    pub info: BTreeMap<Role, String>,
    pub format: PickingFormat,
}

/// セル値を出庫量（m³/日）に変換
pub fn parse_numeric(value: &Scalar) -> f64 {
    let parsed = match value {
        Scalar::Number(n) => Some(*n),
        Scalar::Text(s) => leading_float(&s.trim().replace(',', ".")),
        Scalar::Empty => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// 先頭から数値として読める最長部分を解析（単位などの後続文字は無視）
fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn text_field(row: &Row, column: Option<&str>) -> String {
    column
        .and_then(|c| row.get(c))
        .map(|v| v.as_text().trim().to_string())
        .unwrap_or_default()
}

fn classify_row(row: &Row, mapping: &ColumnMapping, table: &ThresholdTable) -> ClassifiedItem {
    let daily_cubic_output = mapping
        .column(Role::DailyCubicOutput)
        .and_then(|c| row.get(c))
        .map(parse_numeric)
        .unwrap_or(0.0);

    let info = Role::INFORMATIONAL
        .iter()
        .filter_map(|role| {
            let column = mapping.column(*role)?;
            Some((*role, text_field(row, Some(column))))
        })
        .collect();

    ClassifiedItem {
        fields: row.clone(),
        product_code: text_field(row, mapping.column(Role::ProductCode)),
        department: text_field(row, mapping.column(Role::Department)),
        daily_cubic_output,
        info,
        format: table.classify(daily_cubic_output),
    }
}

/// 全行を判定する
///
/// 必須ロールが未マッピングなら1行も処理せず `Error::MissingRoles` を返す。
/// 出力は入力と同じ件数・同じ順序。
pub fn process_batch(
    rows: &[Row],
    mapping: &ColumnMapping,
    params: &FormatParameters,
) -> Result<Vec<ClassifiedItem>> {
    mapping.validate()?;

    let table = ThresholdTable::compile(params);
    tracing::debug!(rows = rows.len(), thresholds = ?table.thresholds(), "processing batch");

    #[cfg(feature = "parallel")]
    let items = {
        use rayon::prelude::*;
        rows.par_iter()
            .map(|row| classify_row(row, mapping, &table))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let items = rows
        .iter()
        .map(|row| classify_row(row, mapping, &table))
        .collect();

    Ok(items)
}

/// パラメータ変更後に形式だけを再判定する（マッピング・数値化はやり直さない）
pub fn reclassify(items: &mut [ClassifiedItem], params: &FormatParameters) {
    let table = ThresholdTable::compile(params);
    for item in items.iter_mut() {
        item.format = table.classify(item.daily_cubic_output);
    }
}
