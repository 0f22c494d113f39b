//! 入力データとロールの型定義
//!
//! - Role: 計算に必要な意味的フィールド（列名とは独立）
//! - Scalar: 表計算セルの生の値
//! - Row: 列名 → セル値 の1行分のレコード

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 列マッピングの対象となる意味的フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    ProductCode,
    Department,
    DailyCubicOutput,
    Description,
    Category,
    Supplier,
    Stock,
    Weight,
    Dimensions,
    Price,
}

impl Role {
    /// 分類計算に必須のロール
    pub const REQUIRED: [Role; 3] = [Role::ProductCode, Role::Department, Role::DailyCubicOutput];

    /// 参考情報としてマッピングするだけのロール
    pub const INFORMATIONAL: [Role; 7] = [
        Role::Description,
        Role::Category,
        Role::Supplier,
        Role::Stock,
        Role::Weight,
        Role::Dimensions,
        Role::Price,
    ];

    pub const ALL: [Role; 10] = [
        Role::ProductCode,
        Role::Department,
        Role::DailyCubicOutput,
        Role::Description,
        Role::Category,
        Role::Supplier,
        Role::Stock,
        Role::Weight,
        Role::Dimensions,
        Role::Price,
    ];

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// 設定ファイル・CLIで使う識別子
    pub fn key(&self) -> &'static str {
        match self {
            Role::ProductCode => "productCode",
            Role::Department => "department",
            Role::DailyCubicOutput => "dailyCubicOutput",
            Role::Description => "description",
            Role::Category => "category",
            Role::Supplier => "supplier",
            Role::Stock => "stock",
            Role::Weight => "weight",
            Role::Dimensions => "dimensions",
            Role::Price => "price",
        }
    }

    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Role::ProductCode => "Código do Produto/Material",
            Role::Department => "Departamento/Setor",
            Role::DailyCubicOutput => "Saída Cúbica/Dia",
            Role::Description => "Descrição",
            Role::Category => "Família",
            Role::Supplier => "Fornecedor",
            Role::Stock => "Estoque",
            Role::Weight => "Peso",
            Role::Dimensions => "Dimensões",
            Role::Price => "Preço",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .find(|r| r.key().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// セルの生の値
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl Scalar {
    /// 表示用の文字列に変換（数値は `1001.0` ではなく `1001`）
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Empty => true,
            Scalar::Text(s) => s.trim().is_empty(),
            Scalar::Number(_) => false,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Scalar::Empty
        } else {
            Scalar::Text(value.to_string())
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Scalar::Empty
        } else {
            Scalar::Text(value)
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

/// 1行分のレコード（列名 → 値）
pub type Row = HashMap<String, Scalar>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_required() {
        assert!(Role::ProductCode.is_required());
        assert!(Role::DailyCubicOutput.is_required());
        assert!(!Role::Price.is_required());
        assert_eq!(Role::ALL.len(), Role::REQUIRED.len() + Role::INFORMATIONAL.len());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("dailyCubicOutput".parse::<Role>(), Ok(Role::DailyCubicOutput));
        assert_eq!("PRODUCTCODE".parse::<Role>(), Ok(Role::ProductCode));
        assert!("volume".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_uses_key() {
        let json = serde_json::to_string(&Role::DailyCubicOutput).unwrap();
        assert_eq!(json, "\"dailyCubicOutput\"");
    }

    #[test]
    fn test_scalar_as_text() {
        assert_eq!(Scalar::Number(1001.0).as_text(), "1001");
        assert_eq!(Scalar::Number(0.025492).as_text(), "0.025492");
        assert_eq!(Scalar::Text("Alimentos".into()).as_text(), "Alimentos");
        assert_eq!(Scalar::Empty.as_text(), "");
    }

    #[test]
    fn test_scalar_deserialize_untagged() {
        let row: Row = serde_json::from_str(
            r#"{"Código SKU": "1001", "Volume Diário (m³)": 0.025492, "Obs": null}"#,
        )
        .unwrap();
        assert_eq!(row["Código SKU"], Scalar::Text("1001".into()));
        assert_eq!(row["Volume Diário (m³)"], Scalar::Number(0.025492));
        assert_eq!(row["Obs"], Scalar::Empty);
    }

    #[test]
    fn test_scalar_from_empty_str() {
        assert_eq!(Scalar::from(""), Scalar::Empty);
        assert!(Scalar::Text("  ".into()).is_empty());
    }
}
