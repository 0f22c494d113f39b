//! ピッキング形式判定モジュール
//!
//! 1日あたりの出庫体積（m³/日）と形式ごとの容量・最大補充間隔から、
//! 品目を5種類のピッキング形式のいずれかに割り当てる。
//!
//! ## 判定ルール
//! 形式ごとの上限消費量 = 容量 / 最大補充間隔（日）。
//! 容量の大きい順（Módulo Inteiro → Meio Palete → 4P → 8P）に比較し、
//! 出庫量が上限を **厳密に** 超えた最初の形式を採用。どれも超えなければ Duplo。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// ピッキング形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickingFormat {
    FullModule,
    HalfPallet,
    Wired4P,
    Wired8P,
    Double,
}

impl PickingFormat {
    /// 判定順（しきい値を持つ形式のみ）
    pub const LADDER: [PickingFormat; 4] = [
        PickingFormat::FullModule,
        PickingFormat::HalfPallet,
        PickingFormat::Wired4P,
        PickingFormat::Wired8P,
    ];

    /// 表示順（判定順 + フォールバック）
    pub const ALL: [PickingFormat; 5] = [
        PickingFormat::FullModule,
        PickingFormat::HalfPallet,
        PickingFormat::Wired4P,
        PickingFormat::Wired8P,
        PickingFormat::Double,
    ];

    /// 倉庫で使われている表記
    pub fn label(&self) -> &'static str {
        match self {
            PickingFormat::FullModule => "Modulo inteiro",
            PickingFormat::HalfPallet => "Meio palete",
            PickingFormat::Wired4P => "4P - Aramado",
            PickingFormat::Wired8P => "8P - Aramado",
            PickingFormat::Double => "Duplo",
        }
    }

    /// パラメータ名の接頭辞（例: "Meio Palete - Cubagem (m³)"）
    fn parameter_prefix(&self) -> Option<&'static str> {
        match self {
            PickingFormat::FullModule => Some("Módulo Inteiro"),
            PickingFormat::HalfPallet => Some("Meio Palete"),
            PickingFormat::Wired4P => Some("4P Aramado"),
            PickingFormat::Wired8P => Some("8P Aramado"),
            PickingFormat::Double => None,
        }
    }

    /// 大きさの段階（Duplo = 0 … Modulo inteiro = 4）
    pub fn tier(&self) -> u8 {
        match self {
            PickingFormat::Double => 0,
            PickingFormat::Wired8P => 1,
            PickingFormat::Wired4P => 2,
            PickingFormat::HalfPallet => 3,
            PickingFormat::FullModule => 4,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|f| {
            f.label().eq_ignore_ascii_case(label) || format!("{:?}", f).eq_ignore_ascii_case(label)
        })
    }
}

impl std::fmt::Display for PickingFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 1形式分のパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSpec {
    /// 容量（m³）
    pub capacity: f64,
    /// 最大補充間隔（日）
    pub max_replenishment_days: f64,
}

impl FormatSpec {
    pub const fn new(capacity: f64, max_replenishment_days: f64) -> Self {
        Self {
            capacity,
            max_replenishment_days,
        }
    }

    /// 補充間隔内で支えられる1日あたりの最大消費量
    ///
    /// 補充間隔 0 は無限大になり、その形式は選ばれない。
    pub fn max_sustained_consumption(&self) -> f64 {
        self.capacity / self.max_replenishment_days
    }
}

/// 形式パラメータ表（Duplo はしきい値なし）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatParameters {
    pub full_module: FormatSpec,
    pub half_pallet: FormatSpec,
    #[serde(rename = "wired4P")]
    pub wired_4p: FormatSpec,
    #[serde(rename = "wired8P")]
    pub wired_8p: FormatSpec,
}

impl Default for FormatParameters {
    fn default() -> Self {
        Self {
            full_module: FormatSpec::new(1.72, 3.0),
            half_pallet: FormatSpec::new(0.86, 12.0),
            wired_4p: FormatSpec::new(0.215, 18.0),
            wired_8p: FormatSpec::new(0.1075, 24.0),
        }
    }
}

const CAPACITY_SUFFIX: &str = "Cubagem (m³)";
const DAYS_SUFFIX: &str = "Freq. MÁX Abast (dias)";
/// 判定には使わない項目（パラメータ表には含まれる）
const POSITIONS_SUFFIX: &str = "Posições/Endereço";
const DOUBLE_PREFIX: &str = "Duplo";

#[derive(Clone, Copy)]
enum Field {
    Capacity,
    Days,
}

impl FormatParameters {
    pub fn spec(&self, format: PickingFormat) -> Option<&FormatSpec> {
        match format {
            PickingFormat::FullModule => Some(&self.full_module),
            PickingFormat::HalfPallet => Some(&self.half_pallet),
            PickingFormat::Wired4P => Some(&self.wired_4p),
            PickingFormat::Wired8P => Some(&self.wired_8p),
            PickingFormat::Double => None,
        }
    }

    fn spec_mut(&mut self, format: PickingFormat) -> Option<&mut FormatSpec> {
        match format {
            PickingFormat::FullModule => Some(&mut self.full_module),
            PickingFormat::HalfPallet => Some(&mut self.half_pallet),
            PickingFormat::Wired4P => Some(&mut self.wired_4p),
            PickingFormat::Wired8P => Some(&mut self.wired_8p),
            PickingFormat::Double => None,
        }
    }

    /// ラベル付きキー一覧（判定順、容量 → 補充間隔）
    pub fn labeled_keys() -> Vec<String> {
        PickingFormat::LADDER
            .iter()
            .filter_map(|f| f.parameter_prefix())
            .flat_map(|prefix| {
                [
                    format!("{} - {}", prefix, CAPACITY_SUFFIX),
                    format!("{} - {}", prefix, DAYS_SUFFIX),
                ]
            })
            .collect()
    }

    fn resolve_key(key: &str) -> Option<(PickingFormat, Field)> {
        let key = key.trim();
        PickingFormat::LADDER.into_iter().find_map(|format| {
            let prefix = format.parameter_prefix()?;
            if key.eq_ignore_ascii_case(&format!("{} - {}", prefix, CAPACITY_SUFFIX)) {
                Some((format, Field::Capacity))
            } else if key.eq_ignore_ascii_case(&format!("{} - {}", prefix, DAYS_SUFFIX)) {
                Some((format, Field::Days))
            } else {
                None
            }
        })
    }

    /// パラメータ表にあるが判定に使わないキー（Duplo の値・位置数）
    fn is_unused_key(key: &str) -> bool {
        let key = key.trim();
        let positions = PickingFormat::LADDER
            .iter()
            .filter_map(|f| f.parameter_prefix())
            .chain([DOUBLE_PREFIX])
            .any(|prefix| key.eq_ignore_ascii_case(&format!("{} - {}", prefix, POSITIONS_SUFFIX)));
        let double = [CAPACITY_SUFFIX, DAYS_SUFFIX]
            .iter()
            .any(|suffix| key.eq_ignore_ascii_case(&format!("{} - {}", DOUBLE_PREFIX, suffix)));
        positions || double
    }

    /// ラベル付きの値表から構築（欠けているキーは既定値）
    pub fn from_labeled(values: &HashMap<String, f64>) -> Self {
        let mut params = Self::default();
        for (key, value) in values {
            match Self::resolve_key(key) {
                Some((format, field)) => params.assign(format, field, *value),
                None if Self::is_unused_key(key) => {
                    tracing::debug!(key = %key, "picking parameter not used for classification")
                }
                None => tracing::warn!(key = %key, "unknown picking parameter ignored"),
            }
        }
        params
    }

    /// ラベル付きの値表に変換
    pub fn to_labeled(&self) -> Vec<(String, f64)> {
        PickingFormat::LADDER
            .iter()
            .filter_map(|f| Some((f.parameter_prefix()?, self.spec(*f)?)))
            .flat_map(|(prefix, spec)| {
                [
                    (format!("{} - {}", prefix, CAPACITY_SUFFIX), spec.capacity),
                    (format!("{} - {}", prefix, DAYS_SUFFIX), spec.max_replenishment_days),
                ]
            })
            .collect()
    }

    /// ユーザー入力の文字列で1項目を更新
    ///
    /// 小数点のカンマを受け付ける。数値でない値・負の値は拒否し、元の値を保つ。
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let (format, field) =
            Self::resolve_key(key).ok_or_else(|| Error::UnknownParameter(key.to_string()))?;

        let value = raw
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| Error::InvalidParameter {
                key: key.to_string(),
                value: raw.to_string(),
            })?;

        self.assign(format, field, value);
        Ok(())
    }

    fn assign(&mut self, format: PickingFormat, field: Field, value: f64) {
        if let Some(spec) = self.spec_mut(format) {
            match field {
                Field::Capacity => spec.capacity = value,
                Field::Days => spec.max_replenishment_days = value,
            }
        }
    }
}

/// 事前計算済みのしきい値表
///
/// パラメータ1セットにつき1回だけ構築し、バッチ全体で使い回す。
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    steps: [(PickingFormat, f64); 4],
}

impl ThresholdTable {
    pub fn compile(params: &FormatParameters) -> Self {
        let step = |format: PickingFormat, spec: &FormatSpec| (format, spec.max_sustained_consumption());
        Self {
            steps: [
                step(PickingFormat::FullModule, &params.full_module),
                step(PickingFormat::HalfPallet, &params.half_pallet),
                step(PickingFormat::Wired4P, &params.wired_4p),
                step(PickingFormat::Wired8P, &params.wired_8p),
            ],
        }
    }

    /// 判定順の (形式, 上限消費量)
    pub fn thresholds(&self) -> &[(PickingFormat, f64)] {
        &self.steps
    }

    pub fn threshold(&self, format: PickingFormat) -> Option<f64> {
        self.steps
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, t)| *t)
    }

    /// 出庫量を形式に割り当てる
    ///
    /// NaN はどのしきい値も超えないため Duplo になる。
    pub fn classify(&self, daily_cubic_output: f64) -> PickingFormat {
        self.steps
            .iter()
            .find(|(_, threshold)| daily_cubic_output > *threshold)
            .map(|(format, _)| *format)
            .unwrap_or(PickingFormat::Double)
    }
}

/// 1品目を判定する
pub fn classify(daily_cubic_output: f64, params: &FormatParameters) -> PickingFormat {
    ThresholdTable::compile(params).classify(daily_cubic_output)
}
