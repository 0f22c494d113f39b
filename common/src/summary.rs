//! 判定結果の集計
//!
//! 形式ごとの件数・割合と、部門別の形式分布を算出する。

use crate::batch::ClassifiedItem;
use crate::classifier::PickingFormat;
use serde::Serialize;
use std::collections::BTreeMap;

/// 形式ごとの件数
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatCount {
    pub format: PickingFormat,
    pub count: usize,
    /// 全体に対する割合（%）
    pub percentage: f64,
}

/// 部門ごとの形式分布
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentBreakdown {
    pub department: String,
    pub total: usize,
    pub counts: BTreeMap<PickingFormat, usize>,
}

impl DepartmentBreakdown {
    pub fn count(&self, format: PickingFormat) -> usize {
        self.counts.get(&format).copied().unwrap_or(0)
    }
}

/// 集計結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickingSummary {
    pub total_items: usize,
    /// 表示順（Modulo inteiro → Duplo）で全形式を含む
    pub by_format: Vec<FormatCount>,
    /// 部門名順
    pub by_department: Vec<DepartmentBreakdown>,
}

impl PickingSummary {
    pub fn count(&self, format: PickingFormat) -> usize {
        self.by_format
            .iter()
            .find(|c| c.format == format)
            .map_or(0, |c| c.count)
    }
}

pub fn summarize(items: &[ClassifiedItem]) -> PickingSummary {
    let total_items = items.len();

    let mut format_counts: BTreeMap<PickingFormat, usize> = BTreeMap::new();
    let mut departments: BTreeMap<&str, DepartmentBreakdown> = BTreeMap::new();

    for item in items {
        *format_counts.entry(item.format).or_insert(0) += 1;

        let breakdown = departments
            .entry(item.department.as_str())
            .or_insert_with(|| DepartmentBreakdown {
                department: item.department.clone(),
                ..Default::default()
            });
        breakdown.total += 1;
        *breakdown.counts.entry(item.format).or_insert(0) += 1;
    }

    let by_format = PickingFormat::ALL
        .iter()
        .map(|format| {
            let count = format_counts.get(format).copied().unwrap_or(0);
            let percentage = if total_items == 0 {
                0.0
            } else {
                count as f64 / total_items as f64 * 100.0
            };
            FormatCount {
                format: *format,
                count,
                percentage,
            }
        })
        .collect();

    PickingSummary {
        total_items,
        by_format,
        by_department: departments.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Row;

    fn item(department: &str, format: PickingFormat) -> ClassifiedItem {
        ClassifiedItem {
            fields: Row::new(),
            product_code: String::new(),
            department: department.to_string(),
            daily_cubic_output: 0.0,
            info: BTreeMap::new(),
            format,
        }
    }

    #[test]
    fn test_summarize_counts_and_percentages() {
        let items = vec![
            item("Alimentos", PickingFormat::Wired4P),
            item("Alimentos", PickingFormat::Wired4P),
            item("Bebidas", PickingFormat::FullModule),
            item("Bebidas", PickingFormat::Double),
        ];
        let summary = summarize(&items);

        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.by_format.len(), PickingFormat::ALL.len());
        assert_eq!(summary.count(PickingFormat::Wired4P), 2);
        assert_eq!(summary.count(PickingFormat::HalfPallet), 0);

        let wired = summary
            .by_format
            .iter()
            .find(|c| c.format == PickingFormat::Wired4P)
            .unwrap();
        assert!((wired.percentage - 50.0).abs() < 1e-9);

        let total: f64 = summary.by_format.iter().map(|c| c.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_by_department() {
        let items = vec![
            item("Bebidas", PickingFormat::FullModule),
            item("Alimentos", PickingFormat::Wired4P),
            item("", PickingFormat::Double),
            item("Bebidas", PickingFormat::FullModule),
        ];
        let summary = summarize(&items);

        let names: Vec<&str> = summary
            .by_department
            .iter()
            .map(|d| d.department.as_str())
            .collect();
        assert_eq!(names, vec!["", "Alimentos", "Bebidas"]);

        let bebidas = &summary.by_department[2];
        assert_eq!(bebidas.total, 2);
        assert_eq!(bebidas.count(PickingFormat::FullModule), 2);
        assert_eq!(bebidas.count(PickingFormat::Double), 0);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_items, 0);
        assert!(summary.by_format.iter().all(|c| c.count == 0 && c.percentage == 0.0));
        assert!(summary.by_department.is_empty());
    }
}
