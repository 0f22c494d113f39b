//! 対話式列マッピング確認モジュール
//!
//! 自動検出結果をロールごとに提示し、ユーザーが列を選び直せるようにする。
//! 必須ロールが未マッピングのままでは確定できない。

use crate::error::{PickingError, Result};
use dialoguer::{Confirm, Select};
use picking_sizer_common::{ColumnMapping, Role};

/// 「マッピングしない」を表す選択肢
pub const UNMAPPED_OPTION: &str = "(não mapear)";

/// 選択肢一覧（先頭は未マッピング）
pub fn role_options(headers: &[String]) -> Vec<String> {
    std::iter::once(UNMAPPED_OPTION.to_string())
        .chain(headers.iter().cloned())
        .collect()
}

/// 現在のマッピングに対応する選択肢番号
pub fn default_selection(mapping: &ColumnMapping, role: Role, headers: &[String]) -> usize {
    mapping
        .column(role)
        .and_then(|column| headers.iter().position(|h| h == column))
        .map_or(0, |idx| idx + 1)
}

/// 選択結果を反映する
///
/// 現在と同じ列を選んだ場合は自動検出フラグを維持する。
pub fn apply_selection(
    mapping: ColumnMapping,
    role: Role,
    headers: &[String],
    selection: usize,
) -> ColumnMapping {
    let selected = selection
        .checked_sub(1)
        .and_then(|idx| headers.get(idx))
        .cloned();

    if selected.as_deref() == mapping.column(role) {
        return mapping;
    }
    mapping.with_manual(role, selected)
}

/// CLIで指定された列を手動マッピングとして反映
///
/// 見出しに存在しない列名は `UnknownColumn` で拒否する。
pub fn apply_column_overrides(
    mapping: ColumnMapping,
    headers: &[String],
    overrides: &[(Role, Option<String>)],
) -> Result<ColumnMapping> {
    overrides
        .iter()
        .try_fold(mapping, |mapping, (role, column)| match column {
            Some(column) if !headers.iter().any(|h| h == column) => {
                Err(PickingError::UnknownColumn(column.clone()))
            }
            Some(column) => Ok(mapping.with_manual(*role, Some(column.clone()))),
            None => Ok(mapping),
        })
}

/// マッピング1行分の表示文字列
pub fn describe_entry(mapping: &ColumnMapping, role: Role) -> String {
    let marker = if role.is_required() { "*" } else { " " };
    match mapping.column(role) {
        Some(column) if mapping.is_auto_detected(role) => {
            format!("{}{}: {} (auto)", marker, role.label(), column)
        }
        Some(column) => format!("{}{}: {}", marker, role.label(), column),
        None => format!("{}{}: -", marker, role.label()),
    }
}

pub fn print_mapping(mapping: &ColumnMapping, roles: &[Role]) {
    for role in roles {
        println!("  {}", describe_entry(mapping, *role));
    }
}

/// 対話式でマッピングを確認・編集
pub fn confirm_mapping_interactive(
    headers: &[String],
    mapping: ColumnMapping,
    roles: &[Role],
) -> Result<ColumnMapping> {
    let options = role_options(headers);
    let mut mapping = mapping;

    loop {
        println!("\n🗂  Mapeamento de colunas (* = obrigatória, auto = detectada):");
        print_mapping(&mapping, roles);
        println!();

        for role in roles {
            let selection = Select::new()
                .with_prompt(role.label())
                .items(&options)
                .default(default_selection(&mapping, *role, headers))
                .interact()?;
            mapping = apply_selection(mapping, *role, headers, selection);
        }

        let missing = mapping.missing_required();
        if missing.is_empty() {
            return Ok(mapping);
        }

        let names: Vec<&str> = missing.iter().map(|r| r.label()).collect();
        println!("⚠ Colunas obrigatórias não mapeadas: {}", names.join(", "));

        let retry = Confirm::new()
            .with_prompt("Refazer o mapeamento?")
            .default(true)
            .interact()?;
        if !retry {
            return Err(PickingError::MappingCancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picking_sizer_common::{match_columns, RoleKeywords};

    fn headers() -> Vec<String> {
        ["Código SKU", "Categoria", "Volume Diário (m³)", "Setor"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_role_options() {
        let options = role_options(&headers());
        assert_eq!(options[0], UNMAPPED_OPTION);
        assert_eq!(options.len(), 5);
    }

    #[test]
    fn test_default_selection() {
        let hs = headers();
        let mapping = match_columns(&hs, &RoleKeywords::required());
        assert_eq!(default_selection(&mapping, Role::ProductCode, &hs), 1);
        assert_eq!(default_selection(&mapping, Role::DailyCubicOutput, &hs), 3);
        assert_eq!(default_selection(&mapping, Role::Price, &hs), 0);
    }

    #[test]
    fn test_apply_selection_same_column_keeps_auto_flag() {
        let hs = headers();
        let mapping = match_columns(&hs, &RoleKeywords::required());
        let mapping = apply_selection(mapping, Role::Department, &hs, 2);
        assert!(mapping.is_auto_detected(Role::Department));
    }

    #[test]
    fn test_apply_selection_changes_column() {
        let hs = headers();
        let mapping = match_columns(&hs, &RoleKeywords::required());

        let mapping = apply_selection(mapping, Role::Department, &hs, 4);
        assert_eq!(mapping.column(Role::Department), Some("Setor"));
        assert!(!mapping.is_auto_detected(Role::Department));

        let mapping = apply_selection(mapping, Role::ProductCode, &hs, 0);
        assert_eq!(mapping.column(Role::ProductCode), None);
        assert_eq!(mapping.missing_required(), vec![Role::ProductCode]);
    }

    #[test]
    fn test_apply_column_overrides() {
        let hs = headers();
        let mapping = match_columns(&hs, &RoleKeywords::required());

        let mapping = apply_column_overrides(
            mapping,
            &hs,
            &[(Role::Department, Some("Setor".into())), (Role::ProductCode, None)],
        )
        .unwrap();
        assert_eq!(mapping.column(Role::Department), Some("Setor"));
        assert!(mapping.entry(Role::Department).unwrap().is_manual());
        assert!(mapping.is_auto_detected(Role::ProductCode));

        let result = apply_column_overrides(
            mapping,
            &hs,
            &[(Role::DailyCubicOutput, Some("Inexistente".into()))],
        );
        assert!(matches!(result, Err(PickingError::UnknownColumn(c)) if c == "Inexistente"));
    }

    #[test]
    fn test_describe_entry() {
        let hs = headers();
        let mapping = match_columns(&hs, &RoleKeywords::required())
            .with_manual(Role::Department, Some("Setor".to_string()));

        assert_eq!(
            describe_entry(&mapping, Role::ProductCode),
            "*Código do Produto/Material: Código SKU (auto)"
        );
        assert_eq!(describe_entry(&mapping, Role::Department), "*Departamento/Setor: Setor");
        assert_eq!(describe_entry(&mapping, Role::Price), " Preço: -");
    }
}
