//! ロール別キーワード定義
//!
//! 列名の自動検出に使うキーワード集合。プリセットと設定ファイルからの上書きをマージして使う。

use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 1ロール分のキーワード（小文字で保持）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(value: Vec<String>) -> Self {
        Self::new(value)
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(value: KeywordSet) -> Self {
        value.0
    }
}

/// ロール → キーワード集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleKeywords(BTreeMap<Role, KeywordSet>);

impl RoleKeywords {
    /// 必須3ロールのキーワード
    pub fn required() -> Self {
        let mut keywords = Self::default();
        keywords.insert(
            Role::ProductCode,
            KeywordSet::new(["cod", "código", "sku", "id", "produto", "material", "item"]),
        );
        keywords.insert(
            Role::Department,
            KeywordSet::new(["depart", "setor", "área", "categoria", "grupo", "mercearia"]),
        );
        keywords.insert(
            Role::DailyCubicOutput,
            KeywordSet::new(["saída", "cubica", "m³/dia", "volume", "consumo", "saida cubica"]),
        );
        keywords
    }

    /// 必須ロール + 参考情報ロール
    pub fn extended() -> Self {
        let mut keywords = Self::required();
        keywords.insert(
            Role::Description,
            KeywordSet::new(["descr", "descrição", "descricao", "nome", "description"]),
        );
        keywords.insert(
            Role::Category,
            KeywordSet::new(["família", "familia", "classe", "linha", "category"]),
        );
        keywords.insert(
            Role::Supplier,
            KeywordSet::new(["fornecedor", "fabricante", "marca", "supplier", "vendor"]),
        );
        keywords.insert(
            Role::Stock,
            KeywordSet::new(["estoque", "saldo", "stock", "inventário"]),
        );
        keywords.insert(Role::Weight, KeywordSet::new(["peso", "weight", "peso bruto"]));
        keywords.insert(
            Role::Dimensions,
            KeywordSet::new(["dimens", "medida", "altura", "largura", "comprimento"]),
        );
        keywords.insert(
            Role::Price,
            KeywordSet::new(["preço", "preco", "valor", "custo", "price"]),
        );
        keywords
    }

    pub fn insert(&mut self, role: Role, keywords: KeywordSet) {
        self.0.insert(role, keywords);
    }

    /// 設定をマージ（後から追加した設定が優先）
    pub fn merge(&mut self, other: &RoleKeywords) {
        self.0.extend(other.0.clone());
    }

    pub fn get(&self, role: Role) -> Option<&KeywordSet> {
        self.0.get(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &KeywordSet)> {
        self.0.iter().map(|(role, set)| (*role, set))
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_set_lowercases() {
        let set = KeywordSet::new(["SKU", " Código ", ""]);
        let keywords: Vec<&str> = set.iter().collect();
        assert_eq!(keywords, vec!["sku", "código"]);
    }

    #[test]
    fn test_required_covers_required_roles() {
        let keywords = RoleKeywords::required();
        for role in Role::REQUIRED {
            assert!(keywords.get(role).is_some_and(|k| !k.is_empty()));
        }
        assert!(keywords.get(Role::Price).is_none());
    }

    #[test]
    fn test_extended_covers_all_roles() {
        let keywords = RoleKeywords::extended();
        assert_eq!(keywords.roles().count(), Role::ALL.len());
    }

    #[test]
    fn test_merge_overrides() {
        let mut keywords = RoleKeywords::required();
        let mut custom = RoleKeywords::default();
        custom.insert(Role::Department, KeywordSet::new(["Seção"]));
        keywords.merge(&custom);

        let department: Vec<&str> = keywords.get(Role::Department).unwrap().iter().collect();
        assert_eq!(department, vec!["seção"]);
        assert!(keywords.get(Role::ProductCode).is_some());
    }

    #[test]
    fn test_deserialize_lowercases() {
        let keywords: RoleKeywords =
            serde_json::from_str(r#"{"dailyCubicOutput": ["Vazão", "M3 DIA"]}"#).unwrap();
        let set: Vec<&str> = keywords.get(Role::DailyCubicOutput).unwrap().iter().collect();
        assert_eq!(set, vec!["vazão", "m3 dia"]);
    }
}
