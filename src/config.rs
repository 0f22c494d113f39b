use crate::error::{PickingError, Result};
use picking_sizer_common::{FormatParameters, RoleKeywords};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SHEET_NAME: &str = "Base";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 形式ごとの容量・最大補充間隔
    pub parameters: FormatParameters,
    /// Excel読み込み時に優先するシート名
    pub sheet_name: String,
    /// 参考情報ロール（説明・仕入先など）も検出するか
    pub detect_informational: bool,
    /// ロール別キーワードの上書き（プリセットにマージ）
    pub keywords: RoleKeywords,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parameters: FormatParameters::default(),
            sheet_name: DEFAULT_SHEET_NAME.into(),
            detect_informational: false,
            keywords: RoleKeywords::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PickingError::Config("diretório home não encontrado".into()))?;
        Ok(home.join(".config").join("picking-sizer").join("config.json"))
    }

    /// 検出に使うキーワード（プリセット + 設定の上書き）
    pub fn role_keywords(&self, all_roles: bool) -> RoleKeywords {
        let mut keywords = if all_roles || self.detect_informational {
            RoleKeywords::extended()
        } else {
            RoleKeywords::required()
        };
        keywords.merge(&self.keywords);
        keywords
    }

    /// `KEY=VALUE` 形式でパラメータを更新
    pub fn set_parameter(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            PickingError::Config(format!("use o formato CHAVE=VALOR: {}", assignment))
        })?;
        self.parameters.set(key, value)?;
        Ok(())
    }

    pub fn reset_parameters(&mut self) {
        self.parameters = FormatParameters::default();
    }
}
