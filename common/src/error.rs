//! エラー型定義

use crate::types::Role;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 必須ロールが未マッピングのまま処理しようとした
    #[error("Colunas obrigatórias não mapeadas: {}", format_roles(.0))]
    MissingRoles(Vec<Role>),

    #[error("Valor inválido para o parâmetro '{key}': {value}")]
    InvalidParameter { key: String, value: String },

    #[error("Parâmetro desconhecido: {0}")]
    UnknownParameter(String),
}

fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
