//! 列名自動検出モジュール
//!
//! 表計算の見出し（列名）とロール別キーワードを文字列類似度で照合し、
//! ロールごとに最も一致する列を提案する。
//!
//! ## スコア
//! キーワード1つごとに以下のいずれかを加算（合計、最大値ではない）:
//! - 完全一致（大文字小文字無視）: 10
//! - 部分一致（見出しがキーワードを含む）: 5
//! - 編集距離 2 以下: 3
//!
//! 最高スコアの見出しを採用（同点は先に出現した見出し）。3未満なら未マッピング。

use crate::error::{Error, Result};
use crate::keywords::{KeywordSet, RoleKeywords};
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const EXACT_MATCH_SCORE: u32 = 10;
pub const SUBSTRING_SCORE: u32 = 5;
pub const FUZZY_SCORE: u32 = 3;
pub const MAX_FUZZY_DISTANCE: usize = 2;
/// 自動検出を採用する最低スコア
pub const MIN_ACCEPT_SCORE: u32 = 3;

/// 1ロール分のマッピング
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    /// 対応する列名（未マッピングは None）
    pub column: Option<String>,
    /// 自動検出で決まったか（手動編集で false になる）
    pub auto_detected: bool,
}

impl MappingEntry {
    fn detected(column: String) -> Self {
        Self {
            column: Some(column),
            auto_detected: true,
        }
    }

    fn manual(column: Option<String>) -> Self {
        Self {
            column: column.filter(|c| !c.trim().is_empty()),
            auto_detected: false,
        }
    }

    /// ユーザーが明示的に列を指定したエントリか
    pub fn is_manual(&self) -> bool {
        self.column.is_some() && !self.auto_detected
    }
}

/// ロール → 列名 の対応表
///
/// 自動検出 → 手動編集 → バッチ処理 の間で値として受け渡す。
/// 編集系メソッドはすべて新しい値を返す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    entries: BTreeMap<Role, MappingEntry>,
}

impl ColumnMapping {
    /// 指定ロールをすべて未マッピングにした対応表
    pub fn unmapped(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            entries: roles
                .into_iter()
                .map(|role| (role, MappingEntry::default()))
                .collect(),
        }
    }

    pub fn entry(&self, role: Role) -> Option<&MappingEntry> {
        self.entries.get(&role)
    }

    pub fn column(&self, role: Role) -> Option<&str> {
        self.entries
            .get(&role)
            .and_then(|e| e.column.as_deref())
    }

    pub fn is_auto_detected(&self, role: Role) -> bool {
        self.entries.get(&role).is_some_and(|e| e.auto_detected)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &MappingEntry)> {
        self.entries.iter().map(|(role, entry)| (*role, entry))
    }

    /// 手動編集: 指定ロールを上書きし、自動検出フラグを外す
    ///
    /// `None` または空文字列で未マッピングに戻す。
    pub fn with_manual(mut self, role: Role, column: Option<String>) -> Self {
        self.entries.insert(role, MappingEntry::manual(column));
        self
    }

    /// 手動指定されていないロールだけ自動検出をやり直す
    pub fn refresh<S: AsRef<str>>(&self, headers: &[S], keywords: &RoleKeywords) -> Self {
        let detected = match_columns(headers, keywords);
        let mut entries = self.entries.clone();

        for (role, entry) in detected.entries {
            let keep = entries.get(&role).is_some_and(|e| e.is_manual());
            if !keep {
                entries.insert(role, entry);
            }
        }

        Self { entries }
    }

    /// 未マッピングの必須ロール
    pub fn missing_required(&self) -> Vec<Role> {
        Role::REQUIRED
            .iter()
            .filter(|role| self.column(**role).is_none())
            .copied()
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// 必須ロールがすべてマッピング済みか検証
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingRoles(missing))
        }
    }
}

/// 見出しごとのスコア
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderScore {
    pub column: String,
    pub score: u32,
}

/// 見出しとキーワード集合のスコアを計算
pub fn score_header(header: &str, keywords: &KeywordSet) -> u32 {
    let header_lower = header.to_lowercase();

    keywords
        .iter()
        .map(|keyword| {
            if header_lower == keyword {
                EXACT_MATCH_SCORE
            } else if header_lower.contains(keyword) {
                SUBSTRING_SCORE
            } else if levenshtein_distance(&header_lower, keyword) <= MAX_FUZZY_DISTANCE {
                FUZZY_SCORE
            } else {
                0
            }
        })
        .sum()
}

/// スコアが1以上の見出しを降順で返す（同点は見出し順）
pub fn rank_headers<S: AsRef<str>>(headers: &[S], keywords: &KeywordSet) -> Vec<HeaderScore> {
    let mut ranked: Vec<HeaderScore> = headers
        .iter()
        .map(|h| HeaderScore {
            column: h.as_ref().to_string(),
            score: score_header(h.as_ref(), keywords),
        })
        .filter(|s| s.score > 0)
        .collect();

    // 安定ソートなので同点は元の順序のまま
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn best_match<'a, S: AsRef<str>>(headers: &'a [S], keywords: &KeywordSet) -> Option<(&'a str, u32)> {
    let mut best: Option<(&str, u32)> = None;

    for header in headers {
        let score = score_header(header.as_ref(), keywords);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((header.as_ref(), score));
        }
    }

    best
}

/// 見出しからロールごとの列を自動検出する
///
/// 同じ入力には常に同じ結果を返す。見出しが空ならすべて未マッピング。
pub fn match_columns<S: AsRef<str>>(headers: &[S], keywords: &RoleKeywords) -> ColumnMapping {
    let mut entries = BTreeMap::new();

    for (role, set) in keywords.iter() {
        let entry = match best_match(headers, set) {
            Some((column, score)) if score >= MIN_ACCEPT_SCORE => {
                tracing::debug!(role = %role, column, score, "column detected");
                MappingEntry::detected(column.to_string())
            }
            candidate => {
                tracing::debug!(role = %role, best_score = candidate.map_or(0, |(_, s)| s), "no column detected");
                MappingEntry::default()
            }
        };
        entries.insert(role, entry);
    }

    ColumnMapping { entries }
}

/// レーベンシュタイン距離を計算
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
