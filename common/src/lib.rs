//! Picking Sizer Common Library
//!
//! 列マッピングの自動検出とピッキング形式判定のコア。I/O を持たない純粋な計算のみ。
//! 表計算の読み込み・出力は呼び出し側（CLI）が担当する。

pub mod batch;
pub mod classifier;
pub mod error;
pub mod keywords;
pub mod matcher;
pub mod summary;
pub mod types;

pub use batch::{parse_numeric, process_batch, reclassify, ClassifiedItem};
pub use classifier::{classify, FormatParameters, FormatSpec, PickingFormat, ThresholdTable};
pub use error::{Error, Result};
pub use keywords::{KeywordSet, RoleKeywords};
pub use matcher::{levenshtein_distance, match_columns, ColumnMapping, MappingEntry};
pub use summary::{summarize, PickingSummary};
pub use types::{Role, Row, Scalar};
