//! ログ初期化
//!
//! tracing-subscriber を使用。ログは標準エラーへ、処理結果は標準出力へ出す。

use tracing_subscriber::{fmt, EnvFilter};

/// ログを初期化
///
/// RUST_LOG が設定されていればそれを優先（例: `RUST_LOG=picking_sizer_common=debug`）。
/// 未設定時は `info`、`verbose` 指定時は `debug`。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

/// テスト用（出力はテストハーネスに渡す）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
