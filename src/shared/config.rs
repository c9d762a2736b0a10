use crate::shared::errors::{AppError, AppResult};
use log::{debug, info};

/// 外部ストア（Supabase互換BaaS）への接続設定
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// ストアのベースURL（例: https://xyz.supabase.co）
    pub base_url: String,
    /// 匿名APIキー（全リクエストのapikeyヘッダーに付与）
    pub anon_key: String,
}

impl StoreConfig {
    /// 環境変数からストア設定を作成
    ///
    /// `.env`ファイルがあれば先に読み込む。
    ///
    /// # 環境変数
    /// * `SUPABASE_URL` - ストアのベースURL
    /// * `SUPABASE_ANON_KEY` - 匿名APIキー
    ///
    /// # 戻り値
    /// ストア設定、または環境変数が不足している場合はエラー
    pub fn from_env() -> AppResult<Self> {
        dotenv::dotenv().ok();
        debug!("StoreConfig::from_env() - 環境変数の読み込みを開始");

        let base_url = std::env::var("SUPABASE_URL").map_err(|_| {
            AppError::configuration("環境変数 SUPABASE_URL が見つかりません")
        })?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY").map_err(|_| {
            AppError::configuration("環境変数 SUPABASE_ANON_KEY が見つかりません")
        })?;

        // 末尾のスラッシュはエンドポイント結合時に二重になるため除去する
        let base_url = base_url.trim_end_matches('/').to_string();

        debug!("StoreConfig::from_env() - 設定の読み込みが完了しました");
        Ok(Self { base_url, anon_key })
    }
}

/// ログシステムを初期化する
///
/// # 引数
/// * `log_level` - ログレベル文字列（error/warn/info/debug/trace）
///
/// ログレベルは`RUST_LOG`環境変数で上書きできる。
pub fn initialize_logging_system(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    // env_loggerを初期化
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();

    info!("ログシステムを初期化しました: level={log_level}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_trims_trailing_slash() {
        std::env::set_var("SUPABASE_URL", "https://example.supabase.co/");
        std::env::set_var("SUPABASE_ANON_KEY", "test-anon-key");

        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://example.supabase.co");
        assert_eq!(config.anon_key, "test-anon-key");
    }
}
