/// 共有モジュール
///
/// 機能モジュール間で共有される基盤コードを提供します：
/// - 統一エラー型
/// - 環境変数からの設定読み込みとログ初期化
/// - 外部ストアクライアントとクエリ仕様
/// - バリデーションなどのユーティリティ
pub mod config;
pub mod errors;
pub mod query;
pub mod store_client;
pub mod utils;
