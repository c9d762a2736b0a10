/// カテゴリ機能モジュール
///
/// カテゴリに関連するモデルとデータアクセス層を提供します。
pub mod models;
pub mod repository;

pub use models::*;
pub use repository::*;
