/// 機能別モジュール
///
/// アプリケーションの機能を機能別に整理したモジュール群を提供します。
/// 各機能モジュールは、その機能に関連するモデルとデータアクセス層を
/// 含む自己完結型のユニットです。
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod expenses;
