/// ダッシュボード機能モジュール
///
/// 月次集計ロジックと、支出・カテゴリの並行取得から集計までを
/// まとめたサービスを提供します。
pub mod service;
pub mod summary;

pub use service::{DashboardService, MonthlyDashboard};
pub use summary::{
    category_color_map, month_date_range, monthly_summary, CategorySummary,
    MonthlyExpenseSummary, UNCATEGORIZED_LABEL,
};
