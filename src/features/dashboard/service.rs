/// ダッシュボードサービス
///
/// 選択月の支出とカテゴリを取得し、月次サマリに集計して返します。
/// 2つの取得は順序依存がないため並行に発行し、両方の完了を待ってから
/// 集計します。
use crate::features::auth::models::Session;
use crate::features::categories::models::Category;
use crate::features::categories::repository::CategoryRepository;
use crate::features::dashboard::summary::{month_date_range, monthly_summary, MonthlyExpenseSummary};
use crate::features::expenses::models::{Expense, ExpenseFilter};
use crate::features::expenses::repository::ExpenseRepository;
use crate::shared::errors::AppResult;
use log::{debug, info};
use std::sync::atomic::{AtomicU64, Ordering};

/// ダッシュボードの表示データ一式
#[derive(Debug, Clone)]
pub struct MonthlyDashboard {
    /// 月次サマリ（チャート描画の元データ）
    pub summary: MonthlyExpenseSummary,
    /// 対象月の支出（日付の降順、一覧表示用）
    pub expenses: Vec<Expense>,
    /// カテゴリ一覧（名前の昇順）
    pub categories: Vec<Category>,
}

/// ダッシュボードサービス
///
/// 月選択の切り替えで前の取得が追い越されるレースに対しては
/// 世代トークンを採用している。古い世代の結果は`Ok(None)`として
/// 返し、呼び出し元は破棄するだけでよい。
pub struct DashboardService {
    expenses: ExpenseRepository,
    categories: CategoryRepository,
    generation: AtomicU64,
}

impl DashboardService {
    /// 新しいダッシュボードサービスを作成
    pub fn new(expenses: ExpenseRepository, categories: CategoryRepository) -> Self {
        Self {
            expenses,
            categories,
            generation: AtomicU64::new(0),
        }
    }

    /// 指定月のダッシュボードデータを読み込む
    ///
    /// # 引数
    /// * `session` - 認証セッション
    /// * `month` - 対象月（YYYY-MM形式）
    ///
    /// # 戻り値
    /// ダッシュボードデータ。この読み込みの途中でより新しい読み込みが
    /// 開始された場合は`Ok(None)`（結果は古いため破棄する）。
    pub async fn load_month(
        &self,
        session: &Session,
        month: &str,
    ) -> AppResult<Option<MonthlyDashboard>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (start, end) = month_date_range(month)?;
        let filter = ExpenseFilter::between(start, end);

        // 支出とカテゴリは順序依存がないため並行取得する
        let (expenses, categories) = tokio::try_join!(
            self.expenses.list(session, &filter),
            self.categories.list(session),
        )?;

        // より新しい読み込みに追い越されていたら結果を破棄する
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("古い月次取得結果を破棄: month={month}, generation={generation}");
            return Ok(None);
        }

        let summary = monthly_summary(month, &expenses, &categories);
        info!(
            "月次ダッシュボード読み込み成功: month={month}, total={}, buckets={}",
            summary.total_amount,
            summary.category_summaries.len()
        );

        Ok(Some(MonthlyDashboard {
            summary,
            expenses,
            categories,
        }))
    }
}
