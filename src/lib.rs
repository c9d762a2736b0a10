//! 家計簿アプリのデータアクセス・集計コア
//!
//! 永続化と認証をSupabase互換のBaaSに委譲する個人向け支出管理
//! アプリケーションのクライアントコアです。UIフレームワークには
//! 依存せず、データ契約と集計ロジックのみを提供します。

pub mod features;
pub mod shared;

use features::auth::service::AuthService;
use features::categories::repository::CategoryRepository;
use features::dashboard::service::DashboardService;
use features::expenses::repository::ExpenseRepository;
use shared::errors::AppResult;
use shared::store_client::StoreClient;
use std::sync::Arc;

pub use features::auth::models::{Session, SignUpResult, User};
pub use features::categories::models::{Category, CategoryChanges, DEFAULT_CATEGORY_COLOR};
pub use features::dashboard::summary::{
    CategorySummary, MonthlyExpenseSummary, UNCATEGORIZED_LABEL,
};
pub use features::expenses::models::{Expense, ExpenseFilter, ExpensePatch, NewExpense};
pub use shared::config::StoreConfig;
pub use shared::errors::{AppError, AppResult as Result};

/// 家計簿クライアント
///
/// 認証サービス・リポジトリ・ダッシュボードサービスを
/// 1つのストアクライアントの上に束ねたファサード。
pub struct KakeiboClient {
    /// 認証プロキシ
    pub auth: Arc<AuthService>,
    /// カテゴリのデータアクセス層
    pub categories: CategoryRepository,
    /// 支出のデータアクセス層
    pub expenses: ExpenseRepository,
    /// ダッシュボード（並行取得＋月次集計）
    pub dashboard: DashboardService,
}

impl KakeiboClient {
    /// ストア設定からクライアントを作成
    pub fn new(config: StoreConfig) -> AppResult<Self> {
        let store = Arc::new(StoreClient::new(config)?);
        let auth = Arc::new(AuthService::new(Arc::clone(&store)));

        let categories = CategoryRepository::new(Arc::clone(&store), Arc::clone(&auth));
        let expenses = ExpenseRepository::new(Arc::clone(&store), Arc::clone(&auth));
        let dashboard = DashboardService::new(expenses.clone(), categories.clone());

        Ok(Self {
            auth,
            categories,
            expenses,
            dashboard,
        })
    }

    /// 環境変数からクライアントを作成
    ///
    /// `SUPABASE_URL`と`SUPABASE_ANON_KEY`を読み込む（.env対応）。
    pub fn from_env() -> AppResult<Self> {
        Self::new(StoreConfig::from_env()?)
    }
}
