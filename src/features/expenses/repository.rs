/// 支出のデータアクセス層
///
/// 外部ストアの`expenses`テーブルに対するCRUD操作を提供します。
/// 読み取りは常にカテゴリスナップショットを結合して返す。
use crate::features::auth::models::Session;
use crate::features::auth::service::AuthService;
use crate::features::expenses::models::{
    Expense, ExpenseFilter, ExpensePatch, NewExpense, NewExpenseRow,
};
use crate::shared::errors::AppResult;
use crate::shared::query::{Filter, QuerySpec};
use crate::shared::store_client::StoreClient;
use crate::shared::utils::validate_memo;
use log::info;
use std::sync::Arc;

/// テーブル名
const TABLE: &str = "expenses";

/// カテゴリ結合付きの取得カラム指定
const SELECT_WITH_CATEGORY: &str = "*,category:categories(*)";

/// 支出リポジトリ
#[derive(Clone)]
pub struct ExpenseRepository {
    store: Arc<StoreClient>,
    auth: Arc<AuthService>,
}

impl ExpenseRepository {
    /// 新しい支出リポジトリを作成
    pub fn new(store: Arc<StoreClient>, auth: Arc<AuthService>) -> Self {
        Self { store, auth }
    }

    /// 支出一覧を取得する
    ///
    /// 現在のユーザーの支出をカテゴリスナップショット付きで
    /// 日付の降順で返す。フィルタの上下限はどちらも境界を含む。
    ///
    /// # 引数
    /// * `session` - 認証セッション
    /// * `filter` - 日付範囲の取得条件（`ExpenseFilter::all()`で全履歴）
    pub async fn list(&self, session: &Session, filter: &ExpenseFilter) -> AppResult<Vec<Expense>> {
        let mut spec = QuerySpec::with_select(SELECT_WITH_CATEGORY).order_desc("date");

        if let Some(start) = filter.start_date {
            spec = spec.filter(Filter::Gte("date".to_string(), start.to_string()));
        }
        if let Some(end) = filter.end_date {
            spec = spec.filter(Filter::Lte("date".to_string(), end.to_string()));
        }

        let expenses = self
            .store
            .select(TABLE, &spec, &session.access_token)
            .await?;

        info!("支出一覧取得成功: count={}", expenses.len());
        Ok(expenses)
    }

    /// 支出を作成する
    ///
    /// 先に現在の認証ユーザーを解決し、取得できない場合は認証エラーで
    /// 失敗する。作成された行はカテゴリスナップショット付きで返る。
    pub async fn create(&self, session: &Session, expense: NewExpense) -> AppResult<Expense> {
        validate_memo(expense.memo.as_deref())?;

        let user = self.auth.current_user(session).await?;

        let row = NewExpenseRow {
            amount: expense.amount,
            date: expense.date,
            memo: expense.memo,
            category_id: expense.category_id,
            user_id: user.id,
        };

        let created: Expense = self
            .store
            .insert(TABLE, &row, SELECT_WITH_CATEGORY, &session.access_token)
            .await?;

        info!("支出作成成功: id={}, amount={}", created.id, created.amount);
        Ok(created)
    }

    /// 支出を部分更新する
    ///
    /// 指定されたフィールドのみ上書きし、更新後の行を
    /// カテゴリスナップショット付きで返す。
    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        patch: ExpensePatch,
    ) -> AppResult<Expense> {
        validate_memo(patch.memo.as_deref())?;

        let updated: Expense = self
            .store
            .update(TABLE, id, &patch, SELECT_WITH_CATEGORY, &session.access_token)
            .await?;

        info!("支出更新成功: id={}", updated.id);
        Ok(updated)
    }

    /// 支出を削除する
    ///
    /// idが存在しない・所有していない場合も成功として扱う（0行マッチ）。
    /// 削除は恒久的で、履歴は保持しない。
    pub async fn delete(&self, session: &Session, id: &str) -> AppResult<()> {
        self.store.delete(TABLE, id, &session.access_token).await?;

        info!("支出削除成功: id={id}");
        Ok(())
    }
}
