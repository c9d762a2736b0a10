use crate::features::categories::models::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 支出データモデル
///
/// 金額は円単位の整数で扱う（小数は持たない）。
/// `category`は読み取り時にストア側で結合されるスナップショット。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Expense {
    /// 支出ID（ストアが発行する不透明な文字列）
    pub id: String,
    /// 金額（円）
    pub amount: i64,
    /// 支出日（時刻は持たない）
    pub date: NaiveDate,
    /// メモ（任意）
    pub memo: Option<String>,
    /// カテゴリID（categoriesへの外部キー）
    pub category_id: String,
    /// 所有ユーザーID
    pub user_id: String,
    /// 作成日時（ストアが発行）
    pub created_at: String,
    /// 結合されたカテゴリスナップショット
    ///
    /// カテゴリが削除されて孤児になった支出ではNoneになる。
    pub category: Option<Category>,
}

/// 支出新規作成の入力
///
/// ID・所有者・作成日時はストアが発行するため含まない。
#[derive(Debug, Deserialize, Clone)]
pub struct NewExpense {
    pub amount: i64,
    pub date: NaiveDate,
    pub memo: Option<String>,
    pub category_id: String,
}

/// 支出新規作成用の行データ（所有者スタンプ済み）
#[derive(Debug, Serialize)]
pub struct NewExpenseRow {
    pub amount: i64,
    pub date: NaiveDate,
    pub memo: Option<String>,
    pub category_id: String,
    pub user_id: String,
}

/// 支出の部分更新内容
///
/// 指定したフィールドのみ上書きする。Noneのフィールドは
/// リクエストから完全に省略され、nullでの上書きにはならない。
#[derive(Debug, Serialize, Default, Clone)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// 支出一覧の取得条件
///
/// 日付の上下限はどちらも境界を含む。両方省略すると全履歴を返す。
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseFilter {
    /// この日付以降（含む）
    pub start_date: Option<NaiveDate>,
    /// この日付以前（含む）
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    /// フィルタなし（全履歴）
    pub fn all() -> Self {
        Self::default()
    }

    /// 日付範囲で絞り込むフィルタを作成
    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}
