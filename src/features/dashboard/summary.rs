/// 月次集計ロジック
///
/// 月で絞り込んだ支出リストとカテゴリ一覧から、合計金額と
/// カテゴリ別の内訳を導出する純粋関数群。副作用を持たず、
/// 同じ入力に対して常に同じ結果を返すため、再描画のたびに
/// 再計算しても安全。
use crate::features::categories::models::{Category, DEFAULT_CATEGORY_COLOR};
use crate::features::expenses::models::Expense;
use crate::shared::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// カテゴリ未設定の支出をまとめるバケットのラベル
pub const UNCATEGORIZED_LABEL: &str = "未分類";

/// カテゴリ別の集計
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategorySummary {
    /// カテゴリ名（未分類の場合は固定ラベル）
    pub category_name: String,
    /// カテゴリ内の合計金額（円）
    pub amount: i64,
    /// 総額に対する割合（0〜100）
    pub percentage: f64,
    /// チャート描画用の色
    pub color: String,
}

/// 月次支出サマリ
///
/// 永続化されない導出データ。支出リストや選択月が変わるたびに再計算される。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonthlyExpenseSummary {
    /// 対象月（YYYY-MM形式）
    pub month: String,
    /// 合計金額（円）
    pub total_amount: i64,
    /// カテゴリ別の内訳（入力リストでの初出順）
    pub category_summaries: Vec<CategorySummary>,
}

/// 指定月の日付範囲（月初と月末）を求める
///
/// # 引数
/// * `month` - 対象月（YYYY-MM形式）
///
/// # 戻り値
/// `(月初, 月末)`、またはフォーマット不正時はエラー
pub fn month_date_range(month: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::validation("月はYYYY-MM形式で指定してください");

    let (year_str, month_str) = month.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month_num: u32 = month_str.parse().map_err(|_| invalid())?;

    let start = NaiveDate::from_ymd_opt(year, month_num, 1).ok_or_else(invalid)?;
    let next_month = if month_num == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_num + 1, 1)
    }
    .ok_or_else(invalid)?;
    let end = next_month.pred_opt().ok_or_else(invalid)?;

    Ok((start, end))
}

/// カテゴリ名から表示色へのマップを作成する
///
/// 色が未設定のカテゴリはデフォルト色になる。
pub fn category_color_map(categories: &[Category]) -> HashMap<String, String> {
    categories
        .iter()
        .map(|cat| (cat.name.clone(), cat.display_color().to_string()))
        .collect()
}

/// 支出リストから月次サマリを計算する
///
/// - 合計金額は全支出の単純な総和（空リストなら0）
/// - バケットは結合カテゴリ名でグループ化し、カテゴリ未設定は「未分類」に入れる
/// - バケットの並びは入力リストでの初出順を保つ
/// - 各バケットの色はカテゴリ一覧から解決し、未設定・未分類はデフォルト色
///
/// # 引数
/// * `month` - 対象月（YYYY-MM形式、表示用）
/// * `expenses` - 対象月に絞り込み済みの支出リスト
/// * `categories` - カテゴリ一覧（色の解決に使用）
pub fn monthly_summary(
    month: &str,
    expenses: &[Expense],
    categories: &[Category],
) -> MonthlyExpenseSummary {
    let total_amount: i64 = expenses.iter().map(|exp| exp.amount).sum();
    let colors = category_color_map(categories);

    // 初出順を保ってバケットに積み上げる
    let mut buckets: Vec<(String, i64)> = Vec::new();
    for expense in expenses {
        let name = expense
            .category
            .as_ref()
            .map(|cat| cat.name.as_str())
            .unwrap_or(UNCATEGORIZED_LABEL);

        match buckets.iter_mut().find(|(n, _)| n == name) {
            Some((_, amount)) => *amount += expense.amount,
            None => buckets.push((name.to_string(), expense.amount)),
        }
    }

    let category_summaries = buckets
        .into_iter()
        .map(|(name, amount)| {
            let percentage = if total_amount == 0 {
                0.0
            } else {
                amount as f64 * 100.0 / total_amount as f64
            };
            let color = colors
                .get(&name)
                .cloned()
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());

            CategorySummary {
                category_name: name,
                amount,
                percentage,
                color,
            }
        })
        .collect();

    MonthlyExpenseSummary {
        month: month.to_string(),
        total_amount,
        category_summaries,
    }
}
