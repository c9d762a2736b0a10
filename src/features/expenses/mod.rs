/// 支出機能モジュール
///
/// このモジュールは支出管理に関連する機能を提供します：
/// - 支出の作成、読み取り、更新、削除（CRUD操作）
/// - 日付範囲による一覧フィルタリング
/// - カテゴリスナップショットの結合取得
pub mod models;
pub mod repository;

pub use models::{Expense, ExpenseFilter, ExpensePatch, NewExpense};
pub use repository::ExpenseRepository;
