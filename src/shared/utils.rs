use crate::shared::errors::{AppError, AppResult};
use chrono::Utc;
use chrono_tz::Asia::Tokyo;
use once_cell::sync::Lazy;
use regex::Regex;

/// カテゴリ色のHEXカラーコードパターン（#rrggbb形式）
static COLOR_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("カラーコードの正規表現が不正"));

/// 必須フィールドのバリデーション
///
/// # 引数
/// * `text` - 検証対象の文字列
/// * `field_name` - フィールド名（エラーメッセージ用）
///
/// # 戻り値
/// 空でない場合はOk(())、空の場合はエラー
pub fn validate_required_field(text: &str, field_name: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }
    Ok(())
}

/// 文字列の長さバリデーション
///
/// # 引数
/// * `text` - 検証対象の文字列
/// * `max_length` - 最大文字数
/// * `field_name` - フィールド名（エラーメッセージ用）
pub fn validate_text_length(text: &str, max_length: usize, field_name: &str) -> AppResult<()> {
    let char_count = text.chars().count();
    if char_count > max_length {
        return Err(AppError::validation(format!(
            "{field_name}は{max_length}文字以内で入力してください（現在: {char_count}文字）"
        )));
    }
    Ok(())
}

/// カテゴリ名のバリデーション
///
/// # バリデーション規則
/// - 必須項目であること
/// - 50文字以内であること
pub fn validate_category_name(name: &str) -> AppResult<()> {
    validate_required_field(name, "カテゴリ名")?;
    validate_text_length(name, 50, "カテゴリ名")?;
    Ok(())
}

/// カテゴリ色のバリデーション
///
/// # バリデーション規則
/// - 指定する場合は`#rrggbb`形式のHEXカラーコードであること（未指定は有効）
pub fn validate_color_code(color: Option<&str>) -> AppResult<()> {
    if let Some(code) = color {
        if !COLOR_CODE_PATTERN.is_match(code) {
            return Err(AppError::validation(
                "色は#rrggbb形式のカラーコードで指定してください",
            ));
        }
    }
    Ok(())
}

/// パスワードのバリデーション
///
/// サインアップ前のローカルチェック。プロバイダ側でより厳しい
/// ポリシーが適用される場合もある。
///
/// # バリデーション規則
/// - 6文字以上であること
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < 6 {
        return Err(AppError::validation(
            "パスワードは6文字以上で入力してください",
        ));
    }
    Ok(())
}

/// メモのバリデーション
///
/// # バリデーション規則
/// - 500文字以内であること（Noneの場合は有効）
pub fn validate_memo(memo: Option<&str>) -> AppResult<()> {
    if let Some(text) = memo {
        validate_text_length(text, 500, "メモ")?;
    }
    Ok(())
}

/// 今日の日付をYYYY-MM-DD形式で取得（JST基準）
///
/// 支出フォームの日付初期値などに使用する。
pub fn get_today_date_jst() -> String {
    let now_jst = Utc::now().with_timezone(&Tokyo);
    now_jst.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_field() {
        assert!(validate_required_field("食費", "カテゴリ名").is_ok());
        assert!(validate_required_field("  有効な値  ", "カテゴリ名").is_ok());

        assert!(validate_required_field("", "カテゴリ名").is_err());
        assert!(validate_required_field("   ", "カテゴリ名").is_err()); // 空白のみ
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("交通費").is_ok());

        assert!(validate_category_name("").is_err());
        assert!(validate_category_name(&"あ".repeat(51)).is_err()); // 51文字
    }

    #[test]
    fn test_validate_color_code() {
        assert!(validate_color_code(None).is_ok());
        assert!(validate_color_code(Some("#2196f3")).is_ok());
        assert!(validate_color_code(Some("#00FF00")).is_ok());

        assert!(validate_color_code(Some("2196f3")).is_err()); // #なし
        assert!(validate_color_code(Some("#2196f")).is_err()); // 5桁
        assert!(validate_color_code(Some("#gggggg")).is_err()); // 16進数でない
        assert!(validate_color_code(Some("blue")).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("ぱすわーど").is_err()); // 5文字
        assert!(validate_password("12345").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_memo() {
        assert!(validate_memo(None).is_ok());
        assert!(validate_memo(Some("牛乳")).is_ok());
        assert!(validate_memo(Some(&"a".repeat(501))).is_err()); // 501文字
    }

    #[test]
    fn test_get_today_date_jst() {
        let today = get_today_date_jst();
        // YYYY-MM-DD形式であることを確認
        assert_eq!(today.len(), 10);
        assert_eq!(today.chars().nth(4), Some('-'));
        assert_eq!(today.chars().nth(7), Some('-'));
    }
}
