use serde::{Deserialize, Serialize};

/// チャートなどで使用するデフォルトのカテゴリ色
pub const DEFAULT_CATEGORY_COLOR: &str = "#2196f3";

/// カテゴリデータモデル
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    /// カテゴリID（ストアが発行する不透明な文字列）
    pub id: String,
    /// カテゴリ名
    pub name: String,
    /// アイコン参照（未設定の場合はNone）
    pub icon: Option<String>,
    /// 表示色（#rrggbb形式、未設定の場合はNone）
    pub color: Option<String>,
    /// 所有ユーザーID
    pub user_id: String,
    /// 作成日時（ストアが発行）
    pub created_at: String,
}

impl Category {
    /// チャート描画用の表示色を取得（未設定時はデフォルト色）
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_CATEGORY_COLOR)
    }
}

/// カテゴリ新規作成用の行データ（所有者スタンプ済み）
#[derive(Debug, Serialize)]
pub struct NewCategoryRow {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub user_id: String,
}

/// カテゴリ更新用の変更内容
///
/// 全フィールド置き換えのセマンティクス: Noneのフィールドは
/// 「変更しない」ではなく明示的にnullで上書きされる。
/// そのためシリアライズ時にNoneを省略しない。
#[derive(Debug, Serialize, Clone)]
pub struct CategoryChanges {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_deserialization() {
        let json = r##"{
            "id": "cat-001",
            "name": "食費",
            "icon": "🍙",
            "color": "#00ff00",
            "user_id": "user-1",
            "created_at": "2024-05-01T09:00:00+09:00"
        }"##;

        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "食費");
        assert_eq!(category.display_color(), "#00ff00");
    }

    #[test]
    fn test_display_color_falls_back_to_default() {
        let json = r#"{
            "id": "cat-002",
            "name": "交通費",
            "icon": null,
            "color": null,
            "user_id": "user-1",
            "created_at": "2024-05-01T09:00:00+09:00"
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.display_color(), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_category_changes_serializes_none_as_null() {
        // 全フィールド置き換えのため、未指定はnullとして送信される
        let changes = CategoryChanges {
            name: "日用品".to_string(),
            icon: None,
            color: None,
        };

        let json = serde_json::to_string(&changes).unwrap();
        assert!(json.contains("\"icon\":null"));
        assert!(json.contains("\"color\":null"));
    }
}
