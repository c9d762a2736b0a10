/// クエリ仕様
///
/// 外部ストアへの行取得条件を表す明示的な値。
/// 可変なビルダーチェーンではなく、フィルタ条件を列挙したデータとして
/// 組み立ててから単一の実行関数（`StoreClient`）に渡す。
/// フィルタ条件の単体
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// 等価（col = value）
    Eq(String, String),
    /// 以上（col >= value、下限は境界を含む）
    Gte(String, String),
    /// 以下（col <= value、上限は境界を含む）
    Lte(String, String),
}

/// 並び順の指定
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// 並び替え対象のカラム名
    pub column: String,
    /// 昇順かどうか
    pub ascending: bool,
}

/// 1回の行取得リクエストの仕様
#[derive(Debug, Clone)]
pub struct QuerySpec {
    /// 取得カラム指定（PostgRESTのselect構文。結合指定を含む）
    pub select: String,
    /// フィルタ条件（AND結合）
    pub filters: Vec<Filter>,
    /// 並び順（省略時はストアのデフォルト）
    pub order: Option<Order>,
}

impl QuerySpec {
    /// 全カラム取得のクエリ仕様を作成
    pub fn select_all() -> Self {
        Self::with_select("*")
    }

    /// 取得カラムを指定してクエリ仕様を作成
    pub fn with_select<S: Into<String>>(select: S) -> Self {
        Self {
            select: select.into(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// フィルタ条件を追加する
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// 昇順の並び替えを設定する
    pub fn order_asc<S: Into<String>>(mut self, column: S) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending: true,
        });
        self
    }

    /// 降順の並び替えを設定する
    pub fn order_desc<S: Into<String>>(mut self, column: S) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending: false,
        });
        self
    }

    /// PostgRESTのクエリパラメータ形式に変換する
    ///
    /// # 戻り値
    /// `(キー, 値)`のペア列。例: `("date", "gte.2024-05-01")`, `("order", "date.desc")`
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.clone())];

        for filter in &self.filters {
            let (column, rendered) = match filter {
                Filter::Eq(col, value) => (col, format!("eq.{value}")),
                Filter::Gte(col, value) => (col, format!("gte.{value}")),
                Filter::Lte(col, value) => (col, format!("lte.{value}")),
            };
            pairs.push((column.clone(), rendered));
        }

        if let Some(order) = &self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_only() {
        let spec = QuerySpec::select_all();
        assert_eq!(
            spec.to_query_pairs(),
            vec![("select".to_string(), "*".to_string())]
        );
    }

    #[test]
    fn test_date_range_query() {
        // 月初〜月末の範囲フィルタ（両端を含む）
        let spec = QuerySpec::with_select("*,category:categories(*)")
            .filter(Filter::Gte("date".to_string(), "2024-05-01".to_string()))
            .filter(Filter::Lte("date".to_string(), "2024-05-31".to_string()))
            .order_desc("date");

        assert_eq!(
            spec.to_query_pairs(),
            vec![
                (
                    "select".to_string(),
                    "*,category:categories(*)".to_string()
                ),
                ("date".to_string(), "gte.2024-05-01".to_string()),
                ("date".to_string(), "lte.2024-05-31".to_string()),
                ("order".to_string(), "date.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_eq_filter_and_ascending_order() {
        let spec = QuerySpec::select_all()
            .filter(Filter::Eq("id".to_string(), "abc-123".to_string()))
            .order_asc("name");

        let pairs = spec.to_query_pairs();
        assert!(pairs.contains(&("id".to_string(), "eq.abc-123".to_string())));
        assert!(pairs.contains(&("order".to_string(), "name.asc".to_string())));
    }
}
