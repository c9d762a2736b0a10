/// カテゴリのデータアクセス層
///
/// 外部ストアの`categories`テーブルに対するCRUD操作を提供します。
/// セッションは呼び出しごとに明示的に渡される（グローバルな認証状態は持たない）。
use crate::features::auth::models::Session;
use crate::features::auth::service::AuthService;
use crate::features::categories::models::{Category, CategoryChanges, NewCategoryRow};
use crate::shared::errors::AppResult;
use crate::shared::query::QuerySpec;
use crate::shared::store_client::StoreClient;
use crate::shared::utils::{validate_category_name, validate_color_code};
use log::info;
use std::sync::Arc;

/// テーブル名
const TABLE: &str = "categories";

/// カテゴリリポジトリ
#[derive(Clone)]
pub struct CategoryRepository {
    store: Arc<StoreClient>,
    auth: Arc<AuthService>,
}

impl CategoryRepository {
    /// 新しいカテゴリリポジトリを作成
    pub fn new(store: Arc<StoreClient>, auth: Arc<AuthService>) -> Self {
        Self { store, auth }
    }

    /// カテゴリ一覧を取得する
    ///
    /// 現在のユーザーが所有するすべてのカテゴリを名前の昇順で返す。
    /// 行レベルポリシーにより他ユーザーの行は含まれない。
    pub async fn list(&self, session: &Session) -> AppResult<Vec<Category>> {
        let spec = QuerySpec::select_all().order_asc("name");
        let categories = self
            .store
            .select(TABLE, &spec, &session.access_token)
            .await?;

        info!("カテゴリ一覧取得成功: count={}", categories.len());
        Ok(categories)
    }

    /// カテゴリを作成する
    ///
    /// 先に現在の認証ユーザーを解決し、取得できない場合は認証エラーで
    /// 失敗する。作成された行は所有者スタンプ付きで返る。
    ///
    /// # 引数
    /// * `session` - 認証セッション
    /// * `name` - カテゴリ名（必須）
    /// * `icon` - アイコン参照（任意）
    /// * `color` - 表示色（任意、#rrggbb形式）
    ///
    /// # 戻り値
    /// 作成されたカテゴリ（ID・作成日時はストアが発行）、または失敗時はエラー
    pub async fn create(
        &self,
        session: &Session,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> AppResult<Category> {
        validate_category_name(name)?;
        validate_color_code(color)?;

        let user = self.auth.current_user(session).await?;

        let row = NewCategoryRow {
            name: name.to_string(),
            icon: icon.map(str::to_string),
            color: color.map(str::to_string),
            user_id: user.id,
        };

        let category: Category = self
            .store
            .insert(TABLE, &row, "*", &session.access_token)
            .await?;

        info!("カテゴリ作成成功: id={}", category.id);
        Ok(category)
    }

    /// カテゴリを更新する
    ///
    /// name・icon・colorの3フィールドを無条件で上書きする
    /// （全置き換え。Noneはnullとして書き込まれる）。
    /// idが所有する行に一致しない場合はストアエラーになる。
    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        changes: CategoryChanges,
    ) -> AppResult<Category> {
        validate_category_name(&changes.name)?;
        validate_color_code(changes.color.as_deref())?;

        let category: Category = self
            .store
            .update(TABLE, id, &changes, "*", &session.access_token)
            .await?;

        info!("カテゴリ更新成功: id={}", category.id);
        Ok(category)
    }

    /// カテゴリを削除する
    ///
    /// idが存在しない・所有していない場合も成功として扱う（0行マッチ）。
    /// 参照している支出へのカスケードは行わない。孤児になった支出は
    /// 読み取り時に結合カテゴリがNoneとなり、集計では「未分類」に入る。
    pub async fn delete(&self, session: &Session, id: &str) -> AppResult<()> {
        self.store.delete(TABLE, id, &session.access_token).await?;

        info!("カテゴリ削除成功: id={id}");
        Ok(())
    }
}
