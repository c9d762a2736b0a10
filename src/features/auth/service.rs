/// 認証サービス
///
/// サインイン・サインアップ・サインアウト・ユーザー取得を
/// 外部IDプロバイダ（GoTrue互換）のRESTにそのまま委譲する薄いプロキシ。
/// 認証プロトコル自体はプロバイダ側の責務であり、ここでは実装しない。
use crate::features::auth::models::{PasswordCredentials, Session, SignUpResult, User};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::store_client::StoreClient;
use crate::shared::utils::validate_password;
use log::info;
use serde_json::Value;
use std::sync::Arc;

/// 認証サービス
#[derive(Clone)]
pub struct AuthService {
    store: Arc<StoreClient>,
}

impl AuthService {
    /// 新しい認証サービスを作成
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// メールアドレスとパスワードでサインインする
    ///
    /// # 引数
    /// * `email` - メールアドレス
    /// * `password` - パスワード
    ///
    /// # 戻り値
    /// 認証セッション、または失敗時はエラー
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let credentials = PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let session: Session = self
            .store
            .auth_post("/auth/v1/token?grant_type=password", &credentials, None)
            .await?;

        info!("サインイン成功: user_id={}", session.user.id);
        Ok(session)
    }

    /// 新規ユーザーを登録する
    ///
    /// リモート呼び出しの前にパスワード長（6文字以上）をローカルで
    /// チェックする。プロバイダ側でより厳しいポリシーが適用される場合もある。
    ///
    /// # 戻り値
    /// 登録結果（メール確認が有効な環境ではセッションなし）、または失敗時はエラー
    pub async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpResult> {
        validate_password(password)?;

        let credentials = PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        // レスポンス形状は環境設定で変わる:
        // メール確認ありではユーザーのみ、なしではセッションが返る
        let body: Value = self
            .store
            .auth_post("/auth/v1/signup", &credentials, None)
            .await?;

        let result = if body.get("access_token").is_some() {
            let session: Session = serde_json::from_value(body)
                .map_err(|e| AppError::store(format!("サインアップレスポンス解析エラー: {e}")))?;
            SignUpResult {
                user: session.user.clone(),
                session: Some(session),
            }
        } else {
            let user: User = serde_json::from_value(body)
                .map_err(|e| AppError::store(format!("サインアップレスポンス解析エラー: {e}")))?;
            SignUpResult {
                user,
                session: None,
            }
        };

        info!("サインアップ成功: user_id={}", result.user.id);
        Ok(result)
    }

    /// サインアウトする
    ///
    /// セッションのアクセストークンをプロバイダ側で失効させる。
    pub async fn sign_out(&self, session: &Session) -> AppResult<()> {
        self.store
            .auth_post_empty("/auth/v1/logout", &session.access_token)
            .await?;

        info!("サインアウト成功: user_id={}", session.user.id);
        Ok(())
    }

    /// 現在の認証ユーザーを取得する
    ///
    /// トークンが無効・期限切れの場合は認証エラーを返す。
    /// データアクセス層が所有者スタンプの前に呼び出す。
    pub async fn current_user(&self, session: &Session) -> AppResult<User> {
        self.store
            .auth_get::<User>("/auth/v1/user", &session.access_token)
            .await
            .map_err(|e| AppError::authentication(format!("認証ユーザーが取得できません: {e}")))
    }
}
