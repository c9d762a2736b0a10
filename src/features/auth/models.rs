use serde::{Deserialize, Serialize};

/// 認証済みユーザー
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    /// ユーザーID（プロバイダが発行する不透明な文字列）
    pub id: String,
    /// メールアドレス
    pub email: Option<String>,
    /// 作成日時
    pub created_at: Option<String>,
}

/// 認証セッション
///
/// サインイン成功時にプロバイダから返され、以降のすべての
/// データアクセス呼び出しに明示的に渡される。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Session {
    /// JWTアクセストークン
    pub access_token: String,
    /// トークンタイプ（通常は"bearer"）
    pub token_type: String,
    /// トークンの有効期限（秒）
    pub expires_in: u64,
    /// リフレッシュトークン
    pub refresh_token: Option<String>,
    /// ユーザー情報
    pub user: User,
}

/// サインインリクエスト（パスワードグラント）
#[derive(Debug, Serialize)]
pub struct PasswordCredentials {
    pub email: String,
    pub password: String,
}

/// サインアップ結果
///
/// メール確認が有効な環境ではセッションなしでユーザーのみ返る。
#[derive(Debug, Clone)]
pub struct SignUpResult {
    /// 登録されたユーザー
    pub user: User,
    /// 即時発行されたセッション（メール確認不要の環境のみ）
    pub session: Option<Session>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_deserialization() {
        // GoTrueのパスワードグラントレスポンス形式
        let json = r#"{
            "access_token": "eyJhbGciOiJIUzI1NiJ9.x.y",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-abc",
            "user": {
                "id": "a1b2c3",
                "email": "test@example.com",
                "created_at": "2024-01-01T00:00:00Z"
            }
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.token_type, "bearer");
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.id, "a1b2c3");
        assert_eq!(session.user.email.as_deref(), Some("test@example.com"));
    }

    #[test]
    fn test_user_deserialization_ignores_unknown_fields() {
        // プロバイダのレスポンスには未知のフィールドが多数含まれる
        let json = r#"{
            "id": "a1b2c3",
            "aud": "authenticated",
            "role": "authenticated",
            "email": "test@example.com",
            "app_metadata": {},
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "a1b2c3");
    }
}
