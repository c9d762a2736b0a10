use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// 認証が必要な操作で認証ユーザーが取得できない場合のエラー
    #[error("認証エラー: {0}")]
    Authentication(String),

    /// バリデーション関連のエラー（リモート呼び出し前のローカルチェック）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 外部ストアから返されたエラー（制約違反、権限エラー、通信障害など）
    ///
    /// ストアのエラーメッセージをそのまま保持する。ここでは分類しない。
    #[error("ストアエラー: {0}")]
    Store(String),

    /// 設定関連のエラー（環境変数の不足など）
    #[error("設定エラー: {0}")]
    Configuration(String),
}

/// アプリケーション共通のResult型
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// 元のエラー詳細はログにのみ出力し、画面には汎用メッセージを表示する。
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Authentication(_) => "ログインが必要です。再度ログインしてください",
            AppError::Validation(msg) => msg,
            AppError::Store(_) => "サーバーとの通信でエラーが発生しました",
            AppError::Configuration(_) => "アプリケーションの設定に問題があります",
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// 認証エラーを作成するヘルパー関数
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        AppError::Authentication(message.into())
    }

    /// バリデーションエラーを作成するヘルパー関数
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// ストアエラーを作成するヘルパー関数
    pub fn store<S: Into<String>>(message: S) -> Self {
        AppError::Store(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
