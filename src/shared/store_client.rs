use crate::shared::config::StoreConfig;
/// 外部ストアクライアント
///
/// Supabase互換BaaSとの通信を行うクライアント。
/// 行データはPostgREST（/rest/v1）、認証はGoTrue（/auth/v1）のRESTに委譲する。
/// リトライは行わない。失敗は1回で呼び出し元にそのまま返す。
use crate::shared::errors::{AppError, AppResult};
use crate::shared::query::{Filter, QuerySpec};
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// ストアからのエラーレスポンスボディ
///
/// PostgRESTは`message`、GoTrueは`msg`または`error_description`に
/// メッセージを入れてくるため、どれでも受けられるようにしておく。
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    code: Option<String>,
}

impl StoreErrorBody {
    /// レスポンスボディから最も具体的なメッセージを取り出す
    fn best_message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
    }
}

/// 外部ストアクライアント
pub struct StoreClient {
    client: Client,
    config: StoreConfig,
}

impl StoreClient {
    /// 新しいストアクライアントを作成
    ///
    /// タイムアウトは明示設定しない（トランスポートのデフォルトに従う）。
    pub fn new(config: StoreConfig) -> AppResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// テーブルから行を取得する
    ///
    /// # 引数
    /// * `table` - テーブル名
    /// * `spec` - クエリ仕様（取得カラム・フィルタ・並び順）
    /// * `access_token` - 認証トークン
    ///
    /// # 戻り値
    /// 条件に一致した行のリスト、または失敗時はエラー
    pub async fn select<T>(
        &self,
        table: &str,
        spec: &QuerySpec,
        access_token: &str,
    ) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{table}");
        let url = self.table_url(table, spec)?;
        debug!("行取得リクエスト送信: table={table}");

        let request = self.client.get(url);
        let response = self.send(request, access_token, &path).await?;
        Self::parse_json(response).await
    }

    /// テーブルに行を挿入し、挿入された行を返す
    ///
    /// # 引数
    /// * `table` - テーブル名
    /// * `row` - 挿入する行
    /// * `select` - 返却時の取得カラム指定（結合指定を含められる）
    /// * `access_token` - 認証トークン
    pub async fn insert<B, T>(
        &self,
        table: &str,
        row: &B,
        select: &str,
        access_token: &str,
    ) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{table}");
        let url = self.table_url(table, &QuerySpec::with_select(select))?;
        info!("行挿入リクエスト送信: table={table}");

        let request = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(row);
        let response = self.send(request, access_token, &path).await?;
        Self::parse_json(response).await
    }

    /// idが一致する行を更新し、更新後の行を返す
    ///
    /// 所有していない・存在しないidの場合は行が一致せず、ストアエラーになる。
    pub async fn update<B, T>(
        &self,
        table: &str,
        id: &str,
        changes: &B,
        select: &str,
        access_token: &str,
    ) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{table}");
        let spec =
            QuerySpec::with_select(select).filter(Filter::Eq("id".to_string(), id.to_string()));
        let url = self.table_url(table, &spec)?;
        info!("行更新リクエスト送信: table={table}, id={id}");

        let request = self
            .client
            .patch(url)
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(changes);
        let response = self.send(request, access_token, &path).await?;
        Self::parse_json(response).await
    }

    /// idが一致する行を削除する
    ///
    /// 一致する行がない場合も成功として扱う（ストア側で0行マッチ）。
    pub async fn delete(&self, table: &str, id: &str, access_token: &str) -> AppResult<()> {
        let path = format!("/rest/v1/{table}");
        let mut url = self.endpoint_url(&path)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        info!("行削除リクエスト送信: table={table}, id={id}");

        // 削除はレスポンスボディを持たないため、成功ステータスのみ確認する
        let request = self.client.delete(url);
        self.send(request, access_token, &path).await?;
        Ok(())
    }

    /// 認証エンドポイントにPOSTし、JSONレスポンスを受け取る
    pub async fn auth_post<B, T>(
        &self,
        path: &str,
        body: &B,
        access_token: Option<&str>,
    ) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path)?;
        info!("認証リクエスト送信: path={path}");

        let mut request = self.client.post(url).json(body);
        request = self.attach_headers(request, access_token);
        let response = self.check_status(request.send().await, path).await?;
        Self::parse_json(response).await
    }

    /// 認証エンドポイントにPOSTする（レスポンスボディなし）
    pub async fn auth_post_empty(&self, path: &str, access_token: &str) -> AppResult<()> {
        let url = self.endpoint_url(path)?;
        info!("認証リクエスト送信: path={path}");

        let mut request = self.client.post(url);
        request = self.attach_headers(request, Some(access_token));
        self.check_status(request.send().await, path).await?;
        Ok(())
    }

    /// 認証エンドポイントからGETする
    pub async fn auth_get<T>(&self, path: &str, access_token: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path)?;
        debug!("認証情報取得リクエスト送信: path={path}");

        let mut request = self.client.get(url);
        request = self.attach_headers(request, Some(access_token));
        let response = self.check_status(request.send().await, path).await?;
        Self::parse_json(response).await
    }

    /// テーブルエンドポイントのURLをクエリ仕様から組み立てる
    fn table_url(&self, table: &str, spec: &QuerySpec) -> AppResult<Url> {
        let mut url = self.endpoint_url(&format!("/rest/v1/{table}"))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in spec.to_query_pairs() {
                pairs.append_pair(&key, &value);
            }
        }
        Ok(url)
    }

    /// ベースURLとパスからURLを組み立てる
    fn endpoint_url(&self, path: &str) -> AppResult<Url> {
        Url::parse(&format!("{}{path}", self.config.base_url))
            .map_err(|e| AppError::configuration(format!("不正なストアURL: {e}")))
    }

    /// 共通ヘッダー（apikey・認証トークン）を付与する
    fn attach_headers(
        &self,
        request: RequestBuilder,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let request = request.header("apikey", &self.config.anon_key);
        match access_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// リクエストを送信し、ステータスを確認する
    ///
    /// `context`はログとエラーメッセージに載せるリクエストパス。
    async fn send(
        &self,
        request: RequestBuilder,
        access_token: &str,
        context: &str,
    ) -> AppResult<Response> {
        let request = self.attach_headers(request, Some(access_token));
        self.check_status(request.send().await, context).await
    }

    /// 送信結果を確認し、失敗時はストアのメッセージを保持したエラーに変換する
    async fn check_status(
        &self,
        result: Result<Response, reqwest::Error>,
        context: &str,
    ) -> AppResult<Response> {
        let response = result.map_err(|e| {
            warn!("ストアへの接続に失敗: path={context}, error={e}");
            AppError::store(format!("ストアへの接続に失敗しました: path={context}, {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(Self::error_from_response(status, response, context).await)
    }

    /// エラーレスポンスを解析し、ストアのメッセージをそのまま載せたエラーを作る
    async fn error_from_response(status: StatusCode, response: Response, context: &str) -> AppError {
        let body_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        // 構造化エラーボディの解析を試行
        let message = match serde_json::from_str::<StoreErrorBody>(&body_text) {
            Ok(body) => {
                if let Some(code) = &body.code {
                    debug!("ストアから構造化エラーレスポンスを受信: code={code}");
                }
                body.best_message().unwrap_or_else(|| body_text.clone())
            }
            Err(_) => body_text.clone(),
        };

        warn!(
            "ストアエラーレスポンス: path={context}, status={}, message={message}",
            status.as_u16()
        );
        AppError::store(format!("{} {message}", status.as_u16()))
    }

    /// 成功レスポンスのJSONボディを解析する
    async fn parse_json<T>(response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        response
            .json()
            .await
            .map_err(|e| AppError::store(format!("レスポンス解析エラー: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> StoreClient {
        StoreClient::new(StoreConfig {
            base_url: "https://example.supabase.co".to_string(),
            anon_key: "anon".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_table_url_renders_query_spec() {
        let client = test_client();
        let spec = QuerySpec::with_select("*,category:categories(*)")
            .filter(Filter::Gte("date".to_string(), "2024-05-01".to_string()))
            .order_desc("date");

        let url = client.table_url("expenses", &spec).unwrap();
        assert_eq!(url.path(), "/rest/v1/expenses");

        // 記号はフォームエンコードされる（, → %2C, : → %3A, 括弧 → %28/%29）
        let query = url.query().unwrap();
        assert!(query.contains("select=*%2Ccategory%3Acategories%28*%29"));
        assert!(query.contains("date=gte.2024-05-01"));
        assert!(query.contains("order=date.desc"));
    }

    #[test]
    fn test_error_body_message_priority() {
        // PostgREST形式
        let body: StoreErrorBody = serde_json::from_str(
            r#"{"message":"duplicate key value","code":"23505","details":null,"hint":null}"#,
        )
        .unwrap();
        assert_eq!(body.best_message().unwrap(), "duplicate key value");

        // GoTrue形式
        let body: StoreErrorBody =
            serde_json::from_str(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .unwrap();
        assert_eq!(body.best_message().unwrap(), "Invalid login credentials");

        let body: StoreErrorBody = serde_json::from_str(r#"{"msg":"User already registered"}"#).unwrap();
        assert_eq!(body.best_message().unwrap(), "User already registered");
    }

    #[tokio::test]
    async fn test_connection_error_carries_request_path() {
        // 接続先のないアドレスに対するテーブル操作は即座に失敗し、
        // どのテーブルへのリクエストだったかがエラーに残る
        let client = StoreClient::new(StoreConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            anon_key: "anon".to_string(),
        })
        .unwrap();

        let result: AppResult<Vec<serde_json::Value>> = client
            .select("expenses", &QuerySpec::select_all(), "token")
            .await;

        match result {
            Err(AppError::Store(msg)) => {
                assert!(msg.contains("/rest/v1/expenses"), "msg={msg}");
            }
            other => panic!("ストアエラーになるはず: {other:?}"),
        }
    }
}
