/// Skysmart API 客户端
///
/// 封装匿名注册换取 token、作业预览、步骤内容加载三个调用
use crate::clients::StepSource;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::sleep;
use tracing::{debug, warn};

const AUTH_PATH: &str = "/api/v1/user/registration/teacher";
const PREVIEW_PATH: &str = "/api/v1/task/preview";
const STEP_LOAD_PATH: &str = "/api/v1/content/step/load";

/// 重试间隔的基数，第 n 次重试等待 n 倍
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(rename = "jwtToken")]
    jwt_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct PreviewResponse {
    #[serde(default)]
    meta: PreviewMeta,
}

#[derive(Debug, Default, Deserialize)]
struct PreviewMeta {
    #[serde(rename = "stepUuids", default)]
    step_uuids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StepResponse {
    #[serde(default)]
    content: String,
}

/// Skysmart API 客户端
///
/// token 在第一次请求时获取，之后所有并发请求共用。
pub struct SkysmartClient {
    http: Client,
    base_url: String,
    max_retries: usize,
    token: OnceCell<String>,
}

impl SkysmartClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            token: OnceCell::new(),
        })
    }

    /// 获取作业的步骤 UUID 列表
    ///
    /// # 参数
    /// - `task_hash`: 作业 hash
    pub async fn preview(&self, task_hash: &str) -> AppResult<Vec<String>> {
        let url = self.url(PREVIEW_PATH);
        let token = self.token().await?;
        let payload = json!({ "taskHash": task_hash });

        let response = self
            .send_with_retry(PREVIEW_PATH, || {
                self.http
                    .post(&url)
                    .bearer_auth(token)
                    .json(&payload)
            })
            .await?;

        let preview: PreviewResponse = parse_json(PREVIEW_PATH, response).await?;
        debug!("作业 {} 预览: {} 个步骤", task_hash, preview.meta.step_uuids.len());
        Ok(preview.meta.step_uuids)
    }

    /// 加载单个步骤的标记文本
    ///
    /// # 参数
    /// - `step_id`: 步骤 UUID
    pub async fn load_step(&self, step_id: &str) -> AppResult<String> {
        let url = self.url(STEP_LOAD_PATH);
        let token = self.token().await?;

        let response = self
            .send_with_retry(STEP_LOAD_PATH, || {
                self.http
                    .get(&url)
                    .query(&[("stepUuid", step_id)])
                    .bearer_auth(token)
                    .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            })
            .await?;

        let step: StepResponse = parse_json(STEP_LOAD_PATH, response).await?;
        if step.content.trim().is_empty() {
            return Err(ApiError::EmptyContent {
                step_id: step_id.to_string(),
            }
            .into());
        }
        Ok(step.content)
    }

    /// 懒加载 token
    async fn token(&self) -> AppResult<&str> {
        self.token
            .get_or_try_init(|| self.authenticate())
            .await
            .map(String::as_str)
    }

    /// 匿名注册，换取 JWT
    async fn authenticate(&self) -> AppResult<String> {
        debug!("正在获取访问令牌");

        let response = self
            .http
            .post(self.url(AUTH_PATH))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(AUTH_PATH, e))?;

        if response.status() != StatusCode::OK {
            return Err(ApiError::AuthFailed {
                status: Some(response.status().as_u16()),
            }
            .into());
        }

        let auth: AuthResponse = parse_json(AUTH_PATH, response).await?;
        if auth.jwt_token.is_empty() {
            return Err(ApiError::AuthFailed { status: None }.into());
        }

        debug!("✓ 访问令牌已获取");
        Ok(auth.jwt_token)
    }

    /// 发送请求，429 和 5xx 时重试
    async fn send_with_retry(
        &self,
        endpoint: &str,
        build: impl Fn() -> RequestBuilder,
    ) -> AppResult<Response> {
        let mut attempt = 0;
        loop {
            let response = build()
                .send()
                .await
                .map_err(|e| AppError::api_request_failed(endpoint, e))?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if !is_retryable(status) {
                return Err(AppError::bad_status(endpoint, status.as_u16()));
            }

            if attempt >= self.max_retries {
                if status == StatusCode::TOO_MANY_REQUESTS {
                    return Err(ApiError::RateLimited {
                        endpoint: endpoint.to_string(),
                        attempts: attempt,
                    }
                    .into());
                }
                return Err(AppError::bad_status(endpoint, status.as_u16()));
            }

            attempt += 1;
            warn!(
                "API 返回 {} ({}), 第 {}/{} 次重试...",
                status, endpoint, attempt, self.max_retries
            );
            sleep(RETRY_BACKOFF * attempt as u32).await;
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl StepSource for SkysmartClient {
    async fn resolve_steps(&self, task_hash: &str) -> Vec<String> {
        match self.preview(task_hash).await {
            Ok(steps) => steps,
            Err(e) => {
                warn!("[作业 {}] ⚠️ 获取步骤列表失败: {}", task_hash, e);
                Vec::new()
            }
        }
    }

    async fn fetch_step_markup(&self, step_id: &str) -> AppResult<String> {
        self.load_step(step_id).await
    }
}

/// 是否值得重试
fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

async fn parse_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
    response.json::<T>().await.map_err(|source| {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_response_tolerates_missing_meta() {
        let preview: PreviewResponse = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(preview.meta.step_uuids.is_empty());

        let preview: PreviewResponse =
            serde_json::from_str(r#"{"meta":{"stepUuids":["s1","s2"]}}"#).unwrap();
        assert_eq!(preview.meta.step_uuids, vec!["s1", "s2"]);
    }

    #[test]
    fn step_response_reads_content() {
        let step: StepResponse =
            serde_json::from_str(r#"{"uuid":"s1","content":"<vim-test-item correct=\"true\">Paris</vim-test-item>"}"#)
                .unwrap();
        assert!(step.content.contains("Paris"));
    }

    #[test]
    fn auth_response_reads_token() {
        let auth: AuthResponse = serde_json::from_str(r#"{"jwtToken":"abc.def"}"#).unwrap();
        assert_eq!(auth.jwt_token, "abc.def");
    }

    #[test]
    fn retry_policy() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
    }

    #[test]
    fn client_trims_base_url() {
        let config = Config {
            api_base_url: "https://api.example.test/".to_string(),
            ..Config::default()
        };
        let client = SkysmartClient::new(&config).unwrap();
        assert_eq!(client.url(PREVIEW_PATH), "https://api.example.test/api/v1/task/preview");
    }
}
