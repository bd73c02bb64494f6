//! 后端 REST API 客户端
//!
//! 任意 `ApiRequest` 都通过 [`QuizApi::send`] 发出：需要认证的端点附带
//! `Authorization: Bearer <token>`，失败统一转换为 [`ApiError`]。

use dsapro_shared::protocol::{ApiRequest, HttpMethod};
use dsapro_shared::{ErrorBody, HEADER_AUTHORIZATION, Session};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config;

/// 未登录时视图展示的提示
pub const NOT_LOGGED_IN: &str = "You are not logged in.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 端点需要令牌但当前没有会话
    #[error("no active session")]
    Unauthenticated,
    #[error("network error: {0}")]
    Network(String),
    /// 非 2xx 响应，`message` 来自响应体中的 `{ "message": ... }`
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// 根据状态码和响应体构造错误
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        ApiError::Status { status, message }
    }

    /// 展示给用户的文本：优先使用后端给出的消息，否则使用 `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Unauthenticated => NOT_LOGGED_IN.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// 解析响应体；空响应体按 `null` 处理，便于忽略响应的端点
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizApi {
    pub base_url: String,
    token: Option<String>,
}

impl QuizApi {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    /// 未登录客户端，仅能调用登录/注册
    pub fn anonymous() -> Self {
        Self::new(config::api_base_url(), None)
    }

    pub fn for_session(session: &Session) -> Self {
        Self::new(config::api_base_url(), Some(session.token.clone()))
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // 认证头
    fn auth_header(&self) -> Result<String, ApiError> {
        self.token
            .as_deref()
            .map(|token| format!("Bearer {}", token))
            .ok_or(ApiError::Unauthenticated)
    }

    /// 发送请求并解析响应
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let url = self.url(&request.path());
        let mut builder = match R::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
        };

        if R::REQUIRES_AUTH {
            builder = builder.header(HEADER_AUTHORIZATION, &self.auth_header()?);
        }

        let sent = if R::METHOD.has_body() {
            let body =
                serde_json::to_string(request).map_err(|e| ApiError::Encode(e.to_string()))?;
            builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| ApiError::Encode(e.to_string()))?
                .send()
                .await
        } else {
            builder.send().await
        };

        let res = sent.map_err(|e| {
            log::warn!("[Api] {} {} failed: {}", R::METHOD.as_str(), url, e);
            ApiError::Network(e.to_string())
        })?;

        let status = res.status();
        let ok = res.ok();
        let body = res
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !ok {
            log::warn!("[Api] {} {} -> {}", R::METHOD.as_str(), url, status);
            return Err(ApiError::from_status(status, &body));
        }

        log::debug!("[Api] {} {} -> {}", R::METHOD.as_str(), url, status);
        decode_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsapro_shared::Score;
    use serde::de::IgnoredAny;

    #[test]
    fn backend_message_is_preferred() {
        let err = ApiError::from_status(400, r#"{"message":"User already exists"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: Some("User already exists".into())
            }
        );
        assert_eq!(err.user_message("Failed to register."), "User already exists");
    }

    #[test]
    fn non_json_error_body_uses_fallback() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message("Failed to login."), "Failed to login.");

        let blank = ApiError::from_status(400, r#"{"message":"  "}"#);
        assert_eq!(blank.user_message("fallback"), "fallback");
    }

    #[test]
    fn network_and_session_errors_have_fixed_messages() {
        assert_eq!(
            ApiError::Network("offline".into()).user_message("Failed to fetch tests."),
            "Failed to fetch tests."
        );
        assert_eq!(ApiError::Unauthenticated.user_message("x"), NOT_LOGGED_IN);
    }

    #[test]
    fn decode_body_handles_empty_and_typed_bodies() {
        assert!(decode_body::<IgnoredAny>("").is_ok());
        assert!(decode_body::<IgnoredAny>(r#"{"ok":true}"#).is_ok());

        let score: Score = decode_body(r#"{"score":2,"totalQuestions":2}"#).unwrap();
        assert_eq!(score.score, 2);

        assert!(matches!(decode_body::<Score>(""), Err(ApiError::Decode(_))));
    }

    #[test]
    fn url_joins_base_and_path() {
        let api = QuizApi::new("http://localhost:5001/api/".into(), None);
        assert_eq!(api.url("/tests"), "http://localhost:5001/api/tests");
        assert_eq!(api.url("tests/1"), "http://localhost:5001/api/tests/1");
    }

    #[test]
    fn auth_header_requires_token() {
        let anonymous = QuizApi::new("http://x".into(), None);
        assert_eq!(anonymous.auth_header(), Err(ApiError::Unauthenticated));

        let signed_in = QuizApi::new("http://x".into(), Some("abc".into()));
        assert_eq!(signed_in.auth_header().unwrap(), "Bearer abc");
    }
}
