use crate::{
    AnswerEntry, LeaderboardEntry, NewQuestion, Question, Score, Session, Test, TestSummary,
    UserProfile,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// GET requests never carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, relative to the API base address.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request must carry the session's bearer token.
    const REQUIRES_AUTH: bool = true;

    /// Concrete path for this request instance. Override for parameterised routes.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = Session;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = Session;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;
}

/// Current user's profile
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = UserProfile;
    const PATH: &'static str = "/users/profile";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Tests
// =========================================================

/// List all tests
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTestsRequest;

impl ApiRequest for ListTestsRequest {
    type Response = Vec<TestSummary>;
    const PATH: &'static str = "/tests";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Fetch one test with its questions
#[derive(Debug, Serialize, Deserialize)]
pub struct GetTestRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for GetTestRequest {
    type Response = Test;
    const PATH: &'static str = "/tests";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestRequest {
    pub test_id: String,
    pub answers: Vec<AnswerEntry>,
}

impl ApiRequest for SubmitTestRequest {
    type Response = Score;
    const PATH: &'static str = "/tests/submit";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardRequest;

impl ApiRequest for LeaderboardRequest {
    type Response = Vec<LeaderboardEntry>;
    const PATH: &'static str = "/tests/leaderboard";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListQuestionsRequest;

impl ApiRequest for ListQuestionsRequest {
    type Response = Vec<Question>;
    const PATH: &'static str = "/admin/questions";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Create a question. The admin view re-fetches the list afterwards, so the body is ignored.
impl ApiRequest for NewQuestion {
    type Response = IgnoredAny;
    const PATH: &'static str = "/admin/questions";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestRequest {
    pub title: String,
    /// Selected question ids
    pub questions: Vec<String>,
}

impl ApiRequest for CreateTestRequest {
    type Response = IgnoredAny;
    const PATH: &'static str = "/admin/tests";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_test_path_includes_id() {
        let req = GetTestRequest { id: "abc".into() };
        assert_eq!(req.path(), "/tests/abc");
        assert_eq!(ListTestsRequest.path(), "/tests");
    }

    #[test]
    fn auth_endpoints_do_not_require_token() {
        assert!(!LoginRequest::REQUIRES_AUTH);
        assert!(!RegisterRequest::REQUIRES_AUTH);
        assert!(SubmitTestRequest::REQUIRES_AUTH);
        assert!(CreateTestRequest::REQUIRES_AUTH);
    }

    #[test]
    fn submit_request_wire_shape() {
        let req = SubmitTestRequest {
            test_id: "t1".into(),
            answers: vec![AnswerEntry {
                question_id: "q1".into(),
                selected_answer: "A".into(),
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "testId": "t1",
                "answers": [{ "questionId": "q1", "selectedAnswer": "A" }]
            })
        );
    }

    #[test]
    fn get_methods_carry_no_body() {
        assert!(!HttpMethod::Get.has_body());
        assert!(HttpMethod::Post.has_body());
        assert_eq!(LeaderboardRequest::METHOD.as_str(), "GET");
    }
}
