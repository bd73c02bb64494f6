//! DSA Pro 前后端共享的领域模型
//!
//! - 根模块：线上 JSON 结构（camelCase 字段）
//! - `protocol`: 每个后端端点对应一个请求类型
//! - `quiz`: 与 DOM 无关的答题/排行/出题逻辑

use serde::{Deserialize, Serialize};

pub mod protocol;
pub mod quiz;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const ROLE_ADMIN: &str = "admin";

// =========================================================
// 用户与会话 (Identity)
// =========================================================

/// 登录/注册成功后后端返回的会话载荷
///
/// 后端 ID 以 `_id` 下发，本地持久化时写作 `id`，两者都能读回。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    pub token: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

// =========================================================
// 题目与测试 (Questions & Tests)
// =========================================================

/// 选择题
///
/// 答题接口可能不下发 `correctAnswer`，因此是可选字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(alias = "_id")]
    pub id: String,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

/// 管理员新建题目的表单载荷
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Test {
    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }
}

/// 测试列表中的条目，忽略其余字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
}

// =========================================================
// 提交与成绩 (Submissions)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: String,
    pub selected_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub score: u32,
    pub total_questions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub total_score: i64,
}

/// 后端校验失败时的响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_accepts_backend_id_and_round_trips_locally() {
        let raw = r#"{"_id":"u1","name":"Ada","email":"ada@example.com","role":"admin","token":"t"}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(session.id, "u1");
        assert!(session.is_admin());

        let persisted = serde_json::to_string(&session).unwrap();
        assert!(persisted.contains(r#""id":"u1""#));
        let restored: Session = serde_json::from_str(&persisted).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn session_without_role_is_not_admin() {
        let raw = r#"{"id":"u2","name":"Bo","email":"bo@example.com","token":"t"}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert!(!session.is_admin());
    }

    #[test]
    fn test_without_questions_field_is_empty() {
        let test: Test = serde_json::from_str(r#"{"_id":"t1","title":"Week 1"}"#).unwrap();
        assert!(!test.has_questions());
    }

    #[test]
    fn question_uses_camel_case_and_optional_answer() {
        let raw = r#"{"_id":"q1","questionText":"2+2?","options":["3","4"]}"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.question_text, "2+2?");
        assert_eq!(q.correct_answer, None);
    }

    #[test]
    fn score_and_leaderboard_field_names() {
        let score: Score = serde_json::from_str(r#"{"score":3,"totalQuestions":5}"#).unwrap();
        assert_eq!(score.total_questions, 5);
        let entry: LeaderboardEntry =
            serde_json::from_str(r#"{"name":"Ada","totalScore":42}"#).unwrap();
        assert_eq!(entry.total_score, 42);
    }
}
