//! 答题、排行榜与出题的纯逻辑
//!
//! 不依赖 DOM，前端组件只负责把这里的状态绑定到 signal 上。

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::protocol::CreateTestRequest;
use crate::{AnswerEntry, LeaderboardEntry, NewQuestion, Question};

/// 新建题目时的选项数量
pub const OPTION_COUNT: usize = 4;

/// 仪表盘侧栏展示的排名人数
pub const TOP_RANKERS: usize = 3;

// =========================================================
// 表单校验错误
// =========================================================

/// `Display` 即展示给用户的提示文本
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Question text cannot be empty.")]
    EmptyQuestionText,
    #[error("Option {0} cannot be empty.")]
    BlankOption(usize),
    #[error("Correct answer must match one option exactly.")]
    AnswerNotInOptions,
    #[error("Please enter a test title.")]
    BlankTitle,
    #[error("Please select at least one question for the test.")]
    NoQuestionsSelected,
}

impl NewQuestion {
    /// 空白的四选项草稿
    pub fn blank() -> Self {
        Self {
            question_text: String::new(),
            options: vec![String::new(); OPTION_COUNT],
            correct_answer: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.question_text.trim().is_empty() {
            return Err(FormError::EmptyQuestionText);
        }
        if let Some(pos) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(FormError::BlankOption(pos + 1));
        }
        if !self.options.iter().any(|o| *o == self.correct_answer) {
            return Err(FormError::AnswerNotInOptions);
        }
        Ok(())
    }
}

// =========================================================
// 答题卡 (Answer Sheet)
// =========================================================

/// 题目 ID -> 所选选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selected: HashMap<String, String>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录选择，重复选择同一题会覆盖之前的答案
    pub fn select(&mut self, question_id: impl Into<String>, answer: impl Into<String>) {
        self.selected.insert(question_id.into(), answer.into());
    }

    pub fn selected(&self, question_id: &str) -> Option<&str> {
        self.selected.get(question_id).map(String::as_str)
    }

    pub fn answered(&self) -> usize {
        self.selected.len()
    }

    /// 按测试中的题目顺序生成提交列表，与选择顺序无关。
    ///
    /// 未作答的题目不出现在列表中。
    pub fn to_entries(&self, questions: &[Question]) -> Vec<AnswerEntry> {
        questions
            .iter()
            .filter_map(|q| {
                self.selected.get(&q.id).map(|answer| AnswerEntry {
                    question_id: q.id.clone(),
                    selected_answer: answer.clone(),
                })
            })
            .collect()
    }
}

// =========================================================
// 题目游标 (Pagination)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCursor {
    index: usize,
    len: usize,
}

impl QuestionCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// 前进一题，已在最后一题时返回 `false`
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn current<'a>(&self, questions: &'a [Question]) -> Option<&'a Question> {
        questions.get(self.index)
    }

    /// "Question 2 of 5"
    pub fn label(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.len)
    }
}

// =========================================================
// 排行榜 (Leaderboard)
// =========================================================

/// 排名徽章：前三名为奖牌，其余显示名次
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBadge {
    Gold,
    Silver,
    Bronze,
    Place(usize),
}

impl RankBadge {
    /// `index` 从 0 开始
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => RankBadge::Gold,
            1 => RankBadge::Silver,
            2 => RankBadge::Bronze,
            n => RankBadge::Place(n + 1),
        }
    }

    pub fn is_medal(&self) -> bool {
        !matches!(self, RankBadge::Place(_))
    }
}

impl fmt::Display for RankBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankBadge::Gold => f.write_str("🥇"),
            RankBadge::Silver => f.write_str("🥈"),
            RankBadge::Bronze => f.write_str("🥉"),
            RankBadge::Place(n) => write!(f, "{}", n),
        }
    }
}

pub fn top_rankers(entries: &[LeaderboardEntry], n: usize) -> &[LeaderboardEntry] {
    &entries[..entries.len().min(n)]
}

// =========================================================
// 组卷选择 (Test Builder Selection)
// =========================================================

/// 已勾选的题目 ID，保持勾选顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSelection {
    ids: Vec<String>,
}

impl QuestionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换勾选状态，返回切换后是否选中
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|x| x == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// 丢弃已不存在于题库中的 ID（题库刷新后调用）
    pub fn retain_known(&mut self, questions: &[Question]) {
        self.ids.retain(|id| questions.iter().any(|q| q.id == *id));
    }

    pub fn to_request(&self, title: &str) -> Result<CreateTestRequest, FormError> {
        if title.trim().is_empty() {
            return Err(FormError::BlankTitle);
        }
        if self.ids.is_empty() {
            return Err(FormError::NoQuestionsSelected);
        }
        Ok(CreateTestRequest {
            title: title.trim().to_string(),
            questions: self.ids.clone(),
        })
    }
}

#[cfg(test)]
mod tests;
