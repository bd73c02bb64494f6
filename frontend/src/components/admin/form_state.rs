//! 表单状态管理模块
//!
//! 将管理面板两张表单的 signal 整合为结构体，负责数据的持有、重置，
//! 以及到请求对象的转换。

use dsapro_shared::NewQuestion;
use dsapro_shared::protocol::CreateTestRequest;
use dsapro_shared::quiz::{FormError, QuestionSelection};
use leptos::prelude::*;

/// 新建题目表单
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct QuestionFormState {
    pub question_text: RwSignal<String>,
    pub options: RwSignal<Vec<String>>,
    pub correct_answer: RwSignal<String>,
}

impl QuestionFormState {
    pub fn new() -> Self {
        let blank = NewQuestion::blank();
        Self {
            question_text: RwSignal::new(blank.question_text),
            options: RwSignal::new(blank.options),
            correct_answer: RwSignal::new(blank.correct_answer),
        }
    }

    /// 第 `index` 个选项的当前值
    pub fn option(&self, index: usize) -> String {
        self.options
            .with(|options| options.get(index).cloned().unwrap_or_default())
    }

    pub fn set_option(&self, index: usize, value: String) {
        self.options.update(|options| {
            if let Some(slot) = options.get_mut(index) {
                *slot = value;
            }
        });
    }

    pub fn reset(&self) {
        let blank = NewQuestion::blank();
        self.question_text.set(blank.question_text);
        self.options.set(blank.options);
        self.correct_answer.set(blank.correct_answer);
    }

    /// 转换为请求对象，校验由调用方负责
    pub fn to_request(&self) -> NewQuestion {
        NewQuestion {
            question_text: self.question_text.get_untracked(),
            options: self.options.get_untracked(),
            correct_answer: self.correct_answer.get_untracked(),
        }
    }
}

impl Default for QuestionFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// 组卷表单
#[derive(Clone, Copy)]
pub struct TestBuilderState {
    pub title: RwSignal<String>,
    pub selection: RwSignal<QuestionSelection>,
}

impl TestBuilderState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            selection: RwSignal::new(QuestionSelection::new()),
        }
    }

    pub fn toggle(&self, question_id: &str) {
        self.selection.update(|selection| {
            selection.toggle(question_id);
        });
    }

    pub fn reset(&self) {
        self.title.set(String::new());
        self.selection.update(QuestionSelection::clear);
    }

    pub fn to_request(&self) -> Result<CreateTestRequest, FormError> {
        let title = self.title.get_untracked();
        self.selection
            .with_untracked(|selection| selection.to_request(&title))
    }
}

impl Default for TestBuilderState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_form_builds_request_and_resets() {
        let state = QuestionFormState::new();
        state.question_text.set("2 + 2?".to_string());
        for (i, value) in ["1", "2", "3", "4"].into_iter().enumerate() {
            state.set_option(i, value.to_string());
        }
        state.correct_answer.set("4".to_string());

        let request = state.to_request();
        assert_eq!(request.options, vec!["1", "2", "3", "4"]);
        assert_eq!(request.validate(), Ok(()));

        state.reset();
        assert_eq!(state.to_request(), NewQuestion::blank());
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let state = QuestionFormState::new();
        state.set_option(9, "x".to_string());
        assert_eq!(state.option(9), "");
        assert_eq!(state.to_request(), NewQuestion::blank());
    }

    #[test]
    fn builder_toggle_twice_restores_selection() {
        let state = TestBuilderState::new();
        state.title.set("Arrays".to_string());
        state.toggle("q1");
        state.toggle("q2");
        state.toggle("q2");

        let request = state.to_request().expect("valid request");
        assert_eq!(request.questions, vec!["q1".to_string()]);
    }

    #[test]
    fn builder_reset_requires_new_selection() {
        let state = TestBuilderState::new();
        state.title.set("Arrays".to_string());
        state.toggle("q1");
        state.reset();

        assert_eq!(state.to_request().unwrap_err(), FormError::BlankTitle);
        state.title.set("Graphs".to_string());
        assert_eq!(
            state.to_request().unwrap_err(),
            FormError::NoQuestionsSelected
        );
    }
}
