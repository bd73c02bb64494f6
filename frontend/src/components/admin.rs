//! 管理面板
//!
//! 题库列表由面板持有，两个表单提交成功后通过回调触发刷新。

mod form_state;
mod question_form;
mod test_builder;

use dsapro_shared::Question;
use dsapro_shared::protocol::ListQuestionsRequest;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::web::lifecycle::{RequestGeneration, spawn_fenced};

use super::view_state::LoadState;
use question_form::QuestionForm;
use test_builder::TestBuilder;

/// 面板顶部的操作提示
#[derive(Clone, Copy)]
pub struct Notice {
    // 消息内容, 是否出错
    message: RwSignal<Option<(String, bool)>>,
}

impl Notice {
    fn new() -> Self {
        Self {
            message: RwSignal::new(None),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.message.set(Some((text.into(), false)));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.message.set(Some((text.into(), true)));
    }

    pub fn clear(&self) {
        self.message.set(None);
    }
}

#[component]
pub fn AdminPanel() -> impl IntoView {
    let auth = use_auth();
    let generation = RequestGeneration::for_view();
    let questions = RwSignal::new(LoadState::<Vec<Question>>::Idle);
    let notice = Notice::new();

    let reload = Callback::new(move |_: ()| {
        let Some(api) = auth.api_untracked() else {
            questions.set(LoadState::signed_out());
            return;
        };
        // 刷新期间保留旧列表
        if questions.with_untracked(|q| q.ready().is_none()) {
            questions.set(LoadState::Loading);
        }
        spawn_fenced(
            generation.begin(),
            async move { api.send(&ListQuestionsRequest).await },
            move |result| questions.set(LoadState::settle(result, "Failed to load questions.")),
        );
    });
    reload.run(());

    view! {
        <div class="admin-container">
            <h1>"Admin Panel"</h1>

            {move || {
                notice.message.get().map(|(text, is_err)| {
                    let class = if is_err { "admin-message error" } else { "admin-message success" };
                    view! { <div class=class role="status">{text}</div> }
                })
            }}

            <div class="admin-grid">
                <QuestionForm notice=notice on_saved=reload />
                <TestBuilder questions=questions notice=notice on_created=reload />
            </div>
        </div>
    }
}
