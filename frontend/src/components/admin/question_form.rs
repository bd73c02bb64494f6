//! 新建题目表单
//!
//! 本地校验通过后提交，成功时重置表单并刷新题库。

use dsapro_shared::quiz::OPTION_COUNT;
use leptos::prelude::*;

use super::Notice;
use super::form_state::QuestionFormState;
use crate::api::NOT_LOGGED_IN;
use crate::auth::use_auth;
use crate::web::lifecycle::{RequestGeneration, spawn_fenced};

#[component]
pub fn QuestionForm(notice: Notice, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let generation = RequestGeneration::for_view();
    let state = QuestionFormState::new();
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let request = state.to_request();
        if let Err(e) = request.validate() {
            notice.error(e.to_string());
            return;
        }
        let Some(api) = auth.api_untracked() else {
            notice.error(NOT_LOGGED_IN);
            return;
        };

        notice.clear();
        set_saving.set(true);
        spawn_fenced(
            generation.begin(),
            async move { api.send(&request).await },
            move |result| {
                set_saving.set(false);
                match result {
                    Ok(_) => {
                        log::info!("[Admin] question added");
                        notice.success("Question added successfully!");
                        state.reset();
                        on_saved.run(());
                    }
                    Err(e) => {
                        log::warn!("[Admin] add question failed: {}", e);
                        notice.error(e.user_message("Failed to add question."));
                    }
                }
            },
        );
    };

    let option_inputs = (0..OPTION_COUNT)
        .map(|i| {
            view! {
                <input
                    type="text"
                    class="option-input"
                    placeholder=format!("Option {}", i + 1)
                    on:input=move |ev| state.set_option(i, event_target_value(&ev))
                    prop:value=move || state.option(i)
                />
            }
        })
        .collect_view();

    view! {
        <form on:submit=on_submit class="admin-form">
            <h2>"Add Question"</h2>

            <div class="form-group">
                <label for="question_text">"Question"</label>
                <textarea
                    id="question_text"
                    rows="3"
                    on:input=move |ev| state.question_text.set(event_target_value(&ev))
                    prop:value=move || state.question_text.get()
                ></textarea>
            </div>

            <div class="form-group">
                <label>"Options"</label>
                {option_inputs}
            </div>

            <div class="form-group">
                <label for="correct_answer">"Correct Answer"</label>
                <input
                    id="correct_answer"
                    type="text"
                    placeholder="Must match one option exactly"
                    on:input=move |ev| state.correct_answer.set(event_target_value(&ev))
                    prop:value=move || state.correct_answer.get()
                />
            </div>

            <button type="submit" class="admin-button" disabled=move || saving.get()>
                {move || if saving.get() { "Adding..." } else { "Add Question" }}
            </button>
        </form>
    }
}
