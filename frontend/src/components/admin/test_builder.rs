//! 组卷表单：标题 + 题目多选

use dsapro_shared::Question;
use leptos::prelude::*;

use super::Notice;
use super::form_state::TestBuilderState;
use crate::api::NOT_LOGGED_IN;
use crate::auth::use_auth;
use crate::components::view_state::{ErrorMessage, LoadState, Loading};
use crate::web::lifecycle::{RequestGeneration, spawn_fenced};

#[component]
pub fn TestBuilder(
    questions: RwSignal<LoadState<Vec<Question>>>,
    notice: Notice,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let generation = RequestGeneration::for_view();
    let state = TestBuilderState::new();
    let (saving, set_saving) = signal(false);

    // 题库刷新后丢弃已不存在的勾选
    Effect::new(move |_| {
        questions.with(|q| {
            if let Some(list) = q.ready() {
                state.selection.update(|selection| selection.retain_known(list));
            }
        });
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let request = match state.to_request() {
            Ok(request) => request,
            Err(e) => {
                notice.error(e.to_string());
                return;
            }
        };
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
                        log::info!("[Admin] test created");
                        notice.success("Test created successfully!");
                        state.reset();
                        on_created.run(());
                    }
                    Err(e) => {
                        log::warn!("[Admin] create test failed: {}", e);
                        notice.error(e.user_message("Failed to create test."));
                    }
                }
            },
        );
    };

    let question_list = move || match questions.get() {
        LoadState::Idle | LoadState::Loading => {
            view! { <Loading label="Loading questions..." /> }.into_any()
        }
        LoadState::Failed(message) => view! { <ErrorMessage message=message /> }.into_any(),
        LoadState::Ready(list) if list.is_empty() => {
            view! { <p class="empty-state">"No questions found. Please add a question first."</p> }
                .into_any()
        }
        LoadState::Ready(list) => list
            .into_iter()
            .map(|question| {
                let checked = {
                    let id = question.id.clone();
                    move || state.selection.with(|s| s.contains(&id))
                };
                let id = question.id;
                view! {
                    <label class="question-checkbox">
                        <input
                            type="checkbox"
                            prop:checked=checked
                            on:change=move |_| state.toggle(&id)
                        />
                        {question.question_text}
                    </label>
                }
            })
            .collect_view()
            .into_any(),
    };

    view! {
        <form on:submit=on_submit class="admin-form">
            <h2>"Create Test"</h2>

            <div class="form-group">
                <label for="test_title">"Test Title"</label>
                <input
                    id="test_title"
                    type="text"
                    on:input=move |ev| state.title.set(event_target_value(&ev))
                    prop:value=move || state.title.get()
                />
            </div>

            <div class="form-group">
                <label>
                    "Questions "
                    <span class="selection-count">
                        {move || format!("({} selected)", state.selection.with(|s| s.len()))}
                    </span>
                </label>
                <div class="question-select-list">{question_list}</div>
            </div>

            <button type="submit" class="admin-button" disabled=move || saving.get()>
                {move || if saving.get() { "Creating..." } else { "Create Test" }}
            </button>
        </form>
    }
}
