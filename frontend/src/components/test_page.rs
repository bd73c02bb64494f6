//! 答题页
//!
//! 加载测试 -> 逐题作答 -> 一次性提交 -> 显示分数。

use dsapro_shared::protocol::{GetTestRequest, SubmitTestRequest};
use dsapro_shared::quiz::{AnswerSheet, QuestionCursor};
use dsapro_shared::{Question, Score, Test};
use leptos::prelude::*;

use crate::api::NOT_LOGGED_IN;
use crate::auth::use_auth;
use crate::components::view_state::{ErrorMessage, LoadState, Loading};
use crate::web::lifecycle::{RequestGeneration, spawn_fenced};
use crate::web::router::use_navigate;

const SUBMIT_FALLBACK: &str = "Failed to submit test.";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Answering,
    Submitting,
    Submitted(Score),
}

#[component]
pub fn TestPage(id: String) -> impl IntoView {
    let auth = use_auth();
    let generation = RequestGeneration::for_view();
    let test = RwSignal::new(LoadState::<Test>::Idle);

    match auth.api_untracked() {
        Some(api) => {
            test.set(LoadState::Loading);
            let request = GetTestRequest { id };
            spawn_fenced(
                generation.begin(),
                async move { api.send(&request).await },
                move |result| test.set(LoadState::settle(result, "Test not found.")),
            );
        }
        None => test.set(LoadState::signed_out()),
    }

    move || match test.get() {
        LoadState::Idle | LoadState::Loading => {
            view! { <Loading label="Loading Test..." /> }.into_any()
        }
        LoadState::Failed(message) => view! { <ErrorMessage message=message /> }.into_any(),
        LoadState::Ready(test) if !test.has_questions() => view! {
            <div class="test-container">
                <h1>{test.title}</h1>
                <p class="empty-state">"This test has no questions yet."</p>
            </div>
        }
        .into_any(),
        LoadState::Ready(test) => view! { <TestRunner test=test /> }.into_any(),
    }
}

/// 答题流程，只在测试至少有一道题时渲染
#[component]
fn TestRunner(test: Test) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let generation = RequestGeneration::for_view();

    let Test {
        id: test_id,
        title,
        questions,
    } = test;
    let cursor = RwSignal::new(QuestionCursor::new(questions.len()));
    let questions = StoredValue::new(questions);
    let answers = RwSignal::new(AnswerSheet::new());
    let phase = RwSignal::new(Phase::Answering);
    let error_msg = RwSignal::new(Option::<String>::None);

    let score = Memo::new(move |_| match phase.get() {
        Phase::Submitted(score) => Some(score),
        _ => None,
    });

    let submit = Callback::new(move |_: ()| {
        // 提交进行中或已完成时忽略重复点击
        if phase.get_untracked() != Phase::Answering {
            return;
        }
        let Some(api) = auth.api_untracked() else {
            error_msg.set(Some(NOT_LOGGED_IN.to_string()));
            return;
        };

        let request = SubmitTestRequest {
            test_id: test_id.clone(),
            answers: answers.with_untracked(|sheet| questions.with_value(|qs| sheet.to_entries(qs))),
        };
        log::info!(
            "[Test] submitting {} answers for {}",
            request.answers.len(),
            request.test_id
        );
        error_msg.set(None);
        phase.set(Phase::Submitting);

        spawn_fenced(
            generation.begin(),
            async move { api.send(&request).await },
            move |result| match result {
                Ok(score) => phase.set(Phase::Submitted(score)),
                Err(e) => {
                    log::warn!("[Test] submit failed: {}", e);
                    error_msg.set(Some(SUBMIT_FALLBACK.to_string()));
                    phase.set(Phase::Answering);
                }
            },
        );
    });

    let current = move || cursor.with(|c| questions.with_value(|qs| c.current(qs).cloned()));
    let submitting = move || phase.get() == Phase::Submitting;

    view! {
        <div class="test-container">
            <h1>{title}</h1>
            {move || match score.get() {
                Some(score) => view! {
                    <div class="score-screen">
                        <h2>{format!("Your Score: {} / {}", score.score, score.total_questions)}</h2>
                        <button class="dashboard-button" on:click=move |_| navigate("/dashboard")>
                            "Go to Dashboard"
                        </button>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div class="question-card">
                        <p class="question-progress">{move || cursor.with(QuestionCursor::label)}</p>
                        {move || current().map(|q| view! { <QuestionOptions question=q answers=answers /> })}
                        {move || error_msg.get().map(|msg| view! { <ErrorMessage message=msg /> })}
                        <div class="question-nav">
                            <button
                                class="nav-button"
                                disabled=move || cursor.with(QuestionCursor::is_first) || submitting()
                                on:click=move |_| cursor.update(|c| {
                                    c.previous();
                                })
                            >
                                "Previous"
                            </button>
                            {move || if cursor.with(QuestionCursor::is_last) {
                                view! {
                                    <button
                                        class="submit-button"
                                        disabled=submitting
                                        on:click=move |_| submit.run(())
                                    >
                                        {move || if submitting() { "Submitting..." } else { "Submit" }}
                                    </button>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <button
                                        class="nav-button"
                                        disabled=submitting
                                        on:click=move |_| cursor.update(|c| {
                                            c.next();
                                        })
                                    >
                                        "Next"
                                    </button>
                                }
                                .into_any()
                            }}
                        </div>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

/// 单题的选项按钮，已选项高亮
#[component]
fn QuestionOptions(question: Question, answers: RwSignal<AnswerSheet>) -> impl IntoView {
    let Question {
        id,
        question_text,
        options,
        ..
    } = question;

    let buttons = options
        .into_iter()
        .map(|option| {
            let is_selected = {
                let id = id.clone();
                let option = option.clone();
                move || answers.with(|sheet| sheet.selected(&id) == Some(option.as_str()))
            };
            let on_click = {
                let id = id.clone();
                let option = option.clone();
                move |_| answers.update(|sheet| sheet.select(id.clone(), option.clone()))
            };
            view! {
                <button type="button" class="option-button" class:selected=is_selected on:click=on_click>
                    {option}
                </button>
            }
        })
        .collect_view();

    view! {
        <h3 class="question-text">{question_text}</h3>
        <div class="options-list">{buttons}</div>
    }
}
