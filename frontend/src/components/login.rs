use dsapro_shared::Session;
use dsapro_shared::protocol::{LoginRequest, RegisterRequest};
use leptos::prelude::*;

use crate::api::{ApiError, QuizApi};
use crate::auth::{AuthContext, use_auth};
use crate::web::lifecycle::{RequestGeneration, spawn_fenced};
use crate::web::router::{Link, use_navigate};

const LOGIN_FALLBACK: &str = "Failed to login. Please try again.";
const REGISTER_FALLBACK: &str = "Failed to register. Please try again.";

/// 登录/注册共用的提交状态
#[derive(Clone, Copy)]
struct AuthFormState {
    is_submitting: RwSignal<bool>,
    error_msg: RwSignal<Option<String>>,
}

impl AuthFormState {
    fn new() -> Self {
        Self {
            is_submitting: RwSignal::new(false),
            error_msg: RwSignal::new(None),
        }
    }

    /// 进入提交中状态；已有请求在途时返回 `false`
    fn begin(&self) -> bool {
        if self.is_submitting.get_untracked() {
            return false;
        }
        self.error_msg.set(None);
        self.is_submitting.set(true);
        true
    }

    /// 成功则写入会话并前往仪表盘，失败则展示后端消息或兜底文本
    fn finish(
        &self,
        auth: AuthContext,
        navigate: impl Fn(&str),
        result: Result<Session, ApiError>,
        fallback: &str,
    ) {
        self.is_submitting.set(false);
        match result {
            Ok(session) => {
                auth.login(session);
                navigate("/dashboard");
            }
            Err(e) => {
                log::warn!("[Auth] {}", e);
                self.error_msg.set(Some(e.user_message(fallback)));
            }
        }
    }
}

#[component]
fn FormError(state: AuthFormState) -> impl IntoView {
    move || {
        state
            .error_msg
            .get()
            .map(|msg| view! { <p class="error-message" role="alert">{msg}</p> })
    }
}

#[component]
fn SubmitButton(state: AuthFormState, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <button type="submit" class="login-button" disabled=move || state.is_submitting.get()>
            {move || if state.is_submitting.get() { "Please wait...".to_string() } else { label.clone() }}
        </button>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let generation = RequestGeneration::for_view();
    let state = AuthFormState::new();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !state.begin() {
            return;
        }

        let request = LoginRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_fenced(
            generation.begin(),
            async move { QuizApi::anonymous().send(&request).await },
            move |result| state.finish(auth, navigate, result, LOGIN_FALLBACK),
        );
    };

    view! {
        <div class="login-container">
            <form on:submit=on_submit class="login-form">
                <h2>"Login"</h2>
                <FormError state=state />

                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        placeholder="Enter your email"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        required
                    />
                </div>

                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        placeholder="Enter your password"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        required
                    />
                </div>

                <SubmitButton state=state label="Login" />
                <p class="form-switch">
                    "No account yet? " <Link to="/register">"Register"</Link>
                </p>
            </form>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let generation = RequestGeneration::for_view();
    let state = AuthFormState::new();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !state.begin() {
            return;
        }

        let request = RegisterRequest {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_fenced(
            generation.begin(),
            async move { QuizApi::anonymous().send(&request).await },
            move |result| state.finish(auth, navigate, result, REGISTER_FALLBACK),
        );
    };

    view! {
        <div class="login-container">
            <form on:submit=on_submit class="login-form">
                <h2>"Register"</h2>
                <FormError state=state />

                <div class="form-group">
                    <label for="name">"Name"</label>
                    <input
                        type="text"
                        id="name"
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        prop:value=name
                        required
                    />
                </div>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        required
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        required
                    />
                </div>

                <SubmitButton state=state label="Register" />
                <p class="form-switch">
                    "Already registered? " <Link to="/login">"Login"</Link>
                </p>
            </form>
        </div>
    }
}
