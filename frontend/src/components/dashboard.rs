use dsapro_shared::protocol::{LeaderboardRequest, ProfileRequest};
use dsapro_shared::quiz::{TOP_RANKERS, top_rankers};
use dsapro_shared::{LeaderboardEntry, UserProfile};
use leptos::prelude::*;

use crate::api::ApiError;
use crate::auth::use_auth;
use crate::components::view_state::{ErrorMessage, LoadState, Loading};
use crate::config::SPLASH_DURATION;
use crate::web::DelaySlot;
use crate::web::lifecycle::{RequestGeneration, spawn_fenced};
use crate::web::router::Link;

const DASHBOARD_FALLBACK: &str = "Failed to fetch dashboard data.";

#[derive(Debug, Clone, PartialEq)]
struct DashboardData {
    profile: UserProfile,
    leaderboard: Vec<LeaderboardEntry>,
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let generation = RequestGeneration::for_view();
    let state = RwSignal::new(LoadState::<DashboardData>::Idle);
    let show_splash = RwSignal::new(true);
    let splash = DelaySlot::new();

    // 初始加载：资料和排行榜并发请求，任一失败整体失败
    match auth.api_untracked() {
        Some(api) => {
            state.set(LoadState::Loading);
            spawn_fenced(
                generation.begin(),
                async move {
                    let (profile, leaderboard) = futures::join!(
                        api.send(&ProfileRequest),
                        api.send(&LeaderboardRequest)
                    );
                    Ok::<_, ApiError>(DashboardData {
                        profile: profile?,
                        leaderboard: leaderboard?,
                    })
                },
                move |result| {
                    let next = LoadState::settle(result, DASHBOARD_FALLBACK);
                    // 资料就绪后展示欢迎页，计时器随视图一起销毁
                    if next.ready().is_some() {
                        splash.arm(SPLASH_DURATION, move || show_splash.set(false));
                    }
                    state.set(next);
                },
            );
        }
        None => state.set(LoadState::signed_out()),
    }

    move || match state.get() {
        LoadState::Idle | LoadState::Loading => {
            view! { <Loading label="Loading dashboard..." /> }.into_any()
        }
        LoadState::Failed(message) => view! { <ErrorMessage message=message /> }.into_any(),
        LoadState::Ready(data) if show_splash.get() => view! {
            <div class="splash-screen">
                <h1 class="splash-title">{format!("Welcome back, {}!", data.profile.name)}</h1>
            </div>
        }
        .into_any(),
        LoadState::Ready(data) => view! { <DashboardMain data=data /> }.into_any(),
    }
}

#[component]
fn DashboardMain(data: DashboardData) -> impl IntoView {
    let rankers = top_rankers(&data.leaderboard, TOP_RANKERS)
        .iter()
        .map(|entry| {
            view! { <li>{format!("{} - {} points", entry.name, entry.total_score)}</li> }
        })
        .collect_view();

    view! {
        <div class="dashboard-container">
            <header class="dashboard-header">
                <h1>{format!("Hello, {}", data.profile.name)}</h1>
                <p class="dashboard-email">{data.profile.email.clone()}</p>
            </header>

            <div class="dashboard-grid">
                <section class="dashboard-card">
                    <h2>"Ready for a challenge?"</h2>
                    <p>"Pick a test and see how you stack up."</p>
                    <Link to="/tests" class="dashboard-button">"Take a Test"</Link>
                </section>

                <section class="dashboard-card">
                    <h2>"Top Rankers"</h2>
                    {if data.leaderboard.is_empty() {
                        view! { <p>"No scores recorded yet."</p> }.into_any()
                    } else {
                        view! { <ol class="top-rankers">{rankers}</ol> }.into_any()
                    }}
                    <Link to="/leaderboard">"View full leaderboard"</Link>
                </section>
            </div>
        </div>
    }
}
