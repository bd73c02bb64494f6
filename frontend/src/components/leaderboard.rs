use dsapro_shared::LeaderboardEntry;
use dsapro_shared::protocol::LeaderboardRequest;
use dsapro_shared::quiz::RankBadge;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::view_state::{ErrorMessage, LoadState, Loading};
use crate::web::lifecycle::{RequestGeneration, spawn_fenced};

#[component]
pub fn LeaderboardPage() -> impl IntoView {
    let auth = use_auth();
    let generation = RequestGeneration::for_view();
    let entries = RwSignal::new(LoadState::<Vec<LeaderboardEntry>>::Idle);

    match auth.api_untracked() {
        Some(api) => {
            entries.set(LoadState::Loading);
            spawn_fenced(
                generation.begin(),
                async move { api.send(&LeaderboardRequest).await },
                move |result| {
                    entries.set(LoadState::settle(result, "Failed to fetch leaderboard data."))
                },
            );
        }
        None => entries.set(LoadState::signed_out()),
    }

    view! {
        <div class="leaderboard-container">
            <h1>"Leaderboard"</h1>
            {move || match entries.get() {
                LoadState::Idle | LoadState::Loading => {
                    view! { <Loading label="Loading leaderboard..." /> }.into_any()
                }
                LoadState::Failed(message) => view! { <ErrorMessage message=message /> }.into_any(),
                LoadState::Ready(list) if list.is_empty() => view! {
                    <p class="empty-state">
                        "No scores recorded yet. Be the first to complete a test!"
                    </p>
                }
                .into_any(),
                LoadState::Ready(list) => view! {
                    <table class="leaderboard-table">
                        <thead>
                            <tr>
                                <th>"Rank"</th>
                                <th>"Name"</th>
                                <th>"Total Score"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .enumerate()
                                .map(|(index, entry)| {
                                    let badge = RankBadge::for_index(index);
                                    let row_class = if badge.is_medal() { "medal-row" } else { "" };
                                    view! {
                                        <tr class=row_class>
                                            <td class="rank">{badge.to_string()}</td>
                                            <td>{entry.name}</td>
                                            <td>{entry.total_score}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any(),
            }}
        </div>
    }
}
