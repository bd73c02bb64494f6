use dsapro_shared::TestSummary;
use dsapro_shared::protocol::ListTestsRequest;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::view_state::{ErrorMessage, LoadState, Loading};
use crate::web::lifecycle::{RequestGeneration, spawn_fenced};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn TestsListPage() -> impl IntoView {
    let auth = use_auth();
    let generation = RequestGeneration::for_view();
    let tests = RwSignal::new(LoadState::<Vec<TestSummary>>::Idle);

    match auth.api_untracked() {
        Some(api) => {
            tests.set(LoadState::Loading);
            spawn_fenced(
                generation.begin(),
                async move { api.send(&ListTestsRequest).await },
                move |result| tests.set(LoadState::settle(result, "Failed to fetch tests.")),
            );
        }
        None => tests.set(LoadState::signed_out()),
    }

    view! {
        <div class="tests-container">
            <h1>"Available Tests"</h1>
            {move || match tests.get() {
                LoadState::Idle | LoadState::Loading => {
                    view! { <Loading label="Loading tests..." /> }.into_any()
                }
                LoadState::Failed(message) => view! { <ErrorMessage message=message /> }.into_any(),
                LoadState::Ready(list) if list.is_empty() => {
                    view! { <p class="empty-state">"No tests are available at the moment."</p> }
                        .into_any()
                }
                LoadState::Ready(list) => view! {
                    <div class="tests-grid">
                        {list
                            .into_iter()
                            .map(|test| {
                                let href = AppRoute::Test(test.id).to_path();
                                view! {
                                    <Link to=href class="test-card">
                                        <h3>{test.title}</h3>
                                        <p>"Click to start the test"</p>
                                    </Link>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
