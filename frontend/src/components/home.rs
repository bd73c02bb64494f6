use leptos::prelude::*;

use crate::web::router::Link;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-container">
            <section class="hero-section">
                <div class="hero-content">
                    <h1 class="hero-title">"Master Data Structures & Algorithms"</h1>
                    <p class="hero-subtitle">
                        "Join weekly tests, track your progress, and climb the leaderboard. "
                        "Your journey to becoming a DSA pro starts here."
                    </p>
                    <Link to="/register" class="hero-cta-button">"Get Started for Free"</Link>
                </div>
                <div class="hero-image" aria-hidden="true"></div>
            </section>
        </div>
    }
}
