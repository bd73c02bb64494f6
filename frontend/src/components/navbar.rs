use leptos::prelude::*;

use crate::auth::use_auth;
use crate::web::route::Viewer;
use crate::web::router::{Link, use_navigate};

/// 常驻导航栏，链接集合随访问者身份变化
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let viewer = auth.viewer_signal();

    let on_logout = move |_| {
        auth.logout();
        navigate("/");
    };

    view! {
        <nav class="navbar">
            <Link to="/" class="navbar-brand">"DSA PRO"</Link>
            <div class="nav-links">
                {move || match viewer.get() {
                    Viewer::Anonymous => view! {
                        <Link to="/login">"Login"</Link>
                        <Link to="/register">"Register"</Link>
                    }
                    .into_any(),
                    signed_in => view! {
                        {(signed_in == Viewer::Admin)
                            .then(|| view! { <Link to="/admin">"Admin Panel"</Link> })}
                        <Link to="/dashboard">"Dashboard"</Link>
                        <Link to="/tests">"Take a Test"</Link>
                        <Link to="/leaderboard">"Leaderboard"</Link>
                        <button on:click=on_logout class="nav-button">"Logout"</button>
                    }
                    .into_any(),
                }}
            </div>
        </nav>
    }
}
