//! DSA Pro 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由与守卫定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: 后端 REST 客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod components {
    pub mod admin;
    pub mod dashboard;
    pub mod home;
    pub mod leaderboard;
    pub mod login;
    pub mod navbar;
    pub mod test_page;
    pub mod tests_list;
    pub mod view_state;
}

use std::sync::Arc;

use crate::auth::provide_auth;
use crate::components::admin::AdminPanel;
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::leaderboard::LeaderboardPage;
use crate::components::login::{LoginPage, RegisterPage};
use crate::components::navbar::Navbar;
use crate::components::test_page::TestPage;
use crate::components::tests_list::TestsListPage;

use leptos::prelude::*;

// 浏览器 API 封装模块
pub(crate) mod web {
    pub mod lifecycle;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use storage::{BrowserStorage, MemoryStorage, SessionStorage};
    pub use timer::DelaySlot;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};
use web::{BrowserStorage, MemoryStorage, SessionStorage};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。守卫已在路由服务中执行。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Tests => view! { <TestsListPage /> }.into_any(),
        AppRoute::Leaderboard => view! { <LeaderboardPage /> }.into_any(),
        AppRoute::Test(id) => view! { <TestPage id=id /> }.into_any(),
        AppRoute::Admin => view! { <AdminPanel /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="not-found">
                <h1>"404"</h1>
                <p>"Page not found."</p>
                <Link to="/">"Back to home"</Link>
            </div>
        }
        .into_any(),
    }
}

/// 选择会话持久化后端，localStorage 不可用时退回内存存储
fn session_storage() -> Arc<dyn SessionStorage> {
    match BrowserStorage::detect() {
        Some(storage) => Arc::new(storage),
        None => {
            log::warn!("[Auth] localStorage unavailable, session will not survive a reload");
            Arc::new(MemoryStorage::new())
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文并从存储恢复会话
    let auth_ctx = provide_auth(session_storage());

    // 2. 获取访问者信号，用于注入路由服务（解耦！）
    let viewer = auth_ctx.viewer_signal();

    view! {
        // 3. 路由器组件：注入访问者信号实现守卫
        <Router viewer=viewer>
            <Navbar />
            <main>
                <RouterOutlet matcher=route_matcher />
            </main>
        </Router>
    }
}
