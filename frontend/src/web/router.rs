//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, Viewer};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入访问者信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前访问者（注入的信号）
    viewer: Signal<Viewer>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由从 URL 解析并立即经过守卫，被拒绝时替换地址栏。
    fn new(viewer: Signal<Viewer>) -> Self {
        let path = current_path();
        let requested = AppRoute::from_path(&path);
        let initial_route = requested.clone().resolve(viewer.get_untracked());
        if initial_route != requested {
            log::info!("[Router] {} denied on load, redirecting to {}", requested, initial_route);
            replace_history_state(&initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            viewer,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route);
    }

    /// 导航到指定路由，守卫拒绝时推入重定向目标
    fn navigate_to_route(&self, target_route: AppRoute) {
        let viewer = self.viewer.get_untracked();
        let resolved = target_route.clone().resolve(viewer);

        if resolved != target_route {
            log::info!("[Router] Access to {} denied. Redirecting to {}.", target_route, resolved);
        }

        push_history_state(&resolved.to_path());
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let viewer = self.viewer;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let resolved = target_route.clone().resolve(viewer.get_untracked());

            // popstate 时也执行守卫逻辑
            if resolved != target_route {
                log::info!("[Router] popstate to {} denied, replacing with {}", target_route, resolved);
                replace_history_state(&resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话变化时重新评估当前路由
    ///
    /// 例如在受保护页面注销后被送回登录页。
    fn setup_guard_effect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let viewer = self.viewer;

        Effect::new(move |_| {
            let viewer = viewer.get();
            let route = current_route.get_untracked();
            let resolved = route.clone().resolve(viewer);

            if resolved != route {
                log::info!(
                    "[Router] Viewer changed to {:?}, leaving {} for {}",
                    viewer,
                    route,
                    resolved
                );
                replace_history_state(&resolved.to_path());
                set_route.set(resolved);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(viewer: Signal<Viewer>) -> RouterService {
    let router = RouterService::new(viewer);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_guard_effect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone + Copy {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 访问者信号
    viewer: Signal<Viewer>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(viewer);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接：拦截点击交给路由服务，保留修饰键打开新标签页的行为
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
