//! 认证模块
//!
//! 管理用户会话，与路由系统解耦。
//! 路由服务通过注入的访问者信号来执行守卫。
//!
//! - `SessionStore`: 纯逻辑核心，负责会话与持久化存储的同步
//! - `AuthContext`: 响应式外壳，通过 Context 在组件间共享

use std::sync::Arc;

use dsapro_shared::Session;
use leptos::prelude::*;

use crate::api::QuizApi;
use crate::config::SESSION_STORAGE_KEY;
use crate::web::SessionStorage;
use crate::web::route::Viewer;

/// 会话存储
///
/// 持久化层由调用方注入，内存中的会话始终是本标签页的唯一事实来源。
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    current: Option<Session>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// 从持久化存储恢复会话
    ///
    /// 内容损坏时删除该条目并保持未登录状态。不做服务端校验，也不检查过期。
    pub fn restore(&mut self) -> Option<&Session> {
        let raw = self.storage.read(SESSION_STORAGE_KEY)?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                log::info!("[Auth] restored session for {}", session.email);
                self.current = Some(session);
            }
            Err(e) => {
                log::warn!("[Auth] discarding malformed persisted session: {}", e);
                self.storage.remove(SESSION_STORAGE_KEY);
                self.current = None;
            }
        }
        self.current.as_ref()
    }

    /// 替换当前会话并持久化
    pub fn login(&mut self, session: Session) {
        match serde_json::to_string(&session) {
            Ok(raw) => {
                if !self.storage.write(SESSION_STORAGE_KEY, &raw) {
                    log::warn!("[Auth] could not persist session; it will last for this tab only");
                }
            }
            Err(e) => log::warn!("[Auth] could not serialize session: {}", e),
        }
        log::info!("[Auth] signed in as {} ({})", session.email, session.role);
        self.current = Some(session);
    }

    /// 清除当前会话与持久化条目
    pub fn logout(&mut self) {
        if !self.storage.remove(SESSION_STORAGE_KEY) {
            log::warn!("[Auth] could not remove persisted session");
        }
        if let Some(session) = self.current.take() {
            log::info!("[Auth] signed out {}", session.email);
        }
    }
}

/// 认证上下文
///
/// `session` 信号负责通知所有消费者，`store` 负责持久化；两者只在这里一起修改。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Option<Session>>,
    store: StoredValue<SessionStore>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            session: RwSignal::new(None),
            store: StoredValue::new(SessionStore::new(storage)),
        }
    }

    /// 当前会话（响应式）
    pub fn session(&self) -> Signal<Option<Session>> {
        self.session.into()
    }

    /// 访问者信号（用于路由服务注入）
    pub fn viewer_signal(&self) -> Signal<Viewer> {
        let session = self.session;
        Signal::derive(move || session.with(|s| Viewer::of(s.as_ref())))
    }

    /// 为当前会话构造 API 客户端，未登录时返回 `None`；不建立响应式依赖
    pub fn api_untracked(&self) -> Option<QuizApi> {
        self.session
            .with_untracked(|s| s.as_ref().map(QuizApi::for_session))
    }

    /// 从持久化存储恢复会话
    pub fn restore(&self) {
        let restored = self
            .store
            .try_update_value(|store| store.restore().cloned())
            .flatten();
        self.session.set(restored);
    }

    pub fn login(&self, session: Session) {
        self.store.update_value(|store| store.login(session.clone()));
        self.session.set(Some(session));
    }

    /// 注销
    ///
    /// 导航由路由服务的守卫 Effect 以及调用方负责。
    pub fn logout(&self) {
        self.store.update_value(SessionStore::logout);
        self.session.set(None);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 创建、初始化并提供认证上下文
///
/// 上下文随根 owner 存活，owner 清理时只释放内存状态，不触碰持久化存储。
pub fn provide_auth(storage: Arc<dyn SessionStorage>) -> AuthContext {
    let ctx = AuthContext::new(storage);
    ctx.restore();
    provide_context(ctx);
    on_cleanup(|| log::debug!("[Auth] session context disposed"));
    ctx
}

#[cfg(test)]
mod tests;
