//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、访问级别以及守卫判定。
//!
//! 守卫只改善体验，并不是安全边界：后端必须独立校验令牌和角色。

use std::fmt::Display;

use dsapro_shared::Session;

/// 当前访问者的身份级别，由会话推导
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    Member,
    Admin,
}

impl Viewer {
    pub fn of(session: Option<&Session>) -> Self {
        match session {
            None => Viewer::Anonymous,
            Some(s) if s.is_admin() => Viewer::Admin,
            Some(_) => Viewer::Member,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        !matches!(self, Viewer::Anonymous)
    }
}

/// 路由的访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// 需要任意已登录会话
    Authenticated,
    /// 需要管理员角色
    Admin,
}

impl Access {
    /// 该级别是否放行给定访问者
    pub fn permits(&self, viewer: Viewer) -> bool {
        match self {
            Access::Public => true,
            Access::Authenticated => viewer.is_signed_in(),
            Access::Admin => viewer == Viewer::Admin,
        }
    }

    /// 守卫拒绝时的重定向目标
    pub fn redirect_target(&self) -> AppRoute {
        match self {
            Access::Public => AppRoute::Home,
            Access::Authenticated => AppRoute::Login,
            Access::Admin => AppRoute::Dashboard,
        }
    }
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    Login,
    Register,
    Dashboard,
    Tests,
    Leaderboard,
    /// 答题页，携带测试 ID
    Test(String),
    Admin,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段以及末尾的 `/`。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/tests" => Self::Tests,
            "/leaderboard" => Self::Leaderboard,
            "/admin" => Self::Admin,
            other => match other.strip_prefix("/test/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Test(id.to_string()),
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Tests => "/tests".to_string(),
            Self::Leaderboard => "/leaderboard".to_string(),
            Self::Test(id) => format!("/test/{}", id),
            Self::Admin => "/admin".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由的访问级别**
    pub fn access(&self) -> Access {
        match self {
            Self::Dashboard | Self::Tests | Self::Leaderboard | Self::Test(_) => {
                Access::Authenticated
            }
            Self::Admin => Access::Admin,
            Self::Home | Self::Login | Self::Register | Self::NotFound => Access::Public,
        }
    }

    /// 单步守卫：放行返回 `None`，否则返回重定向目标
    pub fn guard(&self, viewer: Viewer) -> Option<AppRoute> {
        let access = self.access();
        if access.permits(viewer) {
            None
        } else {
            Some(access.redirect_target())
        }
    }

    /// 反复应用守卫直到落在可访问的路由上
    ///
    /// 匿名用户访问 `/admin` 会先被送往 `/dashboard`，再被送往 `/login`。
    pub fn resolve(self, viewer: Viewer) -> AppRoute {
        let mut route = self;
        // 重定向链最长为 2，留出余量避免死循环
        for _ in 0..4 {
            match route.guard(viewer) {
                Some(next) => route = next,
                None => return route,
            }
        }
        route
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
