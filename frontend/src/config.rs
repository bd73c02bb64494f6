//! 运行时配置
//!
//! API 地址在编译期通过环境变量 `DSAPRO_API_URL` 覆盖，未设置时回落到本地默认值。

use std::time::Duration;

/// 本地开发时后端的默认地址
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";

/// 会话在 localStorage 中的固定键
pub const SESSION_STORAGE_KEY: &str = "dsapro_session";

/// 仪表盘欢迎页的展示时长
pub const SPLASH_DURATION: Duration = Duration::from_secs(3);

/// 当前构建使用的 API 地址
pub fn api_base_url() -> String {
    resolve_base_url(option_env!("DSAPRO_API_URL"))
}

/// 解析 API 地址：覆盖值为空白时忽略，去掉末尾的 `/`
pub fn resolve_base_url(override_url: Option<&str>) -> String {
    let url = override_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_API_URL);
    url.trim_end_matches('/').to_string()
}
