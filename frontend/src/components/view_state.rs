//! 数据视图的通用加载状态
//!
//! `Idle -> Loading -> Failed | Ready`。失败状态不携带数据，
//! 因此错误提示永远不会和上一次的列表同时出现。

use leptos::prelude::*;

use crate::api::{ApiError, NOT_LOGGED_IN};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> LoadState<T> {
    /// 将请求结果落定为终态；未登录以外的错误统一显示 `fallback`
    pub fn settle(result: Result<T, ApiError>, fallback: &str) -> Self {
        match result {
            Ok(data) => LoadState::Ready(data),
            Err(ApiError::Unauthenticated) => LoadState::Failed(NOT_LOGGED_IN.to_string()),
            Err(e) => {
                log::warn!("[View] {}: {}", fallback, e);
                LoadState::Failed(fallback.to_string())
            }
        }
    }

    /// 没有会话时直接进入的终态
    pub fn signed_out() -> Self {
        LoadState::Failed(NOT_LOGGED_IN.to_string())
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// 加载中占位
#[component]
pub fn Loading(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="loading">
            <span class="loading-spinner"></span>
            " " {label}
        </div>
    }
}

/// 错误提示
#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! { <div class="error" role="alert">{message}</div> }
}
