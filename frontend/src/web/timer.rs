//! 定时器封装模块
//!
//! 基于 `gloo_timers` 的一次性延时，绑定到组件生命周期。

use std::time::Duration;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// 一次性延时
///
/// 封装 `setTimeout`。当 `Delay` 被 drop 时，未触发的回调会被取消。
pub struct Delay {
    _timeout: Timeout,
}

impl Delay {
    /// 创建新的延时
    ///
    /// # 参数
    /// - `duration`: 延时时长，超过 `u32::MAX` 毫秒时截断
    /// - `callback`: 到期时执行的回调
    pub fn new<F>(duration: Duration, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        Self {
            _timeout: Timeout::new(millis, callback),
        }
    }
}

/// 组件持有的延时槽位
///
/// 槽位属于创建它的 reactive owner，owner 清理（组件卸载）时其中的延时随之 drop，
/// 回调不会在卸载后执行。重新 `arm` 会取消上一次的延时。
#[derive(Clone, Copy)]
pub struct DelaySlot(StoredValue<Option<Delay>, LocalStorage>);

impl DelaySlot {
    pub fn new() -> Self {
        Self(StoredValue::new_local(None))
    }

    pub fn arm<F>(&self, duration: Duration, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.0.set_value(Some(Delay::new(duration, callback)));
    }
}

impl Default for DelaySlot {
    fn default() -> Self {
        Self::new()
    }
}
