//! 请求代数 (Request Generation)
//!
//! 浏览器 fetch 在组件卸载后仍会完成。每个视图持有一个递增计数器，
//! 发起请求时领取票据，响应到达时只有最新且视图仍存活的票据才允许写入状态。

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;

/// 视图级请求计数器
#[derive(Clone, Debug, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

/// 单次请求的票据
#[derive(Clone, Debug)]
pub struct Ticket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建计数器并在当前 owner 清理时使其失效
    pub fn for_view() -> Self {
        let generation = Self::new();
        let on_unmount = generation.clone();
        on_cleanup(move || on_unmount.invalidate());
        generation
    }

    /// 领取新票据，之前领取的票据全部过期
    pub fn begin(&self) -> Ticket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// 使所有已发出的票据过期
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

/// 在本地任务中执行 `request`，仅当票据仍有效时调用 `apply`
pub fn spawn_fenced<T, Fut, A>(ticket: Ticket, request: Fut, apply: A)
where
    T: 'static,
    Fut: Future<Output = T> + 'static,
    A: FnOnce(T) + 'static,
{
    spawn_local(async move {
        let output = request.await;
        if ticket.is_current() {
            apply(output);
        } else {
            log::debug!("[View] discarded stale response (generation {})", ticket.generation);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.begin();
        assert!(first.is_current());

        let second = generation.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn invalidate_expires_outstanding_tickets() {
        let generation = RequestGeneration::new();
        let ticket = generation.begin();
        generation.invalidate();
        assert!(!ticket.is_current());

        // 失效后仍可领取新票据（例如手动刷新）
        assert!(generation.begin().is_current());
    }

    #[test]
    fn clones_share_the_counter() {
        let generation = RequestGeneration::new();
        let ticket = generation.begin();
        generation.clone().invalidate();
        assert!(!ticket.is_current());
    }
}
