//! Timers and task spawning behind a trait, so the synchronizer can run in
//! the browser event loop and in tests alike.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::config::MAX_TIMER_MS;

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

pub trait Scheduler {
    fn sleep(&self, duration: Duration) -> LocalTask;

    /// Run a task to completion on the current thread
    fn spawn(&self, task: LocalTask);
}

/// setTimeout + spawn_local on the wasm main thread
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn sleep(&self, duration: Duration) -> LocalTask {
        // gloo-timers паникует на задержке больше u32::MAX мс
        let duration = duration.min(Duration::from_millis(MAX_TIMER_MS));
        Box::pin(gloo_timers::future::sleep(duration))
    }

    fn spawn(&self, task: LocalTask) {
        leptos::task::spawn_local(task);
    }
}
