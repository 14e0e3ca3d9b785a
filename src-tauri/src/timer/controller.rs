use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::storage::{keys, StoreAdapter};
use crate::synced::{Listener, Synced};
use crate::{log_debug, log_info};

use super::{FocusPhase, FocusSession};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusSnapshot {
    pub session: FocusSession,
    pub phase: FocusPhase,
    pub running: bool,
    pub clock: String,
    pub progress_percent: f64,
}

impl From<&FocusSession> for FocusSnapshot {
    fn from(session: &FocusSession) -> Self {
        Self {
            phase: session.phase(),
            running: session.running,
            clock: session.clock(),
            progress_percent: session.progress_percent(),
            session: session.clone(),
        }
    }
}

struct Ticker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn stop(self) {
        self.token.cancel();
        self.handle.abort();
    }
}

/// Focus-timer widget: the persisted session plus the background ticker that
/// drives it while running. Dropping the timer stops the ticker.
pub struct FocusTimer {
    session: Arc<Mutex<Synced<FocusSession>>>,
    ticker: Mutex<Option<Ticker>>,
    tick_interval: Duration,
}

impl FocusTimer {
    /// Hydrate the session from storage. A restored session is always paused.
    pub fn mount(store: StoreAdapter, tick_interval: Duration) -> Self {
        Self::mount_with(store, tick_interval, Vec::new())
    }

    /// `mount` with listeners attached before hydration, so they also hear
    /// the restored session.
    pub fn mount_with(
        store: StoreAdapter,
        tick_interval: Duration,
        listeners: Vec<Listener<FocusSession>>,
    ) -> Self {
        let mut session = Synced::new(store, keys::FOCUS_SESSION);
        for listener in listeners {
            session.subscribe(move |value: &FocusSession| listener(value));
        }
        session.hydrate();
        Self {
            session: Arc::new(Mutex::new(session)),
            ticker: Mutex::new(None),
            tick_interval,
        }
    }

    pub async fn is_loaded(&self) -> bool {
        self.session.lock().await.is_loaded()
    }

    /// Called with the session after every change, ticks included.
    pub async fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&FocusSession) + Send + Sync + 'static,
    {
        self.session.lock().await.subscribe(listener);
    }

    pub async fn snapshot(&self) -> FocusSnapshot {
        FocusSnapshot::from(self.session.lock().await.get())
    }

    pub async fn start(&self) -> FocusSnapshot {
        let snapshot = self.apply(FocusSession::start).await;
        self.spawn_ticker().await;
        snapshot
    }

    pub async fn pause(&self) -> FocusSnapshot {
        self.cancel_ticker().await;
        self.apply(FocusSession::pause).await
    }

    pub async fn toggle(&self) -> FocusSnapshot {
        let running = self.session.lock().await.get().running;
        if running {
            self.pause().await
        } else {
            self.start().await
        }
    }

    pub async fn reset(&self) -> FocusSnapshot {
        self.cancel_ticker().await;
        self.apply(FocusSession::reset).await
    }

    pub async fn skip(&self) -> FocusSnapshot {
        self.cancel_ticker().await;
        self.apply(FocusSession::skip).await
    }

    pub async fn clear(&self) -> FocusSnapshot {
        self.cancel_ticker().await;
        self.apply(FocusSession::clear).await
    }

    pub async fn set_work_minutes(&self, minutes: i64) -> FocusSnapshot {
        self.apply(|session| session.set_work_minutes(minutes)).await
    }

    pub async fn set_break_minutes(&self, minutes: i64) -> FocusSnapshot {
        self.apply(|session| session.set_break_minutes(minutes)).await
    }

    pub async fn is_ticking(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .map(|ticker| !ticker.handle.is_finished())
            .unwrap_or(false)
    }

    async fn apply(&self, mutate: impl FnOnce(&mut FocusSession)) -> FocusSnapshot {
        let mut guard = self.session.lock().await;
        guard.update(mutate);
        FocusSnapshot::from(guard.get())
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(previous) = ticker_guard.take() {
            previous.stop();
        }

        let session = self.session.clone();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let period = self.tick_interval;

        let handle = tokio::spawn(async move {
            // First tick one full period after start, not immediately.
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        let mut guard = session.lock().await;
                        if !guard.get().running {
                            break;
                        }
                        guard.update(FocusSession::tick);
                    }
                }
            }
            log_debug!("focus ticker stopped");
        });

        log_info!("focus ticker started ({:?})", period);
        *ticker_guard = Some(Ticker { token, handle });
    }

    async fn cancel_ticker(&self) {
        if let Some(ticker) = self.ticker.lock().await.take() {
            ticker.stop();
        }
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.get_mut().take() {
            ticker.stop();
        }
    }
}
