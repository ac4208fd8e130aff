use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

pub const DEFAULT_TOAST_TIMEOUT_MS: i64 = 3000;

// Shared by every store in the process so ids are never reused.
static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
}

/// Queue of transient notifications.
///
/// Toasts are kept in the order they were shown. A toast with a positive
/// timeout removes itself once the timeout elapses; any other toast stays
/// until `remove_toast` is called.
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<ToastInner>,
}

struct ToastInner {
    toasts: watch::Sender<Vec<Toast>>,
    timers: Mutex<HashMap<ToastId, AbortHandle>>,
    default_timeout_ms: i64,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::with_default_timeout(DEFAULT_TOAST_TIMEOUT_MS)
    }

    pub fn with_default_timeout(default_timeout_ms: i64) -> Self {
        Self {
            inner: Arc::new(ToastInner {
                toasts: watch::Sender::new(Vec::new()),
                timers: Mutex::new(HashMap::new()),
                default_timeout_ms,
            }),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.show_toast(message, kind, self.inner.default_timeout_ms)
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Info)
    }

    /// Append a toast. `timeout_ms <= 0` keeps it until removed explicitly.
    pub fn show_toast(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
        timeout_ms: i64,
    ) -> ToastId {
        let id = ToastId(NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed));
        let toast = Toast {
            id,
            message: message.into(),
            kind,
        };
        debug!(toast_id = %id, ?kind, timeout_ms, "Showing toast");
        self.inner.toasts.send_modify(|toasts| toasts.push(toast));

        if timeout_ms > 0 {
            self.schedule_expiry(id, Duration::from_millis(timeout_ms.unsigned_abs()));
        }
        id
    }

    /// Remove a toast and cancel its timer. Unknown ids are ignored.
    pub fn remove_toast(&self, id: ToastId) {
        if let Some(timer) = self.inner.lock_timers().remove(&id) {
            timer.abort();
        }
        if self.inner.remove(id) {
            debug!(toast_id = %id, "Toast dismissed");
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.toasts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.toasts.borrow().is_empty()
    }

    /// Number of toasts still waiting for their timer
    pub fn pending_timers(&self) -> usize {
        self.inner.lock_timers().len()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.toasts.subscribe()
    }

    fn schedule_expiry(&self, id: ToastId, after: Duration) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(toast_id = %id, "No async runtime, toast will not expire on its own");
            return;
        };

        let store: Weak<ToastInner> = Arc::downgrade(&self.inner);
        let task = runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(inner) = store.upgrade() {
                inner.expire(id);
            }
        });

        // The timer may already have fired; only track it while the toast exists.
        let mut timers = self.inner.lock_timers();
        if self.inner.contains(id) {
            timers.insert(id, task.abort_handle());
        }
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastInner {
    fn lock_timers(&self) -> MutexGuard<'_, HashMap<ToastId, AbortHandle>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn contains(&self, id: ToastId) -> bool {
        self.toasts.borrow().iter().any(|toast| toast.id == id)
    }

    fn remove(&self, id: ToastId) -> bool {
        self.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|toast| toast.id != id);
            toasts.len() != before
        })
    }

    fn expire(&self, id: ToastId) {
        if self.remove(id) {
            debug!(toast_id = %id, "Toast expired");
        }
        self.lock_timers().remove(&id);
    }
}

impl Drop for ToastInner {
    fn drop(&mut self) {
        for (_, timer) in self.lock_timers().drain() {
            timer.abort();
        }
    }
}
