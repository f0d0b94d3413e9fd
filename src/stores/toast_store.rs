// ============================================================================
// TOAST STORE - transient user-visible notifications
// ============================================================================

use uuid::Uuid;

use crate::state::{ReactiveState, SubscriptionId};

/// How long a toast stays on screen before the host dismisses it.
pub const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Queue of active toasts. Pushing never blocks and never fails; the
/// `ToastHost` component renders the queue and schedules auto-dismissal.
#[derive(Clone)]
pub struct ToastStore {
    toasts: ReactiveState<Vec<Toast>>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self {
            toasts: ReactiveState::new(Vec::new()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message,
        };
        self.toasts.update(|list| list.push(toast));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts.get_cloned()
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> SubscriptionId {
        self.toasts.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.toasts.unsubscribe(id)
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ToastStore {
    fn eq(&self, other: &Self) -> bool {
        self.toasts.ptr_eq(&other.toasts)
    }
}
