use std::collections::VecDeque;
use std::time::Duration;

use crate::Effect;

pub type ToastId = u64;

pub const TOAST_TTL: Duration = Duration::from_secs(4);
pub const MAX_TOASTS: usize = 5;
pub const ACTIVITY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

/// Toast stack plus the activity log shown on every page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Notifier {
    toasts: VecDeque<Toast>,
    activity: VecDeque<String>,
    next_toast_id: ToastId,
}

impl Notifier {
    /// Pushes a toast and returns the effect that will expire it.
    pub(crate) fn toast(&mut self, kind: ToastKind, message: String) -> Effect {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push_back(Toast { id, kind, message });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
        Effect::ExpireToast {
            id,
            after: TOAST_TTL,
        }
    }

    pub(crate) fn expire(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Newest entry first; the oldest falls off past capacity.
    pub(crate) fn log(&mut self, message: String) {
        self.activity.push_front(message);
        self.activity.truncate(ACTIVITY_CAPACITY);
    }

    pub(crate) fn toasts(&self) -> Vec<Toast> {
        self.toasts.iter().cloned().collect()
    }

    pub(crate) fn activity(&self) -> Vec<String> {
        self.activity.iter().cloned().collect()
    }
}
