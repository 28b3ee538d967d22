use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_TOASTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastTone {
    Info,
    Success,
    Failure,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub tone: ToastTone,
    pub message: String,
    pub expires_at: Instant,
}

/// Transient notifications, newest last. Older ones are dropped past the cap.
pub struct Toasts {
    items: VecDeque<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, tone: ToastTone, message: impl Into<String>, now: Instant) {
        self.items.push_back(Toast {
            tone,
            message: message.into(),
            expires_at: now + self.lifetime,
        });
        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
    }

    /// Drops expired toasts; true when anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.expires_at > now);
        before != self.items.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Toast> {
        self.items.back()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ToastTone, Toasts, MAX_TOASTS};
    use std::time::{Duration, Instant};

    #[test]
    fn toasts_expire_after_lifetime() {
        let mut toasts = Toasts::new(Duration::from_secs(3));
        let now = Instant::now();
        toasts.push(ToastTone::Success, "Copied name", now);
        assert!(!toasts.prune(now + Duration::from_millis(2999)));
        assert!(toasts.prune(now + Duration::from_secs(3)));
        assert!(toasts.is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_past_cap() {
        let mut toasts = Toasts::new(Duration::from_secs(3));
        let now = Instant::now();
        for index in 0..(MAX_TOASTS + 2) {
            toasts.push(ToastTone::Info, format!("toast {index}"), now);
        }
        let messages: Vec<&str> = toasts.visible().map(|toast| toast.message.as_str()).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
        assert_eq!(
            toasts.latest().map(|toast| toast.tone),
            Some(ToastTone::Info)
        );
    }
}
