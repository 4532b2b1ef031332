use std::fmt;

/// Severity of an operator-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// Fire-and-forget sink for operator-facing notices.
///
/// Presentation (toasts, status lines) belongs to the embedding
/// application; the runtime only emits typed signals and never waits
/// on them.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Writes notices to stderr, one line each.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        eprintln!("[{}] {}", level, message);
    }
}

/// Swallows notices, for embedders that surface outcomes themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _level: NoticeLevel, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct MockNotifier {
        seen: Mutex<Vec<(NoticeLevel, String)>>,
    }

    impl Notifier for MockNotifier {
        fn notify(&self, level: NoticeLevel, message: &str) {
            self.seen.lock().unwrap().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_notifier_is_object_safe() {
        let mock = Arc::new(MockNotifier {
            seen: Mutex::new(Vec::new()),
        });
        let notifier: Arc<dyn Notifier> = mock.clone();

        notifier.notify(NoticeLevel::Success, "Task created successfully");
        notifier.notify(NoticeLevel::Error, "Error fetching tasks");

        let seen = mock.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (NoticeLevel::Success, "Task created successfully".to_string()));
        assert_eq!(seen[1].0, NoticeLevel::Error);
    }

    #[test]
    fn test_level_renders_lowercase() {
        assert_eq!(NoticeLevel::Success.to_string(), "success");
        assert_eq!(NoticeLevel::Error.to_string(), "error");
    }
}
