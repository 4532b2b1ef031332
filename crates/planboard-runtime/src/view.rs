use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Token a submission captures when it starts; compared when the
/// response lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToken(Uuid);

/// Identity of one mounted view generation.
///
/// Reloads and navigation renew the instance; a response stamped with
/// a token from before the renewal is discarded instead of applied to
/// state the view no longer owns. There is no cancellation of the
/// underlying call, only of its effect.
#[derive(Debug, Clone)]
pub struct ViewInstance {
    current: Arc<Mutex<Uuid>>,
}

impl Default for ViewInstance {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewInstance {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Uuid::new_v4())),
        }
    }

    /// The token in-flight work captures at start.
    pub fn token(&self) -> ViewToken {
        ViewToken(*self.current.lock().unwrap())
    }

    /// Invalidate every outstanding token.
    pub fn renew(&self) {
        *self.current.lock().unwrap() = Uuid::new_v4();
    }

    pub fn is_current(&self, token: ViewToken) -> bool {
        *self.current.lock().unwrap() == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_stays_current_until_renew() {
        let view = ViewInstance::new();
        let token = view.token();
        assert!(view.is_current(token));
        assert!(view.is_current(view.token()));

        view.renew();
        assert!(!view.is_current(token));
        assert!(view.is_current(view.token()));
    }

    #[test]
    fn test_clones_share_one_generation() {
        let view = ViewInstance::new();
        let shared = view.clone();
        let token = view.token();

        shared.renew();
        assert!(!view.is_current(token));
        assert_eq!(view.token(), shared.token());
    }
}
