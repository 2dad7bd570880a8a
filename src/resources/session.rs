//! Session status resource.
//!
//! Asset failures are fatal for the session: the system hitting one records
//! it here and the host loop stops at the end of the frame.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Default)]
pub struct SessionStatus {
    fatal: Option<String>,
}

impl SessionStatus {
    pub fn is_running(&self) -> bool {
        self.fatal.is_none()
    }

    /// Record a fatal error. Only the first one is kept.
    pub fn fail(&mut self, error: impl ToString) {
        if self.fatal.is_none() {
            self.fatal = Some(error.to_string());
        }
    }

    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_failure_wins() {
        let mut status = SessionStatus::default();
        assert!(status.is_running());
        status.fail("missing sprites/hall.png");
        status.fail("second");
        assert!(!status.is_running());
        assert_eq!(status.fatal(), Some("missing sprites/hall.png"));
    }
}
