//! Pause-on-interaction latch.
//!
//! While a user hovers or otherwise interacts with the quote, rotation is
//! suspended; when the interaction ends it is restored, but only if it was
//! running when the interaction began. This is a single-level latch, not a
//! counter: a second pause while already paused changes nothing, and one resume
//! releases it.

/// Remembers whether rotation must be restarted when an interaction ends.
#[derive(Debug, Default)]
pub struct InteractionLatch {
    resume_pending: bool,
}

impl InteractionLatch {
    /// Latch with no pending resume.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of an interaction.
    ///
    /// Returns `true` when the caller must stop rotation now, which is only the
    /// case for the first pause while `running`.
    pub fn pause(&mut self, running: bool) -> bool {
        if self.resume_pending || !running {
            return false;
        }
        self.resume_pending = true;
        true
    }

    /// Record the end of an interaction.
    ///
    /// Returns `true` when rotation was running at pause time and must restart.
    pub fn resume(&mut self) -> bool {
        std::mem::take(&mut self.resume_pending)
    }

    /// Forget a pending resume (explicit start/stop overrides the latch).
    pub fn clear(&mut self) {
        self.resume_pending = false;
    }

    /// Whether a resume would restart rotation.
    pub fn is_paused(&self) -> bool {
        self.resume_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_while_stopped_is_noop() {
        let mut latch = InteractionLatch::new();
        assert!(!latch.pause(false));
        assert!(!latch.is_paused());
        assert!(!latch.resume());
    }

    #[test]
    fn test_pause_resume_while_running() {
        let mut latch = InteractionLatch::new();
        assert!(latch.pause(true));
        assert!(latch.is_paused());
        assert!(latch.resume());
        assert!(!latch.is_paused());
    }

    #[test]
    fn test_double_pause_single_resume() {
        let mut latch = InteractionLatch::new();
        assert!(latch.pause(true));
        // Rotation is stopped now; the second pause must not lose the latch.
        assert!(!latch.pause(false));
        assert!(latch.resume());
        assert!(!latch.resume());
    }

    #[test]
    fn test_clear_drops_pending_resume() {
        let mut latch = InteractionLatch::new();
        latch.pause(true);
        latch.clear();
        assert!(!latch.resume());
    }
}
