//! Frame scheduling seam between the controller and the host.
//!
//! The host hands out a [`FrameHandle`] for every frame it agrees to run and
//! later reports the frame back with that handle. The controller only honours
//! the handle it is currently waiting for, so a cancelled frame can never
//! advance the simulation.

use thiserror::Error;

/// Identifies one requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("frame {} is still pending", .0.id())]
    AlreadyPending(FrameHandle),

    #[error("host refused to schedule a frame: {0}")]
    Refused(String),
}

/// Host capability to run one callback on the next display frame.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, ScheduleError>;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Single-slot scheduler for hosts that poll once per display frame.
///
/// At most one frame is armed at a time; the host loop calls
/// [`FrameClock::take_due`] each frame and forwards the handle to the
/// controller.
#[derive(Debug, Default)]
pub struct FrameClock {
    next_id: u64,
    armed: Option<FrameHandle>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Disarm and return the pending frame, if any
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.armed.take()
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> Result<FrameHandle, ScheduleError> {
        if let Some(pending) = self.armed {
            return Err(ScheduleError::AlreadyPending(pending));
        }
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.armed = Some(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_frame_at_a_time() {
        let mut clock = FrameClock::new();
        let first = clock.request_frame().unwrap();
        assert_eq!(
            clock.request_frame(),
            Err(ScheduleError::AlreadyPending(first))
        );
        assert_eq!(clock.take_due(), Some(first));
        assert_eq!(clock.take_due(), None);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut clock = FrameClock::new();
        let a = clock.request_frame().unwrap();
        clock.take_due();
        let b = clock.request_frame().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cancel_disarms() {
        let mut clock = FrameClock::new();
        let handle = clock.request_frame().unwrap();
        clock.cancel_frame(handle);
        assert!(!clock.is_armed());
        assert_eq!(clock.take_due(), None);
    }

    #[test]
    fn test_cancel_stale_handle_keeps_current() {
        let mut clock = FrameClock::new();
        let old = clock.request_frame().unwrap();
        clock.take_due();
        let current = clock.request_frame().unwrap();
        clock.cancel_frame(old);
        assert_eq!(clock.take_due(), Some(current));
    }
}
