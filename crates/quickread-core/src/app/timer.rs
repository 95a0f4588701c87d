//! Single-slot, one-shot pacing timer.
//!
//! At most one timer is armed at a time. Every arm hands out a fresh
//! [`TimerHandle`]; a handle stops matching as soon as the slot is re-armed or
//! cancelled, so late deliveries of an old handle are recognizable.

/// Identifies one arming of a [`PacingTimer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerHandle {
    generation: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ArmedTimer {
    handle: TimerHandle,
    deadline_ms: u64,
}

#[derive(Clone, Debug, Default)]
pub struct PacingTimer {
    armed: Option<ArmedTimer>,
    generation: u32,
}

impl PacingTimer {
    pub const fn new() -> Self {
        Self {
            armed: None,
            generation: 0,
        }
    }

    /// Arms the slot for `deadline_ms`, invalidating any pending handle.
    pub fn arm(&mut self, deadline_ms: u64) -> TimerHandle {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);

        let handle = TimerHandle {
            generation: self.generation,
        };
        self.armed = Some(ArmedTimer {
            handle,
            deadline_ms,
        });
        handle
    }

    /// Empties the slot. Returns the handle that was pending, if any.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.armed.take().map(|armed| armed.handle)
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.armed.map(|armed| armed.handle)
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.armed.map(|armed| armed.deadline_ms)
    }

    /// Takes the pending timer if its deadline has passed.
    pub fn fire_due(&mut self, now_ms: u64) -> Option<TimerHandle> {
        match self.armed {
            Some(armed) if now_ms >= armed.deadline_ms => {
                self.armed = None;
                Some(armed.handle)
            }
            _ => None,
        }
    }

    /// Takes the pending timer if `handle` is the one currently armed.
    pub fn claim(&mut self, handle: TimerHandle) -> bool {
        match self.armed {
            Some(armed) if armed.handle == handle => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_invalidates_previous_handle() {
        let mut timer = PacingTimer::new();
        let first = timer.arm(100);
        let second = timer.arm(200);

        assert_ne!(first, second);
        assert!(!timer.claim(first));
        assert_eq!(timer.pending(), Some(second));
        assert!(timer.claim(second));
        assert_eq!(timer.pending(), None);
    }

    #[test]
    fn fires_once_at_deadline() {
        let mut timer = PacingTimer::new();
        let handle = timer.arm(100);

        assert_eq!(timer.fire_due(99), None);
        assert_eq!(timer.fire_due(100), Some(handle));
        assert_eq!(timer.fire_due(101), None);
    }

    #[test]
    fn cancelled_handle_never_fires() {
        let mut timer = PacingTimer::new();
        let handle = timer.arm(50);

        assert_eq!(timer.cancel(), Some(handle));
        assert_eq!(timer.cancel(), None);
        assert_eq!(timer.fire_due(u64::MAX), None);
        assert!(!timer.claim(handle));
        assert_eq!(timer.deadline_ms(), None);
    }
}
