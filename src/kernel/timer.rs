use super::time::Tick;

/// Single-owner deferred timer. Arming replaces whatever was pending, so a
/// slot can never stack callbacks.
#[derive(Debug, Clone)]
pub struct TimerSlot<T = ()> {
    pending: Option<(Tick, T)>,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> TimerSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a previously pending timer was superseded.
    pub fn arm(&mut self, deadline: Tick, payload: T) -> bool {
        self.pending.replace((deadline, payload)).is_some()
    }

    /// Moves the deadline of a pending timer, keeping its payload.
    pub fn reschedule(&mut self, deadline: Tick) -> bool {
        match self.pending.as_mut() {
            Some((at, _)) => {
                *at = deadline;
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, payload)| payload)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Tick> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Takes the payload if the deadline has passed.
    pub fn fire(&mut self, now: Tick) -> Option<T> {
        let due = matches!(&self.pending, Some((at, _)) if *at <= now);
        if due {
            self.cancel()
        } else {
            None
        }
    }
}
