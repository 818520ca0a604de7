//! Deferred level-complete notification
//!
//! The completion fires a fixed delay after capture. Tasks are keyed by the
//! level attempt that scheduled them, so a task outliving its attempt can
//! never fire against a freshly loaded level.

/// Identity of the task, equal to the attempt that scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(pub u64);

/// Payload delivered when the delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub level_id: u32,
    pub strokes: u32,
}

#[derive(Debug, Clone)]
struct PendingCompletion {
    attempt: u64,
    remaining_secs: f32,
    payload: Completion,
}

/// Single-slot cancellable timer
#[derive(Debug, Clone, Default)]
pub struct DeferredCompletion {
    pending: Option<PendingCompletion>,
}

impl DeferredCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` after `delay_secs`, replacing any pending task
    pub fn schedule(&mut self, attempt: u64, delay_secs: f32, payload: Completion) -> TaskHandle {
        self.pending = Some(PendingCompletion {
            attempt,
            remaining_secs: delay_secs,
            payload,
        });
        TaskHandle(attempt)
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            log::debug!("Cancelled pending completion for attempt {}", task.attempt);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance by `dt` seconds. Yields the payload exactly once, and only if
    /// the task still belongs to `live_attempt`.
    pub fn advance(&mut self, dt: f32, live_attempt: u64) -> Option<Completion> {
        let task = self.pending.as_mut()?;
        if task.attempt != live_attempt {
            log::debug!(
                "Discarding stale completion (attempt {} != {})",
                task.attempt,
                live_attempt
            );
            self.pending = None;
            return None;
        }

        task.remaining_secs -= dt;
        if task.remaining_secs <= 0.0 {
            self.pending.take().map(|t| t.payload)
        } else {
            None
        }
    }
}
