//! Deferred work driven by Zellij timer events.
//!
//! Zellij's `set_timeout` only reports elapsed seconds when it fires, so the
//! plugin keeps its own list of due tasks. Every `Timer` event becomes an
//! [`Event::Tick`](crate::app::Event::Tick) carrying the current time, and all
//! tasks due by then run.

use chrono::{DateTime, Duration, Utc};

/// Timers may fire a hair early; tasks due within this window still run.
const TIMER_SLACK_MS: i64 = 50;

/// Work to perform once a delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Finish the in-flight add-item submit.
    CompleteSubmit,
    /// Hide the notification with this id, if it is still the one shown.
    DismissNotification(u64),
}

/// Pending tasks ordered by insertion.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<(DateTime<Utc>, TimerTask)>,
}

impl Scheduler {
    /// Queues `task` to run `delay` after `now`.
    ///
    /// Returns the delay in seconds, ready for `set_timeout`.
    pub fn schedule(&mut self, now: DateTime<Utc>, delay: Duration, task: TimerTask) -> f64 {
        self.pending.push((now + delay, task));
        tracing::debug!(task = ?task, delay_ms = delay.num_milliseconds(), "task scheduled");
        delay.num_milliseconds().max(0) as f64 / 1000.0
    }

    /// Removes and returns every task due at `now`, oldest first.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<TimerTask> {
        let horizon = now + Duration::milliseconds(TIMER_SLACK_MS);
        let (due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|(at, _)| *at <= horizon);
        self.pending = rest;
        due.into_iter().map(|(_, task)| task).collect()
    }

    /// Whether `task` is still waiting.
    #[must_use]
    pub fn is_pending(&self, task: TimerTask) -> bool {
        self.pending.iter().any(|(_, t)| *t == task)
    }

    /// Seconds until the earliest pending task, if any.
    #[must_use]
    pub fn next_due_in(&self, now: DateTime<Utc>) -> Option<f64> {
        self.pending
            .iter()
            .map(|(at, _)| (*at - now).num_milliseconds().max(0))
            .min()
            .map(|ms| ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_due_tasks_are_taken() {
        let now = Utc::now();
        let mut s = Scheduler::default();
        let secs = s.schedule(now, Duration::milliseconds(1000), TimerTask::CompleteSubmit);
        s.schedule(now, Duration::seconds(5), TimerTask::DismissNotification(1));
        assert!((secs - 1.0).abs() < f64::EPSILON);

        assert!(s.take_due(now).is_empty());
        assert_eq!(s.take_due(now + Duration::seconds(1)), [TimerTask::CompleteSubmit]);
        assert!(!s.is_pending(TimerTask::CompleteSubmit));
        assert!(s.is_pending(TimerTask::DismissNotification(1)));
        assert_eq!(
            s.take_due(now + Duration::seconds(6)),
            [TimerTask::DismissNotification(1)]
        );
    }

    #[test]
    fn slightly_early_timer_still_fires() {
        let now = Utc::now();
        let mut s = Scheduler::default();
        s.schedule(now, Duration::seconds(1), TimerTask::CompleteSubmit);
        let early = now + Duration::milliseconds(980);
        assert_eq!(s.take_due(early), [TimerTask::CompleteSubmit]);
    }

    #[test]
    fn next_due_in_reports_earliest() {
        let now = Utc::now();
        let mut s = Scheduler::default();
        assert_eq!(s.next_due_in(now), None);
        s.schedule(now, Duration::seconds(5), TimerTask::DismissNotification(1));
        s.schedule(now, Duration::seconds(2), TimerTask::CompleteSubmit);
        assert_eq!(s.next_due_in(now + Duration::seconds(1)), Some(1.0));
    }
}
