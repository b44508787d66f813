//! Transient user-facing notifications.
//!
//! At most one notification is shown at a time. It slides in, stays for the
//! display duration, slides out and is removed. Showing a new one replaces
//! the current one and cancels its pending transitions.

use crate::scheduler::Scheduler;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const KEY_ENTER: &str = "notification.enter";
const KEY_LEAVE: &str = "notification.leave";
const KEY_REMOVE: &str = "notification.remove";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub enter: Duration,
    pub display: Duration,
    pub exit: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            enter: Duration::from_millis(10),
            display: Duration::from_millis(4000),
            exit: Duration::from_millis(300),
        }
    }
}

#[derive(Clone)]
pub struct NotificationCenter {
    current: Arc<Mutex<Option<Notification>>>,
    scheduler: Scheduler,
    timing: NotificationTiming,
    next_id: Arc<AtomicU64>,
}

impl NotificationCenter {
    pub fn new(scheduler: Scheduler, timing: NotificationTiming) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            scheduler,
            timing,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn success(&self, message: &str) -> u64 {
        self.show(NotificationKind::Success, message)
    }

    pub fn error(&self, message: &str) -> u64 {
        self.show(NotificationKind::Error, message)
    }

    /// Show `message`, replacing any current notification. Returns its id.
    pub fn show(&self, kind: NotificationKind, message: &str) -> u64 {
        match kind {
            NotificationKind::Error => log::error!("{}", message),
            NotificationKind::Success => log::info!("{}", message),
        }

        for key in [KEY_ENTER, KEY_LEAVE, KEY_REMOVE] {
            self.scheduler.cancel(key);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        *self.current.lock().unwrap() = Some(Notification {
            id,
            kind,
            message: message.to_string(),
            phase: Phase::Entering,
        });

        let current = Arc::clone(&self.current);
        self.scheduler
            .schedule_keyed(KEY_ENTER, self.timing.enter, move || {
                set_phase(&current, id, Phase::Visible);
            });

        let current = Arc::clone(&self.current);
        let scheduler = self.scheduler.clone();
        let exit = self.timing.exit;
        self.scheduler
            .schedule_keyed(KEY_LEAVE, self.timing.display, move || {
                set_phase(&current, id, Phase::Leaving);
                scheduler.schedule_keyed(KEY_REMOVE, exit, move || {
                    let mut g = current.lock().unwrap();
                    if g.as_ref().map(|n| n.id) == Some(id) {
                        *g = None;
                    }
                });
            });

        id
    }

    pub fn current(&self) -> Option<Notification> {
        self.current.lock().unwrap().clone()
    }

    /// Drop the current notification immediately.
    pub fn dismiss(&self) {
        for key in [KEY_ENTER, KEY_LEAVE, KEY_REMOVE] {
            self.scheduler.cancel(key);
        }
        *self.current.lock().unwrap() = None;
    }
}

fn set_phase(current: &Mutex<Option<Notification>>, id: u64, phase: Phase) {
    if let Some(n) = current.lock().unwrap().as_mut() {
        if n.id == id {
            n.phase = phase;
        }
    }
}
