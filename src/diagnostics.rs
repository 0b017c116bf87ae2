//! Diagnostic event bus and the bounded log sink behind the system overlay.

use chrono::Local;
use eframe::egui::Color32;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};

pub const LOG_CAPACITY: usize = 50;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Self::Info => Color32::from_rgb(56, 189, 248),
            Self::Success => Color32::from_rgb(52, 211, 153),
            Self::Warn => Color32::from_rgb(251, 191, 36),
            Self::Error => Color32::from_rgb(251, 113, 133),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

type Listener = Box<dyn FnMut(LogLevel, &str) + Send>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Synchronous in-process publish/subscribe channel for diagnostic events.
///
/// Cloning shares the underlying listener registry, so any part of the
/// application holding a clone publishes into the same stream.
#[derive(Clone, Default)]
pub struct DiagnosticBus {
    inner: Arc<Mutex<BusInner>>,
}

impl DiagnosticBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers to every current subscriber in subscription order. Events
    /// published while nobody listens are dropped, never queued for replay.
    /// The registry lock is held across delivery; listeners must not
    /// publish or subscribe from inside their callback.
    pub fn publish(&self, level: LogLevel, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        for (_, listener) in inner.listeners.iter_mut() {
            listener(level, message);
        }
    }

    pub fn info(&self, message: &str) {
        self.publish(LogLevel::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.publish(LogLevel::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.publish(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.publish(LogLevel::Error, message);
    }

    pub fn subscribe(
        &self,
        listener: impl FnMut(LogLevel, &str) + Send + 'static,
    ) -> Subscription {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().unwrap().listeners.len()
    }
}

/// Handle returned by [`DiagnosticBus::subscribe`]. Unsubscribing twice is
/// a no-op, and dropping the handle does not unsubscribe by itself.
pub struct Subscription {
    id: u64,
    bus: Weak<Mutex<BusInner>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.bus.upgrade() {
            let mut inner = inner.lock().unwrap();
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Bounded newest-first retention of recent diagnostic events.
///
/// History never survives an activation cycle; each activation begins with
/// an empty log.
pub struct DiagnosticLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    subscription: Option<Subscription>,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            subscription: None,
        }
    }

    pub fn activate(&mut self, bus: &DiagnosticBus) {
        if self.subscription.is_some() {
            return;
        }
        self.entries.lock().unwrap().clear();
        let entries = Arc::clone(&self.entries);
        self.subscription = Some(bus.subscribe(move |level, message| {
            let mut entries = entries.lock().unwrap();
            entries.push_front(LogEntry {
                timestamp: timestamp_now(),
                level,
                message: message.to_string(),
            });
            entries.truncate(LOG_CAPACITY);
        }));
    }

    pub fn deactivate(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.entries.lock().unwrap().clear();
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

fn timestamp_now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
