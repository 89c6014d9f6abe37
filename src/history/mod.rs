//! Per-user bounded conversation history.
//!
//! The table maps an opaque user id to a [`ConversationWindow`]. Each window
//! sits behind its own mutex, so handlers for different users never wait on
//! each other; the outer `RwLock` is only written the first time a user shows
//! up. No lock is held once a method returns.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::types::{ChatTurn, Role};

/// Default number of turns kept per user.
pub const DEFAULT_CAPACITY: usize = 10;

/// Bounded FIFO of chat turns. Pushing at capacity evicts the oldest turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationWindow {
    turns: VecDeque<ChatTurn>,
    capacity: usize,
}

impl ConversationWindow {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, turn: ChatTurn) {
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Turns oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    pub fn to_vec(&self) -> Vec<ChatTurn> {
        self.turns.iter().cloned().collect()
    }
}

type SharedWindow = Arc<Mutex<ConversationWindow>>;

/// Process-wide table of conversation windows keyed by user id.
#[derive(Debug)]
pub struct HistoryStore {
    windows: RwLock<HashMap<String, SharedWindow>>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a turn to the user's window, creating the window on first use.
    pub fn record(&self, user_id: &str, role: Role, content: impl Into<String>) {
        let window = self.window_or_insert(user_id);
        lock(&window).push(ChatTurn::new(role, content));
    }

    /// Append a turn and return the resulting window under the same lock.
    ///
    /// A concurrent `record` for the same user cannot land between the append
    /// and the copy.
    pub fn record_and_snapshot(
        &self,
        user_id: &str,
        role: Role,
        content: impl Into<String>,
    ) -> Vec<ChatTurn> {
        let window = self.window_or_insert(user_id);
        let mut guard = lock(&window);
        guard.push(ChatTurn::new(role, content));
        guard.to_vec()
    }

    /// Turns for `user_id` oldest first; empty for unseen users.
    pub fn snapshot(&self, user_id: &str) -> Vec<ChatTurn> {
        self.window(user_id)
            .map(|w| lock(&w).to_vec())
            .unwrap_or_default()
    }

    /// Reset the user's window to empty.
    pub fn clear(&self, user_id: &str) {
        if let Some(window) = self.window(user_id) {
            lock(&window).clear();
        }
    }

    /// Number of turns currently held for `user_id`.
    pub fn len(&self, user_id: &str) -> usize {
        self.window(user_id).map(|w| lock(&w).len()).unwrap_or(0)
    }

    /// Number of users that have ever recorded a turn.
    pub fn user_count(&self) -> usize {
        self.windows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn window(&self, user_id: &str) -> Option<SharedWindow> {
        self.windows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }

    fn window_or_insert(&self, user_id: &str) -> SharedWindow {
        if let Some(window) = self.window(user_id) {
            return window;
        }
        let mut windows = self.windows.write().unwrap_or_else(PoisonError::into_inner);
        windows
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ConversationWindow::new(self.capacity))))
            .clone()
    }
}

// A panic while holding a window lock leaves the deque itself intact, so a
// poisoned lock is still safe to use.
fn lock(window: &SharedWindow) -> MutexGuard<'_, ConversationWindow> {
    window.lock().unwrap_or_else(PoisonError::into_inner)
}
