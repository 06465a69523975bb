use crate::Position;
use std::collections::VecDeque;

/// Human-readable history of a game, newest event first.
/// A muted log records nothing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Events {
    names: Vec<String>,
    lines: VecDeque<String>,
    muted: bool,
}

impl Events {
    pub fn new(players: usize) -> Self {
        Self {
            names: (1..=players).map(|i| format!("Player {}", i)).collect(),
            lines: VecDeque::new(),
            muted: false,
        }
    }
    pub fn name(&self, p: Position) -> &str {
        self.names.get(p).map(String::as_str).unwrap_or("Nobody")
    }
    pub fn names(&self) -> &[String] {
        &self.names
    }
    /// replace the default seat names; ignored unless one name per seat
    pub fn rename(&mut self, names: Vec<String>) {
        if names.len() == self.names.len() {
            self.names = names;
        }
    }
    pub fn log(&mut self, line: String) {
        if !self.muted {
            log::trace!("{}", line);
            self.lines.push_front(line);
        }
    }
    pub fn lines(&self) -> &VecDeque<String> {
        &self.lines
    }
    pub fn is_muted(&self) -> bool {
        self.muted
    }
    /// drops the history so far and ignores everything after
    pub fn mute(&mut self) {
        self.muted = true;
        self.lines.clear();
    }
}
