//! Single overwritten status line on stderr.

use std::io::{self, IsTerminal, Stderr, Write};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

/// Cosmetic only: write failures are ignored.
pub struct StatusLine {
    out: Stderr,
    enabled: bool,
    dirty: bool,
}

impl StatusLine {
    /// Draws only when stderr is a terminal and `enabled` is set.
    pub fn new(enabled: bool) -> Self {
        let out = io::stderr();
        let enabled = enabled && out.is_terminal();
        Self {
            out,
            enabled,
            dirty: false,
        }
    }

    pub fn update(&mut self, done: usize, total: usize) {
        if !self.enabled {
            return;
        }
        let _ = queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(format!("fetched {done}/{total}"))
        );
        let _ = self.out.flush();
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        if !self.dirty {
            return;
        }
        let _ = queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine));
        let _ = self.out.flush();
        self.dirty = false;
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        self.clear();
    }
}
