//! Linear undo/redo history of full scene snapshots.

use crate::config::HistoryConfig;
use crate::scene::Scene;

/// Snapshot history with a cursor.
///
/// `cursor` is `None` until the first commit. Entries after the cursor form
/// the redo branch, which is discarded by the next commit.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Scene>,
    cursor: Option<usize>,
    max_entries: Option<usize>,
}

impl History {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history using `config`'s capacity.
    pub fn with_config(config: &HistoryConfig) -> Self {
        Self {
            max_entries: config.max_entries.filter(|max| *max > 0),
            ..Self::default()
        }
    }

    /// Record `scene` as the newest state, discarding any redo branch.
    pub fn commit(&mut self, scene: Scene) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(scene);

        if let Some(max) = self.max_entries {
            if self.entries.len() > max {
                let overflow = self.entries.len() - max;
                self.entries.drain(..overflow);
            }
        }
        self.cursor = Some(self.entries.len() - 1);
        log::debug!("history commit: {} entries", self.entries.len());
    }

    /// Step back one entry. Returns the restored scene, or `None` when there
    /// is nothing to undo (the state is left unchanged).
    pub fn undo(&mut self) -> Option<&Scene> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.entries.get(c - 1)
            }
            _ => None,
        }
    }

    /// Step forward one entry. Returns the restored scene, or `None` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Scene> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if self.cursor.is_some() && next < self.entries.len() {
            self.cursor = Some(next);
            self.entries.get(next)
        } else {
            None
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Scene at the cursor.
    pub fn current(&self) -> Option<&Scene> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// Cursor position; `None` means nothing has been committed.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
