//! Screen navigation.
//!
//! Each screen carries the data it needs, so a screen can never be shown with a
//! missing or stale payload.

use serde::{Deserialize, Serialize};

use crate::models::{Book, Choseo, ReadingSession};

/// A screen of the app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "screen", content = "payload", rename_all = "camelCase")]
pub enum Screen {
    Home,
    Library,
    BookDetail(Book),
    /// Reading timer for a book.
    Timer(Book),
    /// Results shown after a reading session ends.
    SessionSummary(ReadingSession),
    /// Writing a new choseo for a book.
    ChoseoEditor(Book),
    /// Other readers' quotes compared to this choseo.
    Comparison(Choseo),
    Analytics,
    Clan,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Library => "library",
            Screen::BookDetail(_) => "bookDetail",
            Screen::Timer(_) => "timer",
            Screen::SessionSummary(_) => "sessionSummary",
            Screen::ChoseoEditor(_) => "choseoEditor",
            Screen::Comparison(_) => "comparison",
            Screen::Analytics => "analytics",
            Screen::Clan => "clan",
        }
    }

    /// Top-level tabs replace the history instead of stacking on it.
    pub fn is_tab(&self) -> bool {
        matches!(
            self,
            Screen::Home | Screen::Library | Screen::Analytics | Screen::Clan
        )
    }
}

/// History stack of screens. The root is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Screen::Home)
    }
}

impl Navigator {
    pub fn new(root: Screen) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> &Screen {
        // The stack always holds the root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Tabs reset the history to themselves; other screens are pushed.
    pub fn navigate(&mut self, screen: Screen) {
        if screen.is_tab() {
            self.reset(screen);
        } else {
            self.stack.push(screen);
        }
    }

    /// Swap the current screen, e.g. timer -> session summary.
    pub fn replace(&mut self, screen: Screen) {
        if self.stack.len() == 1 {
            self.stack[0] = screen;
        } else {
            self.stack.pop();
            self.stack.push(screen);
        }
    }

    /// Pop the current screen. Returns `None` at the root.
    pub fn back(&mut self) -> Option<Screen> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    pub fn reset(&mut self, root: Screen) {
        self.stack.clear();
        self.stack.push(root);
    }
}
