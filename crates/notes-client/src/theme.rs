use notes_types::{Theme, THEME_KEY};
use std::sync::Arc;
use tracing::warn;

use crate::storage::Storage;

/// Light/dark preference, persisted separately from the session token.
#[derive(Clone)]
pub struct ThemeStore {
    storage: Arc<dyn Storage>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn current(&self) -> Theme {
        self.storage
            .read(THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn set(&self, theme: Theme) {
        if let Err(e) = self.storage.write(THEME_KEY, theme.as_str()) {
            warn!("failed to persist theme preference: {e}");
        }
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggle();
        self.set(next);
        next
    }
}
