use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::host::WidgetHost;

/// Owns the set of genre filters the user has switched on
///
/// Only genres presented as chips can be selected. Every toggle updates the
/// host's chip and checkbox through a single call so the two never disagree.
#[derive(Clone)]
pub struct GenreSelectionController {
    host: Arc<dyn WidgetHost>,
    presented: Arc<Vec<String>>,
    selected: Arc<RwLock<HashSet<String>>>,
}

impl GenreSelectionController {
    pub fn new(host: Arc<dyn WidgetHost>, presented: Vec<String>) -> Self {
        Self {
            host,
            presented: Arc::new(presented),
            selected: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub fn presented(&self) -> &[String] {
        &self.presented
    }

    /// Pushes the current on/off state of every chip to the host
    pub async fn sync_host(&self) {
        let selected = self.selected.read().await;
        for genre in self.presented.iter() {
            self.host.set_chip_active(genre, selected.contains(genre));
        }
    }

    /// Flips `genre`; returns its new state, or `None` for an unknown genre
    pub async fn on_chip_toggled(&self, genre: &str) -> Option<bool> {
        if !self.presented.iter().any(|g| g == genre) {
            tracing::warn!(genre = %genre, "Ignoring toggle for a genre that is not presented");
            return None;
        }

        let mut selected = self.selected.write().await;
        let active = if selected.remove(genre) {
            false
        } else {
            selected.insert(genre.to_string());
            true
        };
        self.host.set_chip_active(genre, active);

        tracing::debug!(genre = %genre, active, selected = selected.len(), "Genre toggled");
        Some(active)
    }

    /// Current selection, in chip order
    pub async fn get_selection(&self) -> Vec<String> {
        let selected = self.selected.read().await;
        self.presented
            .iter()
            .filter(|g| selected.contains(*g))
            .cloned()
            .collect()
    }
}
