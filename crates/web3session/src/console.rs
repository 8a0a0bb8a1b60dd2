/*
[INPUT]:  Action results and readiness notices
[OUTPUT]: Latest entry of the single display region
[POS]:    Display layer - overwrite-latest result surface
[UPDATE]: When the display contract changes (history, structured entries)
*/

use std::sync::{Arc, RwLock};

use serde::Serialize;

/// The single display region every action writes its outcome to.
///
/// The region keeps only the most recent entry: successful actions
/// overwrite it with pretty-printed JSON, readiness notices overwrite it
/// with a plain string. There is no history. Handles are cheap clones of
/// the same region; writes are serialized through the inner lock.
#[derive(Debug, Clone, Default)]
pub struct Console {
    region: Arc<RwLock<Option<String>>>,
}

impl Console {
    /// Create a new empty console region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the region with the JSON rendering of `value`.
    pub fn print<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(rendered) => {
                let mut guard = self.region.write().unwrap();
                *guard = Some(rendered);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to render console entry");
            }
        }
    }

    /// Overwrite the region with a plain notice, e.g. "provider not
    /// initialized yet".
    pub fn report(&self, notice: &str) {
        let mut guard = self.region.write().unwrap();
        *guard = Some(notice.to_string());
    }

    /// Empty the region.
    pub fn clear(&self) {
        let mut guard = self.region.write().unwrap();
        *guard = None;
    }

    /// The current entry, if any.
    pub fn last(&self) -> Option<String> {
        let guard = self.region.read().unwrap();
        guard.clone()
    }
}
