//! Result of a store mutation.

use bakery_cache::CacheError;

use crate::cart::CartEvent;

/// What a mutation changed and whether the durable copy kept up.
///
/// A save failure does not undo the in-memory change; it is surfaced here so
/// the caller can decide whether to retry with `CartStore::flush`.
#[derive(Debug)]
pub struct MutationReport {
    event: Option<CartEvent>,
    save_error: Option<CacheError>,
}

impl MutationReport {
    pub(crate) fn unchanged() -> Self {
        Self {
            event: None,
            save_error: None,
        }
    }

    pub(crate) fn applied(event: CartEvent, save_error: Option<CacheError>) -> Self {
        Self {
            event: Some(event),
            save_error,
        }
    }

    /// The change applied, or `None` for a no-op.
    pub fn event(&self) -> Option<&CartEvent> {
        self.event.as_ref()
    }

    /// Whether the cart changed.
    pub fn changed(&self) -> bool {
        self.event.is_some()
    }

    /// Whether writing the slot failed.
    pub fn save_failed(&self) -> bool {
        self.save_error.is_some()
    }

    /// The write failure, if any.
    pub fn save_error(&self) -> Option<&CacheError> {
        self.save_error.as_ref()
    }

    /// Turn a save failure into an error, keeping the event otherwise.
    pub fn into_result(self) -> Result<Option<CartEvent>, CacheError> {
        match self.save_error {
            Some(e) => Err(e),
            None => Ok(self.event),
        }
    }
}
