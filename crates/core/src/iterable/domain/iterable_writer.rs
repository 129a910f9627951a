use std::path::Path;

use crate::iterable::domain::item::Iterable;

/// Persists the final output document.
pub trait IterableWriter {
    /// Writes the document to `path`, replacing any existing file.
    fn write(&self, path: &Path, iterable: &Iterable) -> Result<(), Box<dyn std::error::Error>>;
}
