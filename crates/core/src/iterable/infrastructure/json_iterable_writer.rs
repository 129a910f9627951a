use std::path::Path;

use crate::iterable::domain::item::Iterable;
use crate::iterable::domain::iterable_writer::IterableWriter;

/// Writes the document as 2-space indented JSON.
pub struct JsonIterableWriter;

impl JsonIterableWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonIterableWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl IterableWriter for JsonIterableWriter {
    fn write(&self, path: &Path, iterable: &Iterable) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(iterable)?;
        std::fs::write(path, json)?;
        log::debug!("Wrote {} items to {}", iterable.len(), path.display());
        Ok(())
    }
}
