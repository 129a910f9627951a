use crate::shared::frame::Frame;

/// Resolves an image URL to decoded pixel data.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<Frame, Box<dyn std::error::Error>>;
}
