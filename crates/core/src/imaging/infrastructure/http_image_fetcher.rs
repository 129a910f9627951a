use reqwest::blocking::Client;
use thiserror::Error;

use crate::imaging::domain::image_fetcher::ImageFetcher;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("image request failed for {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode image from {url}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
}

/// Downloads images over blocking HTTP and decodes them with the `image` crate.
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let to_err = |e| FetchError::Request {
            url: url.to_string(),
            source: e,
        };
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(to_err)?;
        let bytes = response.bytes().map_err(to_err)?;
        Ok(bytes.to_vec())
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes encoded image bytes (format sniffed from content) into an RGB frame.
pub fn decode(url: &str, bytes: &[u8]) -> Result<Frame, FetchError> {
    let img = image::load_from_memory(bytes).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        source: e,
    })?;
    Ok(Frame::from_image(img))
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Result<Frame, Box<dyn std::error::Error>> {
        let bytes = self.download(url)?;
        log::debug!("Fetched {} bytes from {url}", bytes.len());
        Ok(decode(url, &bytes)?)
    }
}
