use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::detection::domain::face_box::FaceBox;
use crate::imaging::domain::image_fetcher::ImageFetcher;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::iterable::domain::item::Item;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::DEBUG_IMAGE_EXTENSION;
use crate::shared::frame::Frame;

const OUTLINE_RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Keeps `{index}_{slug}.png` well under common file name limits.
const MAX_SLUG_CHARS: usize = 100;

/// Filesystem-safe form of a photo description: lowercase, spaces as `_`,
/// at most 100 characters.
pub fn slug(description: &str) -> String {
    description
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_alphanumeric() || c == '_' || c == '-' => Some(c),
            _ => None,
        })
        .take(MAX_SLUG_CHARS)
        .collect()
}

/// `{debug_dir}/{index}_{slug}.png`
pub fn debug_image_path(debug_dir: &Path, index: usize, description: &str) -> PathBuf {
    debug_dir.join(format!(
        "{index}_{}.{DEBUG_IMAGE_EXTENSION}",
        slug(description)
    ))
}

/// Outlines `face_box` in red, scaled to the frame's own dimensions.
/// Corners are inclusive; parts outside the image are clipped.
fn outline_face(frame: Frame, face_box: &FaceBox) -> Result<Frame, Box<dyn std::error::Error>> {
    if frame.channels() != 3 {
        return Err(format!("Expected an RGB frame, got {} channels", frame.channels()).into());
    }
    let (width, height) = (frame.width(), frame.height());
    let (x1, y1, x2, y2) = face_box.to_pixel_corners(width, height);
    let mut img = RgbImage::from_raw(width, height, frame.into_data())
        .ok_or("Frame data does not match its dimensions")?;

    let rect = Rect::at(x1.min(x2) as i32, y1.min(y2) as i32).of_size(
        (x2 - x1).unsigned_abs() as u32 + 1,
        (y2 - y1).unsigned_abs() as u32 + 1,
    );
    draw_hollow_rect_mut(&mut img, rect, OUTLINE_RED);
    Ok(Frame::new(img.into_raw(), width, height, 3))
}

/// Re-fetches each item's source image and saves it with its face box outlined.
pub struct VisualizeItemsUseCase {
    fetcher: Box<dyn ImageFetcher>,
    writer: Box<dyn ImageWriter>,
    logger: Box<dyn PipelineLogger>,
}

impl VisualizeItemsUseCase {
    pub fn new(
        fetcher: Box<dyn ImageFetcher>,
        writer: Box<dyn ImageWriter>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            fetcher,
            writer,
            logger,
        }
    }

    /// Returns the paths written, in item order. Items without a face box are skipped.
    pub fn execute(
        &mut self,
        items: &[Item],
        debug_dir: &Path,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        self.logger.info("Saving debug images...");
        let total = items.len();
        let mut written = Vec::with_capacity(total);

        for (i, item) in items.iter().enumerate() {
            let Some(face_box) = item.face_box.as_ref() else {
                continue;
            };
            let t0 = Instant::now();
            let frame = outline_face(self.fetcher.fetch(&item.src)?, face_box)?;

            let path = debug_image_path(debug_dir, i, &item.description);
            self.writer.write(&path, &frame)?;
            self.logger
                .timing("draw", t0.elapsed().as_secs_f64() * 1000.0);
            self.logger
                .info(&format!("Saved visualization at {}", path.display()));
            self.logger.progress(i + 1, total);
            written.push(path);
        }

        Ok(written)
    }
}
