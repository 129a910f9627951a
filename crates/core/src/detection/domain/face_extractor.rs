use crate::detection::domain::face_box::FaceBox;
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_landmarks::Landmarks;
use crate::shared::frame::Frame;

/// The primary face of an image, normalized to image-relative coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedFace {
    pub face_box: FaceBox,
    pub landmarks: Landmarks,
}

/// Index of the largest-area box. Ties resolve to the earliest index.
pub fn primary_face_index(boxes: &[FaceBox]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (i, b) in boxes.iter().enumerate() {
        let area = b.area();
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((i, area)),
        }
    }
    best.map(|(i, _)| i)
}

/// Runs detection on a frame and keeps only the primary face.
pub struct FaceExtractor {
    detector: Box<dyn FaceDetector>,
}

impl FaceExtractor {
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        Self { detector }
    }

    /// Returns `None` when the image contains no detectable face.
    pub fn extract(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<ExtractedFace>, Box<dyn std::error::Error>> {
        let (width, height) = (frame.width(), frame.height());
        let mut faces = self.detector.detect(frame)?;
        if faces.is_empty() {
            return Ok(None);
        }

        let boxes: Vec<FaceBox> = faces
            .iter()
            .map(|f| FaceBox::from_pixel_box(&f.bbox, width, height))
            .collect();
        let Some(primary) = primary_face_index(&boxes) else {
            return Ok(None);
        };
        log::debug!(
            "{} faces detected, primary #{primary} ({}x{} px)",
            faces.len(),
            boxes[primary].width,
            boxes[primary].height
        );

        let face = faces.swap_remove(primary);
        Ok(Some(ExtractedFace {
            face_box: boxes[primary].clone(),
            landmarks: Landmarks::from_pixels(&face.landmarks, width, height),
        }))
    }
}
