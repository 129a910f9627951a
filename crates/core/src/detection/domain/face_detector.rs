use crate::detection::domain::face_box::PixelBox;
use crate::detection::domain::face_landmarks::{LandmarkSet, Point};
use crate::shared::frame::Frame;

/// One detected face: its box paired with the landmarks located inside it.
///
/// Box and landmarks come from the same detection record, so there is no
/// positional correspondence to maintain between separate passes.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedFace {
    pub bbox: PixelBox,
    /// Landmark points in pixel coordinates.
    pub landmarks: LandmarkSet<Point>,
}

/// Domain interface for face detection with landmarks.
///
/// Implementations may hold inference sessions that need exclusive access,
/// hence `&mut self`.
pub trait FaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>>;
}
