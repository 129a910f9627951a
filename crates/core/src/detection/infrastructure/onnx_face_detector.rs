use crate::detection::domain::face_detector::{DetectedFace, FaceDetector};
use crate::detection::domain::face_landmarks::LandmarkSet;
use crate::shared::frame::Frame;

use super::onnx_landmark_detector::OnnxLandmarkDetector;
use super::onnx_yolo_detector::OnnxYoloDetector;

/// Two-stage detector: YOLO boxes, then a 68-point landmark pass per box.
pub struct OnnxFaceDetector {
    boxes: OnnxYoloDetector,
    landmarks: OnnxLandmarkDetector,
}

impl OnnxFaceDetector {
    pub fn new(boxes: OnnxYoloDetector, landmarks: OnnxLandmarkDetector) -> Self {
        Self { boxes, landmarks }
    }
}

impl FaceDetector for OnnxFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>> {
        let boxes = self.boxes.detect_boxes(frame)?;
        let mut faces = Vec::with_capacity(boxes.len());
        for bbox in boxes {
            let points = self.landmarks.landmarks(frame, &bbox)?;
            faces.push(DetectedFace {
                bbox,
                landmarks: LandmarkSet::from_68_points(&points)?,
            });
        }
        Ok(faces)
    }
}
