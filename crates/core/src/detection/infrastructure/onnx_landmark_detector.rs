/// 68-point facial landmark regressor using ONNX Runtime via `ort`.
///
/// Expects an InsightFace-style `1k3d68` model: a 192×192 RGB crop around
/// the face in raw 0–255 values, producing 68 points in `[-1, 1]` crop space
/// (optionally with a depth component per point).
use std::path::Path;

use crate::detection::domain::face_box::PixelBox;
use crate::detection::domain::face_landmarks::{Point, LANDMARK_COUNT};
use crate::shared::frame::Frame;

/// Side length of the square landmark model input.
const INPUT_SIZE: usize = 192;

/// Crop side relative to the longer face box side.
const CROP_SCALE: f64 = 1.5;

/// Output length from which points are read as `(x, y, z)` triplets.
const TRIPLET_THRESHOLD: usize = 3000;

pub struct OnnxLandmarkDetector {
    session: ort::session::Session,
}

impl OnnxLandmarkDetector {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        log::debug!("Landmark model loaded from {}", model_path.display());
        Ok(Self { session })
    }

    /// Regresses 68 landmark points for the face in `bbox`, in frame pixels.
    pub fn landmarks(
        &mut self,
        frame: &Frame,
        bbox: &PixelBox,
    ) -> Result<Vec<Point>, Box<dyn std::error::Error>> {
        let crop = Crop::around(bbox);
        let input_value = ort::value::Tensor::from_array(crop_tensor(frame, &crop))?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("Landmark model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        let points = decode_landmarks(data)?;
        Ok(points.into_iter().map(|p| crop.to_frame(p)).collect())
    }
}

/// Square crop window centered on a face box.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Crop {
    center_x: f64,
    center_y: f64,
    /// Model pixels per frame pixel.
    scale: f64,
}

impl Crop {
    fn around(bbox: &PixelBox) -> Self {
        let side = (bbox.width().max(bbox.height()) as f64 * CROP_SCALE).max(1.0);
        Self {
            center_x: (bbox.left as f64 + bbox.right as f64) / 2.0,
            center_y: (bbox.top as f64 + bbox.bottom as f64) / 2.0,
            scale: INPUT_SIZE as f64 / side,
        }
    }

    fn to_frame(&self, (x, y): Point) -> Point {
        let half = INPUT_SIZE as f64 / 2.0;
        (
            self.center_x + (x - half) / self.scale,
            self.center_y + (y - half) / self.scale,
        )
    }
}

/// Samples the crop into an NCHW float32 tensor. Pixels outside the frame are black.
fn crop_tensor(frame: &Frame, crop: &Crop) -> ndarray::Array4<f32> {
    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));
    let src = frame.as_ndarray();
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;

    for y in 0..INPUT_SIZE {
        for x in 0..INPUT_SIZE {
            let (sx, sy) = crop.to_frame((x as f64, y as f64));
            if sx < 0.0 || sy < 0.0 || sx >= fw || sy >= fh {
                continue;
            }
            let (sx, sy) = (sx as usize, sy as usize);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[sy, sx, c]] as f32;
            }
        }
    }
    tensor
}

/// Reads the last 68 points from raw model output, in crop pixel space.
fn decode_landmarks(data: &[f32]) -> Result<Vec<Point>, String> {
    let stride = if data.len() >= TRIPLET_THRESHOLD { 3 } else { 2 };
    let rows = data.len() / stride;
    if rows < LANDMARK_COUNT {
        return Err(format!(
            "Landmark output has {rows} points, expected at least {LANDMARK_COUNT}"
        ));
    }

    let half = INPUT_SIZE as f64 / 2.0;
    Ok(data
        .chunks_exact(stride)
        .skip(rows - LANDMARK_COUNT)
        .map(|p| ((p[0] as f64 + 1.0) * half, (p[1] as f64 + 1.0) * half))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_crop_is_square_and_centered() {
        // 40x80 box centered at (120, 140) → side 120
        let crop = Crop::around(&PixelBox::new(100, 140, 180, 100));
        assert_relative_eq!(crop.center_x, 120.0);
        assert_relative_eq!(crop.center_y, 140.0);
        assert_relative_eq!(crop.scale, 192.0 / 120.0);
    }

    #[test]
    fn test_crop_center_maps_to_box_center() {
        let crop = Crop::around(&PixelBox::new(100, 140, 180, 100));
        let (x, y) = crop.to_frame((96.0, 96.0));
        assert_relative_eq!(x, 120.0);
        assert_relative_eq!(y, 140.0);
    }

    #[test]
    fn test_crop_tensor_copies_raw_pixels_and_pads_outside() {
        let mut data = vec![0u8; 10 * 10 * 3];
        for px in data.chunks_exact_mut(3) {
            px.copy_from_slice(&[200, 100, 50]);
        }
        let frame = Frame::new(data, 10, 10, 3);
        // Box covering the frame; the crop extends past every edge.
        let crop = Crop::around(&PixelBox::new(0, 10, 10, 0));
        let tensor = crop_tensor(&frame, &crop);

        assert_eq!(tensor.shape(), &[1, 3, 192, 192]);
        assert_relative_eq!(tensor[[0, 0, 96, 96]], 200.0);
        assert_relative_eq!(tensor[[0, 1, 96, 96]], 100.0);
        assert_relative_eq!(tensor[[0, 2, 96, 96]], 50.0);
        assert_relative_eq!(tensor[[0, 0, 0, 0]], 0.0);
    }

    #[test]
    fn test_decode_pairs() {
        let mut data = vec![0.0f32; LANDMARK_COUNT * 2];
        data[0] = -1.0;
        data[1] = 1.0;
        let points = decode_landmarks(&data).unwrap();
        assert_eq!(points.len(), 68);
        assert_eq!(points[0], (0.0, 192.0));
        assert_eq!(points[67], (96.0, 96.0));
    }

    #[test]
    fn test_decode_triplets_takes_last_68() {
        // 1000 leading triplets followed by 68 landmark triplets
        let total = 1000 + LANDMARK_COUNT;
        let mut data = vec![-1.0f32; total * 3];
        let start = 1000 * 3;
        data[start] = 0.5;
        data[start + 1] = -0.5;
        let points = decode_landmarks(&data).unwrap();
        assert_eq!(points.len(), 68);
        assert_eq!(points[0], (144.0, 48.0));
        assert_eq!(points[1], (0.0, 0.0));
    }

    #[test]
    fn test_decode_rejects_short_output() {
        assert!(decode_landmarks(&[0.0; 10]).is_err());
    }
}
