//! Named facial landmark groups derived from the 68-point (iBUG 300-W) layout.
//!
//! Groups follow the common dlib convention: jaw outline as `chin`, five
//! points per eyebrow, nose split into bridge and tip, six points per eye,
//! and twelve points per lip (outer contour then inner contour).

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D point as `(x, y)`.
pub type Point = (f64, f64);

pub const LANDMARK_COUNT: usize = 68;

/// Declaration order is the canonical category order for iteration and output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkCategory {
    Chin,
    LeftEyebrow,
    RightEyebrow,
    NoseBridge,
    NoseTip,
    LeftEye,
    RightEye,
    TopLip,
    BottomLip,
}

impl LandmarkCategory {
    pub const ALL: [LandmarkCategory; 9] = [
        LandmarkCategory::Chin,
        LandmarkCategory::LeftEyebrow,
        LandmarkCategory::RightEyebrow,
        LandmarkCategory::NoseBridge,
        LandmarkCategory::NoseTip,
        LandmarkCategory::LeftEye,
        LandmarkCategory::RightEye,
        LandmarkCategory::TopLip,
        LandmarkCategory::BottomLip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkCategory::Chin => "chin",
            LandmarkCategory::LeftEyebrow => "left_eyebrow",
            LandmarkCategory::RightEyebrow => "right_eyebrow",
            LandmarkCategory::NoseBridge => "nose_bridge",
            LandmarkCategory::NoseTip => "nose_tip",
            LandmarkCategory::LeftEye => "left_eye",
            LandmarkCategory::RightEye => "right_eye",
            LandmarkCategory::TopLip => "top_lip",
            LandmarkCategory::BottomLip => "bottom_lip",
        }
    }

    /// Indices into the 68-point layout, in contour order.
    fn indices(&self) -> Vec<usize> {
        match self {
            LandmarkCategory::Chin => (0..17).collect(),
            LandmarkCategory::LeftEyebrow => (17..22).collect(),
            LandmarkCategory::RightEyebrow => (22..27).collect(),
            LandmarkCategory::NoseBridge => (27..31).collect(),
            LandmarkCategory::NoseTip => (31..36).collect(),
            LandmarkCategory::LeftEye => (36..42).collect(),
            LandmarkCategory::RightEye => (42..48).collect(),
            LandmarkCategory::TopLip => (48..55).chain([64, 63, 62, 61, 60]).collect(),
            LandmarkCategory::BottomLip => (54..60).chain([48, 60, 67, 66, 65, 64]).collect(),
        }
    }
}

impl std::fmt::Display for LandmarkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("unknown landmark category '{0}' (expected one of: chin, left_eyebrow, right_eyebrow, nose_bridge, nose_tip, left_eye, right_eye, top_lip, bottom_lip)")]
    UnknownCategory(String),
    #[error("expected {expected} landmark points, got {actual}")]
    PointCount { expected: usize, actual: usize },
}

impl FromStr for LandmarkCategory {
    type Err = LandmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        LandmarkCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| LandmarkError::UnknownCategory(s.to_string()))
    }
}

/// Landmark points grouped by category, generic over the point representation
/// (pixel floats, rounded pixels, or normalized coordinates).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet<P> {
    groups: BTreeMap<LandmarkCategory, Vec<P>>,
}

impl<P> LandmarkSet<P> {
    pub fn get(&self, category: LandmarkCategory) -> Option<&[P]> {
        self.groups.get(&category).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LandmarkCategory, &[P])> {
        self.groups.iter().map(|(c, pts)| (*c, pts.as_slice()))
    }

    /// Applies `f` to every point, keeping grouping and per-group order.
    pub fn map<Q>(&self, mut f: impl FnMut(&P) -> Q) -> LandmarkSet<Q> {
        self.iter()
            .map(|(c, pts)| (c, pts.iter().map(&mut f).collect()))
            .collect()
    }
}

impl<P> FromIterator<(LandmarkCategory, Vec<P>)> for LandmarkSet<P> {
    fn from_iter<I: IntoIterator<Item = (LandmarkCategory, Vec<P>)>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

impl LandmarkSet<Point> {
    /// Groups a flat 68-point array into named categories.
    pub fn from_68_points(points: &[Point]) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::PointCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(LandmarkCategory::ALL
            .iter()
            .map(|c| (*c, c.indices().into_iter().map(|i| points[i]).collect()))
            .collect())
    }
}

/// The two parallel landmark forms emitted per face.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    /// Image-relative coordinates.
    pub norm: LandmarkSet<Point>,
    /// Pixel coordinates, rounded.
    pub values: LandmarkSet<(i32, i32)>,
}

impl Landmarks {
    pub fn from_pixels(pixels: &LandmarkSet<Point>, image_width: u32, image_height: u32) -> Self {
        let iw = image_width.max(1) as f64;
        let ih = image_height.max(1) as f64;
        Self {
            norm: pixels.map(|&(x, y)| (x / iw, y / ih)),
            values: pixels.map(|&(x, y)| (x.round() as i32, y.round() as i32)),
        }
    }
}
