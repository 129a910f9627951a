use serde::{Deserialize, Serialize};

use crate::detection::domain::face_box::FaceBox;
use crate::detection::domain::face_landmarks::Landmarks;

/// One entry of the output collection: a source photo and its primary face.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub src: String,
    pub avg_color: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_box: Option<FaceBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Landmarks>,
}

impl Item {
    pub fn has_face(&self) -> bool {
        self.face_box.is_some()
    }
}

/// The output document, `{"iterable": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Iterable {
    pub iterable: Vec<Item>,
}

impl Iterable {
    pub fn new(items: Vec<Item>) -> Self {
        Self { iterable: items }
    }

    pub fn len(&self) -> usize {
        self.iterable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterable.is_empty()
    }
}
