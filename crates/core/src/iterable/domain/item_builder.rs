use crate::detection::domain::face_extractor::ExtractedFace;
use crate::iterable::domain::item::Item;
use crate::search::domain::photo::Photo;

/// Assembles an [`Item`] from provider metadata and an optional extraction.
///
/// The `large` rendition is used as the item source.
pub fn build_item(photo: &Photo, face: Option<ExtractedFace>) -> Item {
    let (face_box, landmarks) = match face {
        Some(f) => (Some(f.face_box), Some(f.landmarks)),
        None => (None, None),
    };
    Item {
        src: photo.src.large.clone(),
        avg_color: photo.avg_color.clone(),
        description: photo.alt.clone(),
        face_box,
        landmarks,
    }
}
