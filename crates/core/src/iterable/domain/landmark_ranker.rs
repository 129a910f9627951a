//! Orders items by facial similarity to the first item.
//!
//! Similarity is the Euclidean distance between flattened normalized landmark
//! coordinates for a caller-chosen list of categories.

use thiserror::Error;

use crate::detection::domain::face_landmarks::LandmarkCategory;
use crate::iterable::domain::item::Item;

#[derive(Error, Debug, PartialEq)]
pub enum RankError {
    #[error("cannot rank an empty collection")]
    EmptyCollection,
    #[error("item '{src}' has no '{category}' landmarks")]
    MissingLandmarks {
        src: String,
        category: LandmarkCategory,
    },
    #[error("landmark vector of item {index} has {actual} values, reference has {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Concatenates the normalized `(x, y)` coordinates of each category, in the given order.
pub fn feature_vector(item: &Item, categories: &[LandmarkCategory]) -> Result<Vec<f64>, RankError> {
    let mut vector = Vec::new();
    for &category in categories {
        let points = item
            .landmarks
            .as_ref()
            .and_then(|l| l.norm.get(category))
            .ok_or_else(|| RankError::MissingLandmarks {
                src: item.src.clone(),
                category,
            })?;
        vector.extend(points.iter().flat_map(|&(x, y)| [x, y]));
    }
    Ok(vector)
}

pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Stable ascending sort by distance from the first item's landmark vector.
///
/// Items at equal distance keep their input order; the reference stays first.
pub fn rank_by_landmarks(
    items: Vec<Item>,
    categories: &[LandmarkCategory],
) -> Result<Vec<Item>, RankError> {
    if items.is_empty() {
        return Err(RankError::EmptyCollection);
    }

    let vectors = items
        .iter()
        .map(|item| feature_vector(item, categories))
        .collect::<Result<Vec<_>, _>>()?;

    let reference = &vectors[0];
    let mut distances = Vec::with_capacity(vectors.len());
    for (index, vector) in vectors.iter().enumerate() {
        if vector.len() != reference.len() {
            return Err(RankError::DimensionMismatch {
                index,
                expected: reference.len(),
                actual: vector.len(),
            });
        }
        distances.push(euclidean_distance(reference, vector));
    }
    log::debug!("Landmark distances from reference: {distances:?}");

    let mut ranked: Vec<(f64, Item)> = distances.into_iter().zip(items).collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(ranked.into_iter().map(|(_, item)| item).collect())
}
