//! Box geometry shared by the ONNX detection backends.

/// Axis-aligned box `[x1, y1, x2, y2]` in pixels.
pub type BBox = [f64; 4];

/// IoU between two bounding boxes.
pub fn bbox_iou(a: &BBox, b: &BBox) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }

    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

/// Greedy NMS over `(box, score)` pairs.
///
/// Returns the kept boxes ordered by descending score.
pub fn nms(mut dets: Vec<(BBox, f64)>, iou_thresh: f64) -> Vec<(BBox, f64)> {
    dets.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut keep: Vec<(BBox, f64)> = Vec::with_capacity(dets.len());
    for det in dets {
        if keep.iter().all(|k| bbox_iou(&k.0, &det.0) <= iou_thresh) {
            keep.push(det);
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_iou_no_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [20.0, 20.0, 30.0, 30.0];
        assert_eq!(bbox_iou(&a, &b), 0.0);
    }

    #[test]
    fn test_bbox_iou_perfect_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        assert!((bbox_iou(&a, &a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bbox_iou_partial_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [5.0, 5.0, 15.0, 15.0];
        let expected = 25.0 / 175.0;
        assert!((bbox_iou(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_nms_suppresses_overlapping_keeps_higher_score() {
        let dets = vec![
            ([0.0, 0.0, 100.0, 100.0], 0.5),
            ([2.0, 2.0, 102.0, 102.0], 0.9),
        ];
        let kept = nms(dets, 0.45);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].1 - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nms_keeps_separate_boxes() {
        let dets = vec![
            ([0.0, 0.0, 50.0, 50.0], 0.8),
            ([200.0, 200.0, 250.0, 250.0], 0.9),
        ];
        let kept = nms(dets, 0.45);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].0, [200.0, 200.0, 250.0, 250.0]);
    }

    #[test]
    fn test_nms_empty_input() {
        assert!(nms(Vec::new(), 0.45).is_empty());
    }
}
