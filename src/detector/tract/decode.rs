use std::cmp::Ordering;
use tract_onnx::prelude::tract_ndarray::ArrayViewD;

use crate::detector::interface::BoundingBox;

/// Raw model candidate with corners normalized to [0, 1] of the model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub class_id: usize,
    pub score: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Candidate {
    fn area(&self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }

    /// Scales normalized corners to pixel coordinates, clamped to the frame.
    pub fn to_bounding_box(&self, frame_width: u32, frame_height: u32) -> BoundingBox {
        let (fw, fh) = (frame_width as f32, frame_height as f32);
        let x1 = (self.x1 * fw).clamp(0.0, fw);
        let y1 = (self.y1 * fh).clamp(0.0, fh);
        let x2 = (self.x2 * fw).clamp(0.0, fw);
        let y2 = (self.y2 * fh).clamp(0.0, fh);

        BoundingBox::new(
            x1.round() as i32,
            y1.round() as i32,
            (x2 - x1).round() as i32,
            (y2 - y1).round() as i32,
        )
    }
}

fn best_class(scores: impl Iterator<Item = f32>) -> Option<(usize, f32)> {
    scores
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
}

/// Decodes the two-output layout: `boxes [1, N, 1, 4]` holding normalized
/// x1, y1, x2, y2 and `confs [1, N, C]` holding per-class scores.
pub fn decode_split(
    boxes: ArrayViewD<f32>,
    confs: ArrayViewD<f32>,
    confidence_threshold: f32,
) -> Result<Vec<Candidate>, Box<dyn std::error::Error + Send + Sync>> {
    let conf_shape = confs.shape();
    if conf_shape.len() != 3 {
        return Err(format!("Unexpected confs shape {:?}", conf_shape).into());
    }
    let (num_boxes, num_classes) = (conf_shape[1], conf_shape[2]);

    let box_values: Vec<f32> = boxes.iter().copied().collect();
    if box_values.len() != num_boxes * 4 {
        return Err(format!(
            "Boxes shape {:?} does not match {} candidates",
            boxes.shape(),
            num_boxes
        )
        .into());
    }
    let conf_values: Vec<f32> = confs.iter().copied().collect();

    let mut candidates = Vec::new();
    for i in 0..num_boxes {
        let row = &conf_values[i * num_classes..(i + 1) * num_classes];
        let Some((class_id, score)) = best_class(row.iter().copied()) else {
            continue;
        };
        if score < confidence_threshold {
            continue;
        }

        let b = &box_values[i * 4..i * 4 + 4];
        candidates.push(Candidate {
            class_id,
            score,
            x1: b[0],
            y1: b[1],
            x2: b[2],
            y2: b[3],
        });
    }

    Ok(candidates)
}

/// Decodes the single-output layout `[1, N, 5 + C]`: center x, center y, width,
/// height in model input pixels, objectness, then per-class probabilities.
pub fn decode_packed(
    output: ArrayViewD<f32>,
    input_size: (u32, u32),
    confidence_threshold: f32,
) -> Result<Vec<Candidate>, Box<dyn std::error::Error + Send + Sync>> {
    let shape = output.shape();
    if shape.len() != 3 || shape[2] <= 5 {
        return Err(format!("Unexpected output shape {:?}", shape).into());
    }
    let (num_boxes, stride) = (shape[1], shape[2]);
    let (input_width, input_height) = (input_size.0 as f32, input_size.1 as f32);

    let values: Vec<f32> = output.iter().copied().collect();

    let mut candidates = Vec::new();
    for i in 0..num_boxes {
        let row = &values[i * stride..(i + 1) * stride];
        let objectness = row[4];
        let Some((class_id, class_score)) = best_class(row[5..].iter().copied()) else {
            continue;
        };
        let score = objectness * class_score;
        if score < confidence_threshold {
            continue;
        }

        let (cx, cy, w, h) = (row[0], row[1], row[2], row[3]);
        candidates.push(Candidate {
            class_id,
            score,
            x1: (cx - w / 2.0) / input_width,
            y1: (cy - h / 2.0) / input_height,
            x2: (cx + w / 2.0) / input_width,
            y2: (cy + h / 2.0) / input_height,
        });
    }

    Ok(candidates)
}

pub fn iou(a: &Candidate, b: &Candidate) -> f32 {
    let ix1 = a.x1.max(b.x1);
    let iy1 = a.y1.max(b.y1);
    let ix2 = a.x2.min(b.x2);
    let iy2 = a.y2.min(b.y2);

    let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    let union = a.area() + b.area() - inter;
    if union <= 0.0 {
        return 0.0;
    }
    inter / union
}

/// Greedy per-class suppression, highest score first.
pub fn non_max_suppression(mut candidates: Vec<Candidate>, nms_threshold: f32) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let overlaps = kept
            .iter()
            .any(|k| k.class_id == candidate.class_id && iou(k, &candidate) > nms_threshold);
        if !overlaps {
            kept.push(candidate);
        }
    }
    kept
}
