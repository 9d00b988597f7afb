//! Mapping model-space positions into a pixel viewport.

use serde::{Deserialize, Serialize};

use crate::graph::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Smallest axis-aligned box containing every point; `None` for an empty slice or non-finite
/// coordinates.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    if points.is_empty() {
        return None;
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return None;
        }
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Blank border kept on every side.
    pub padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 20.0,
        }
    }
}

impl Viewport {
    /// Scales the drawing uniformly so its bounding box fits inside the padded viewport, and
    /// centers it. An axis with zero extent collapses onto the viewport's center line.
    pub fn fit(&self, points: &[Point]) -> Vec<Point> {
        let Some(bbox) = bounding_box(points) else {
            return points.to_vec();
        };
        let avail_w = (self.width - 2.0 * self.padding).max(0.0);
        let avail_h = (self.height - 2.0 * self.padding).max(0.0);

        let mut scale = f64::INFINITY;
        if bbox.width > 0.0 {
            scale = scale.min(avail_w / bbox.width);
        }
        if bbox.height > 0.0 {
            scale = scale.min(avail_h / bbox.height);
        }
        if !scale.is_finite() {
            scale = 1.0;
        }

        let offset_x = self.padding + (avail_w - bbox.width * scale) / 2.0;
        let offset_y = self.padding + (avail_h - bbox.height * scale) / 2.0;
        points
            .iter()
            .map(|p| Point {
                x: offset_x + (p.x - bbox.x) * scale,
                y: offset_y + (p.y - bbox.y) * scale,
            })
            .collect()
    }
}
