//! Per-frame goal corners, as produced by an annotation tool.

use crate::{
    error::{ProjectionError, Result},
    types::{quad_from_slice, Quad},
};
use nalgebra::{point, Point2};
use ndarray::ArrayView3;

/// Parses corners stored as JSON, one list of four `[x, y]` pairs per frame
/// ### Example
/// ```
/// let json = "[[[0, 0], [4, 0], [4, 3], [0, 3]]]";
/// let quads = goalpost::parse_goal_corners(json).unwrap();
/// assert_eq!(quads[0][2], nalgebra::point!(4., 3.));
/// ```
pub fn parse_goal_corners(json: &str) -> Result<Vec<Quad<f64>>> {
    let frames: Vec<Vec<[f64; 2]>> = serde_json::from_str(json)?;
    frames
        .iter()
        .map(|corners| {
            let points: Vec<Point2<f64>> = corners.iter().map(|&[x, y]| point!(x, y)).collect();
            quad_from_slice(&points)
        })
        .collect()
}

/// Splits an array of shape `[frame_count, 4, 2]` into one quad per frame
pub fn quads_from_array(corners: ArrayView3<f64>) -> Result<Vec<Quad<f64>>> {
    let (frames, n, dims) = corners.dim();
    if n != 4 || dims != 2 {
        return Err(ProjectionError::ShapeMismatch {
            what: "corner array of shape [frames, 4, 2]",
            expected: frames * 4 * 2,
            actual: frames * n * dims,
        });
    }

    let quads = corners
        .outer_iter()
        .map(|frame| std::array::from_fn(|i| point!(frame[[i, 0]], frame[[i, 1]])))
        .collect();
    Ok(quads)
}
