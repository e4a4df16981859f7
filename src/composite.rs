use crate::{
    error::{ProjectionError, Result},
    types::coords,
};
use itertools::izip;
use nalgebra::{Point2, Scalar};
use ndarray::{s, Array3, ArrayView3};
use num_traits::ToPrimitive;

/// Copies `overlay[overlay_points[i]]` onto `base[base_points[i]]` for every
/// `i` and every channel, and returns the result as a new image
/// ### Explanation
/// Coordinates are truncated toward zero before use, so no interpolation
/// takes place. All pairs are validated before the first pixel is written:
/// a coordinate that truncates to a non-finite or out-of-range index fails
/// the whole call. Pixels that no base point addresses keep their original
/// value; when base points repeat, the last one wins
pub fn composite<T, B, O>(
    base: ArrayView3<T>,
    overlay: ArrayView3<T>,
    base_points: &[Point2<B>],
    overlay_points: &[Point2<O>],
) -> Result<Array3<T>>
where
    T: Clone,
    B: Scalar + ToPrimitive,
    O: Scalar + ToPrimitive,
{
    if base_points.len() != overlay_points.len() {
        return Err(ProjectionError::ShapeMismatch {
            what: "overlay points",
            expected: base_points.len(),
            actual: overlay_points.len(),
        });
    }

    let (height, width, channels) = base.dim();
    let (overlay_height, overlay_width, overlay_channels) = overlay.dim();
    if channels != overlay_channels {
        return Err(ProjectionError::ShapeMismatch {
            what: "overlay channels",
            expected: channels,
            actual: overlay_channels,
        });
    }

    let pairs = izip!(base_points, overlay_points)
        .enumerate()
        .map(|(index, (b, o))| {
            let to = pixel_index(index, b, width, height)?;
            let from = pixel_index(index, o, overlay_width, overlay_height)?;
            Ok((to, from))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut result = base.to_owned();
    for ((row, col), (overlay_row, overlay_col)) in pairs {
        result
            .slice_mut(s![row, col, ..])
            .assign(&overlay.slice(s![overlay_row, overlay_col, ..]));
    }
    Ok(result)
}

/// Truncates a point to a `(row, column)` index inside a `width` x `height` image
fn pixel_index<A: Scalar + ToPrimitive>(
    index: usize,
    p: &Point2<A>,
    width: usize,
    height: usize,
) -> Result<(usize, usize)> {
    let (x, y) = coords(p);
    let (x, y) = (x.trunc(), y.trunc());

    let within = |v: f64, extent: usize| v.is_finite() && v >= 0. && v < extent as f64;
    if within(x, width) && within(y, height) {
        Ok((y as usize, x as usize))
    } else {
        Err(ProjectionError::OutOfBounds {
            index,
            x,
            y,
            width,
            height,
        })
    }
}
