use crate::error::{ProjectionError, Result};
use image::{ImageBuffer, Rgb};
use nalgebra::{point, Point2, Scalar};
use num_traits::ToPrimitive;

pub type Quad<A> = [Point2<A>; 4];
pub type RgbImg<A> = ImageBuffer<Rgb<A>, Vec<A>>;

/// Corners of a `width` x `height` rectangle anchored at the origin, in
/// clockwise order starting from the top left
pub fn quad_from_extent(width: usize, height: usize) -> Quad<f64> {
    let (w, h) = (width as f64, height as f64);
    [point!(0., 0.), point!(w, 0.), point!(w, h), point!(0., h)]
}

/// Builds a quad out of a slice that must hold exactly four points
pub fn quad_from_slice(points: &[Point2<f64>]) -> Result<Quad<f64>> {
    points
        .try_into()
        .map_err(|_| ProjectionError::ShapeMismatch {
            what: "quad corners",
            expected: 4,
            actual: points.len(),
        })
}

/// Reads both coordinates of a point as `f64`; unrepresentable values become NaN
pub(crate) fn coords<A: Scalar + ToPrimitive>(p: &Point2<A>) -> (f64, f64) {
    let f = |v: &A| v.to_f64().unwrap_or(f64::NAN);
    (f(&p.x), f(&p.y))
}
