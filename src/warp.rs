use crate::{
    error::{ProjectionError, Result},
    homography::{estimate_with, ProjectionOptions},
    types::{coords, Quad},
};
use nalgebra::{point, Matrix3, Point2, Scalar};
use num_traits::ToPrimitive;

/// Below this magnitude a homogeneous denominator is treated as zero by
/// [`project_points_strict`]
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Returns the projected point together with its homogeneous denominator
fn project<A: Scalar + ToPrimitive>(h: &Matrix3<f64>, p: &Point2<A>) -> (Point2<f64>, f64) {
    let (x, y) = coords(p);

    let num_x = h[(0, 0)] * x + h[(0, 1)] * y + h[(0, 2)];
    let num_y = h[(1, 0)] * x + h[(1, 1)] * y + h[(1, 2)];
    let den = h[(2, 0)] * x + h[(2, 1)] * y + h[(2, 2)];

    (point!(num_x / den, num_y / den), den)
}

/// Transforms a single point. A vanishing denominator yields non-finite
/// coordinates
pub fn project_point<A: Scalar + ToPrimitive>(h: &Matrix3<f64>, p: &Point2<A>) -> Point2<f64> {
    project(h, p).0
}

/// Transforms a set of points, keeping their order
pub fn project_points<A: Scalar + ToPrimitive>(
    h: &Matrix3<f64>,
    points: &[Point2<A>],
) -> Vec<Point2<f64>> {
    points.iter().map(|p| project_point(h, p)).collect()
}

/// Like [`project_points`], but fails on the first point whose denominator
/// is (nearly) zero
pub fn project_points_strict<A: Scalar + ToPrimitive>(
    h: &Matrix3<f64>,
    points: &[Point2<A>],
) -> Result<Vec<Point2<f64>>> {
    points
        .iter()
        .enumerate()
        .map(|(index, p)| match project(h, p) {
            (_, den) if !(den.abs() >= SINGULAR_EPSILON) => {
                Err(ProjectionError::SingularProjection {
                    index,
                    denominator: den,
                })
            }
            (warped, _) => Ok(warped),
        })
        .collect()
}

/// Estimates the homography between two quads and moves `points` from the
/// plane of `source` into the plane of `destination`
pub fn warp_points<A: Scalar + ToPrimitive>(
    source: &Quad<f64>,
    destination: &Quad<f64>,
    points: &[Point2<A>],
) -> Result<Vec<Point2<f64>>> {
    warp_points_with(source, destination, points, &ProjectionOptions::default())
}

pub fn warp_points_with<A: Scalar + ToPrimitive>(
    source: &Quad<f64>,
    destination: &Quad<f64>,
    points: &[Point2<A>],
    options: &ProjectionOptions,
) -> Result<Vec<Point2<f64>>> {
    let h = estimate_with(source, destination, options)?;
    if options.strict_projection {
        project_points_strict(&h, points)
    } else {
        Ok(project_points(&h, points))
    }
}
