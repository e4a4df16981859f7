use crate::{
    error::{ProjectionError, Result},
    types::{quad_from_slice, Quad},
};
use itertools::Itertools;
use log::debug;
use nalgebra::{Matrix3, Point2, SMatrix, SVD};

/// Smallest triangle area, relative to the squared extent of a quad, that
/// three of its corners may span before they count as collinear
pub const DEGENERACY_TOLERANCE: f64 = 1e-6;

/// Knobs for estimating a projection with [`estimate_with`] and applying it
/// with [`warp_points_with`](crate::warp::warp_points_with). The default
/// reproduces the plain DLT solve on raw pixel coordinates with no validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Condition both point sets (centroid at origin, mean distance sqrt 2)
    /// before solving
    pub normalize: bool,
    /// Refuse quads with collinear or duplicate corners
    pub reject_degenerate: bool,
    /// Fail on vanishing homogeneous denominators instead of producing
    /// non-finite coordinates
    pub strict_projection: bool,
}

/// Calculates the projection matrix that maps the corners of `source` onto
/// the corners of `destination`. The result is only defined up to scale
pub fn estimate(source: &Quad<f64>, destination: &Quad<f64>) -> Result<Matrix3<f64>> {
    estimate_with(source, destination, &ProjectionOptions::default())
}

/// Same as [`estimate`], for correspondences that come as plain slices
pub fn estimate_from_slices(
    source: &[Point2<f64>],
    destination: &[Point2<f64>],
) -> Result<Matrix3<f64>> {
    let source = quad_from_slice(source)?;
    let destination = quad_from_slice(destination)?;
    estimate(&source, &destination)
}

pub fn estimate_with(
    source: &Quad<f64>,
    destination: &Quad<f64>,
    options: &ProjectionOptions,
) -> Result<Matrix3<f64>> {
    if options.reject_degenerate {
        check_correspondence(source, destination)?;
    }

    if !options.normalize {
        return solve_dlt(source, destination);
    }

    let (src, t_src, _) = normalize(source);
    let (dst, _, t_dst_inv) = normalize(destination);
    let h = solve_dlt(&src, &dst)?;
    Ok(t_dst_inv * h * t_src)
}

/// Checks both quads for triples of collinear (or coincident) corners
pub fn check_correspondence(source: &Quad<f64>, destination: &Quad<f64>) -> Result<()> {
    check_quad("source", source)?;
    check_quad("destination", destination)
}

fn check_quad(name: &'static str, quad: &Quad<f64>) -> Result<()> {
    let (xs, ys): (Vec<_>, Vec<_>) = quad.iter().map(|p| (p.x, p.y)).unzip();
    let span = |v: &[f64]| {
        let (min, max) = v
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        max - min
    };
    let extent = span(&xs).max(span(&ys));
    let tolerance = DEGENERACY_TOLERANCE * extent * extent;

    for (i, j, k) in (0..quad.len()).tuple_combinations() {
        let (a, b, c) = (quad[i], quad[j], quad[k]);
        let area = 0.5 * (b - a).perp(&(c - a)).abs();
        if !(area > tolerance) {
            return Err(ProjectionError::DegenerateCorrespondence {
                quad: name,
                corners: [i, j, k],
            });
        }
    }
    Ok(())
}

/// Direct linear transform: the flattened homography is the null vector of
/// the 8x9 system built from the four correspondences
fn solve_dlt(source: &Quad<f64>, destination: &Quad<f64>) -> Result<Matrix3<f64>> {
    let rows = source.iter().zip(destination).flat_map(|(s, d)| {
        let (sx, sy, dx, dy) = (s.x, s.y, d.x, d.y);

        #[rustfmt::skip]
        let pair = [
            -sx, -sy, -1.0,  0.0,  0.0,  0.0, sx * dx, sy * dx, dx,
             0.0, 0.0,  0.0, -sx,  -sy,  -1.0, sx * dy, sy * dy, dy,
        ];
        pair
    });

    // a zero ninth row keeps the null space intact and makes V^T square
    let a = SMatrix::<f64, 9, 9>::from_row_iterator(rows.chain([0.0; 9]));

    let svd = SVD::try_new(a, false, true, f64::EPSILON, 0).ok_or(ProjectionError::SvdFailed)?;
    let v_t = svd.v_t.ok_or(ProjectionError::SvdFailed)?;

    let (idx, sigma) = svd.singular_values.argmin();
    debug!("dlt null vector at singular value {sigma:e}");

    Ok(Matrix3::from_row_iterator(v_t.row(idx).iter().copied()))
}

/// Translates the centroid to the origin and scales the mean distance to
/// sqrt 2. Returns the conditioned quad, the transform and its inverse
fn normalize(quad: &Quad<f64>) -> (Quad<f64>, Matrix3<f64>, Matrix3<f64>) {
    let n = quad.len() as f64;
    let centroid = quad.iter().map(|p| p.coords).sum::<nalgebra::Vector2<f64>>() / n;
    let mean_dist = quad.iter().map(|p| (p.coords - centroid).norm()).sum::<f64>() / n;

    let s = if mean_dist > f64::EPSILON {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let (cx, cy) = (centroid.x, centroid.y);

    #[rustfmt::skip]
    let t = Matrix3::new(
        s,   0.0, -s * cx,
        0.0, s,   -s * cy,
        0.0, 0.0,  1.0,
    );
    #[rustfmt::skip]
    let t_inv = Matrix3::new(
        1.0 / s, 0.0,     cx,
        0.0,     1.0 / s, cy,
        0.0,     0.0,     1.0,
    );

    let conditioned = quad.map(|p| Point2::from((p.coords - centroid) * s));
    (conditioned, t, t_inv)
}
