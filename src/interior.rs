//! Rasterization of polygons onto the pixel grid.
//!
//! Containment follows the even-odd rule evaluated along each scanline. An
//! edge `a -> b` crosses the horizontal line through `y` when exactly one of
//! its endpoints lies strictly below it. Points off the boundary are inside
//! when an odd number of crossings lie to their right.
//!
//! Points exactly on an edge follow a top-left fill rule that is decided per
//! edge, not per crossing: every edge is either inclusive or exclusive, and a
//! boundary point belongs to the polygon only through inclusive edges. By
//! default an edge is inclusive when its outward normal faces up or left, so
//! the rectangle `(0,0),(w,0),(w,h),(0,h)` covers exactly the `w x h` grid and
//! a sloped bottom or right edge never contributes pixels.

use nalgebra::{point, Point2};

/// An edge intersecting a scanline
#[derive(Debug, Clone, Copy)]
struct Crossing {
    x: f64,
    inclusive: bool,
}

impl Crossing {
    /// Whether `x` lies on the inner side of a crossing that opens a span
    fn opens_before(&self, x: f64) -> bool {
        if self.inclusive {
            x >= self.x
        } else {
            x > self.x
        }
    }

    /// Whether `x` lies on the inner side of a crossing that closes a span
    fn closes_after(&self, x: f64) -> bool {
        if self.inclusive {
            x <= self.x
        } else {
            x < self.x
        }
    }

    /// First integer column inside a span opened here, clamped to the grid
    fn first_column(&self, width: usize) -> usize {
        let x = if self.inclusive {
            self.x.ceil()
        } else {
            self.x.floor() + 1.
        };
        x.clamp(0., width as f64) as usize
    }

    /// First integer column past a span closed here, clamped to the grid
    fn end_column(&self, width: usize) -> usize {
        let x = if self.inclusive {
            self.x.floor() + 1.
        } else {
            self.x.ceil()
        };
        x.clamp(0., width as f64) as usize
    }
}

/// Abscissa at which the edge `a -> b` crosses the line through `y`
fn crossing(a: &Point2<f64>, b: &Point2<f64>, y: f64) -> Option<f64> {
    ((a.y > y) != (b.y > y)).then(|| (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x)
}

/// Consecutive vertex pairs, closing the polygon
fn edges(polygon: &[Point2<f64>]) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> {
    polygon.iter().zip(polygon.iter().cycle().skip(1))
}

/// Collects the crossings of the line through `y`, sorted left to right
fn scanline(polygon: &[Point2<f64>], inclusive: &[bool], y: f64, out: &mut Vec<Crossing>) {
    out.clear();
    out.extend(edges(polygon).enumerate().filter_map(|(i, (a, b))| {
        crossing(a, b, y).map(|x| Crossing {
            x,
            inclusive: inclusive.get(i).copied().unwrap_or_default(),
        })
    }));
    out.sort_by(|l, r| l.x.total_cmp(&r.x).then(l.inclusive.cmp(&r.inclusive)));
}

/// Classifies every edge `polygon[i] -> polygon[i + 1]` of the polygon as
/// inclusive (facing up or left) or exclusive (facing down or right)
/// ### Explanation
/// The winding is read off the signed area so that the outward normal `n` of
/// each edge is known. An edge is inclusive when `n.x + n.y < 0`, with exact
/// diagonals going to the edge that faces up
pub fn inclusive_edges(polygon: &[Point2<f64>]) -> Vec<bool> {
    let doubled_area: f64 = edges(polygon).map(|(a, b)| a.x * b.y - b.x * a.y).sum();
    let winding = if doubled_area < 0. { -1. } else { 1. };

    edges(polygon)
        .map(|(a, b)| {
            let d = b - a;
            let (nx, ny) = (winding * d.y, -winding * d.x);
            nx + ny < 0. || (nx + ny == 0. && ny < 0.)
        })
        .collect()
}

/// Tests whether a point lies inside the polygon
pub fn contains(polygon: &[Point2<f64>], p: &Point2<f64>) -> bool {
    contains_with(polygon, &inclusive_edges(polygon), p)
}

/// Like [`contains`], with the inclusive edges given explicitly. Edges
/// without a flag count as exclusive
pub fn contains_with(polygon: &[Point2<f64>], inclusive: &[bool], p: &Point2<f64>) -> bool {
    let mut crossings = Vec::with_capacity(polygon.len());
    scanline(polygon, inclusive, p.y, &mut crossings);
    crossings
        .chunks_exact(2)
        .any(|span| span[0].opens_before(p.x) && span[1].closes_after(p.x))
}

/// Enumerates all pixels of a `height` x `width` grid that lie inside the
/// polygon, in row-major order
/// ### Explanation
/// Instead of testing every pixel, each row intersects the polygon edges with
/// its scanline. Sorting the crossings splits the row into alternating
/// outside/inside spans, and each span keeps or drops its end columns
/// according to the edges that bound it. The result equals filtering the
/// whole grid with [`contains`]
pub fn interior_points(height: usize, width: usize, polygon: &[Point2<f64>]) -> Vec<Point2<u32>> {
    interior_points_with(height, width, polygon, &inclusive_edges(polygon))
}

/// Like [`interior_points`], with the inclusive edges given explicitly
pub fn interior_points_with(
    height: usize,
    width: usize,
    polygon: &[Point2<f64>],
    inclusive: &[bool],
) -> Vec<Point2<u32>> {
    let mut points = vec![];
    let mut crossings = Vec::with_capacity(polygon.len());

    for row in 0..height {
        scanline(polygon, inclusive, row as f64, &mut crossings);

        for span in crossings.chunks_exact(2) {
            let (start, end) = (span[0].first_column(width), span[1].end_column(width));
            points.extend((start..end).map(|col| point!(col as u32, row as u32)));
        }
    }
    points
}
