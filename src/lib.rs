//! Projects a rectangular logo into the goal frame of a photograph.
//!
//! Every frame goes through the same three steps: the pixels inside the goal
//! quad are enumerated, a homography moves them into the plane of the logo,
//! and the logo pixels found there replace the originals.

pub mod annotations;
pub mod composite;
pub mod error;
pub mod homography;
pub mod interior;
pub mod pipeline;
pub mod types;
pub mod utl;
pub mod warp;

pub use annotations::{parse_goal_corners, quads_from_array};
pub use composite::composite;
pub use error::{ProjectionError, Result};
pub use homography::{
    check_correspondence, estimate, estimate_from_slices, estimate_with, ProjectionOptions,
};
pub use interior::{contains, contains_with, inclusive_edges, interior_points, interior_points_with};
pub use pipeline::Projector;
pub use types::{quad_from_extent, quad_from_slice, Quad, RgbImg};
pub use warp::{project_points, project_points_strict, warp_points, warp_points_with};
