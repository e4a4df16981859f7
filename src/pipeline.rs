use crate::{
    composite::composite,
    error::{ProjectionError, Result},
    homography::ProjectionOptions,
    interior::{inclusive_edges, interior_points_with},
    types::{quad_from_extent, Quad},
    warp::warp_points_with,
};
use log::debug;
use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

/// Pastes a logo into the goal quad of any number of frames
pub struct Projector<T = u8> {
    logo: Array3<T>,
    corners: Quad<f64>,
    options: ProjectionOptions,
}

impl<T: Clone + Send + Sync> Projector<T> {
    /// Uses the full extent of the logo as its source quad
    pub fn new(logo: Array3<T>) -> Self {
        let (height, width, _) = logo.dim();
        Self {
            corners: quad_from_extent(width, height),
            logo,
            options: ProjectionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProjectionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn corners(&self) -> &Quad<f64> {
        &self.corners
    }

    pub fn logo(&self) -> ArrayView3<T> {
        self.logo.view()
    }

    /// Replaces every pixel inside `goal` with the logo pixel it maps onto
    /// ### Explanation
    /// Goal pixels lying exactly on an edge are kept only when that edge maps
    /// onto the top or left border of the logo, so every kept pixel lands
    /// inside the logo whatever the orientation of the goal
    pub fn project(&self, frame: ArrayView3<T>, goal: &Quad<f64>) -> Result<Array3<T>> {
        let (height, width, _) = frame.dim();

        let inclusive = inclusive_edges(&self.corners);
        let interior = interior_points_with(height, width, goal, &inclusive);
        debug!("{} pixels inside goal {:?}", interior.len(), goal);

        // the goal is the source plane: every interior pixel looks up its logo pixel
        let warped = warp_points_with(goal, &self.corners, &interior, &self.options)?;
        composite(frame, self.logo.view(), &interior, &warped)
    }

    /// Projects the logo into every frame in parallel. Frames are paired with
    /// goals by position; each frame succeeds or fails on its own
    pub fn project_all(
        &self,
        frames: &[Array3<T>],
        goals: &[Quad<f64>],
    ) -> Result<Vec<Result<Array3<T>>>> {
        if frames.len() != goals.len() {
            return Err(ProjectionError::ShapeMismatch {
                what: "goal quads",
                expected: frames.len(),
                actual: goals.len(),
            });
        }

        let results = frames
            .par_iter()
            .zip(goals.par_iter())
            .map(|(frame, goal)| self.project(frame.view(), goal))
            .collect();
        Ok(results)
    }
}
