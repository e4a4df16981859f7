/// Everything that can make a single frame fail.
#[derive(thiserror::Error, Debug)]
pub enum ProjectionError {
    /// Three corners of a quad are collinear or coincide.
    #[error("corners {corners:?} of the {quad} quad are collinear")]
    DegenerateCorrespondence {
        quad: &'static str,
        corners: [usize; 3],
    },

    /// The homogeneous denominator vanished while projecting a point.
    #[error("point {index} projects to infinity (denominator {denominator:e})")]
    SingularProjection { index: usize, denominator: f64 },

    /// A point addresses a pixel outside of the image it is read from or written to.
    #[error("point {index} at ({x}, {y}) lies outside of the {width}x{height} image")]
    OutOfBounds {
        index: usize,
        x: f64,
        y: f64,
        width: usize,
        height: usize,
    },

    /// Inputs disagree on their length or layout.
    #[error("{what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The singular value decomposition did not converge.
    #[error("could not compute the singular value decomposition")]
    SvdFailed,

    /// The corner annotations could not be parsed.
    #[error("invalid corner annotations")]
    Annotations(#[from] serde_json::Error),
}

pub type Result<A> = core::result::Result<A, ProjectionError>;
