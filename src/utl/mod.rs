pub mod ndarray_ext;

pub use ndarray_ext::*;
