use crate::{
    error::{ProjectionError, Result},
    types::RgbImg,
};
use ndarray::{Array, Array3, Ix3};

pub trait IntoArray<A, D> {
    fn into_array(self) -> Result<Array<A, D>>;
}

pub trait IntoImage<I> {
    fn into_image(self) -> Result<I>;
}

macro_rules! impl_into_array {
    ($($A: ty),*) => {$(
        impl IntoArray<$A, Ix3> for RgbImg<$A> {
            /// Reinterprets the pixel buffer as `[row, column, channel]` without copying
            fn into_array(self) -> Result<Array3<$A>> {
                let shape = (self.height() as usize, self.width() as usize, 3);
                let len = self.len();
                Array3::from_shape_vec(shape, self.into_raw()).map_err(|_| {
                    ProjectionError::ShapeMismatch {
                        what: "pixel buffer",
                        expected: shape.0 * shape.1 * shape.2,
                        actual: len,
                    }
                })
            }
        }
    )*};
} // As long as Enlargeable trait is not exposed from image crate, conversions must be implemented per type
impl_into_array!(u8, u16, f32);

macro_rules! impl_into_image {
    ($($A: ty),*) => {$(
        impl IntoImage<RgbImg<$A>> for Array3<$A> {
            fn into_image(self) -> Result<RgbImg<$A>> {
                let (height, width, channels) = self.dim();
                if channels != 3 {
                    return Err(ProjectionError::ShapeMismatch {
                        what: "rgb channels",
                        expected: 3,
                        actual: channels,
                    });
                }

                let arr = if self.is_standard_layout() {
                    self
                } else {
                    self.as_standard_layout().into_owned()
                };
                let len = arr.len();
                RgbImg::from_raw(width as u32, height as u32, arr.into_raw_vec()).ok_or(
                    ProjectionError::ShapeMismatch {
                        what: "pixel buffer",
                        expected: width * height * 3,
                        actual: len,
                    },
                )
            }
        }
    )*};
}
impl_into_image!(u8, u16, f32);
