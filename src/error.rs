use std::io;

/// Everything that can go wrong outside of a frame.
///
/// Per-triangle problems (zero area, singular projection) are not errors,
/// the pipeline skips those triangles and counts them in `FrameStats`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("triangle {tri} references point {index}, but the mesh only has {len} points")]
    IndexOutOfRange { tri: usize, index: usize, len: usize },
    #[error("mesh has {points} points but {cols} colors")]
    ColorCountMismatch { points: usize, cols: usize },
    #[error("failed to load OBJ model: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("window error: {0}")]
    Window(String),
}

impl From<minifb::Error> for Error {
    fn from(e: minifb::Error) -> Self {
        Error::Window(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
