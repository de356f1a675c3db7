use std::result;

pub type Result<T, E = Error> = result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Something the pipeline needs (the noise texture, one of the frame's
    /// inputs) is missing or has unexpected dimensions.
    ///
    /// Cameras don't propagate this error - they disable themselves and pass
    /// the scene through instead.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("couldn't allocate {bytes} bytes for texture `{label}`")]
    AllocationFailed { label: String, bytes: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub fn resource_unavailable(msg: impl ToString) -> Self {
        Self::ResourceUnavailable(msg.to_string())
    }
}
