use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Underlying image library error")]
    ImageLibError(#[from] image::ImageError), // image::ImageError をラップ

    #[error("Underlying I/O error")]
    IoError(#[from] std::io::Error),
}
