use super::error::InfrastructureError;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub struct LocalFileStorage;

impl LocalFileStorage {
    pub fn new() -> Self {
        Self
    }

    pub async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, InfrastructureError> {
        let data = fs::read(path).await.map_err(InfrastructureError::IoError)?;
        Ok(data)
    }

    /// Reads and decodes an image, guessing the format from its contents.
    pub async fn load_image(&self, path: &Path) -> Result<DynamicImage, InfrastructureError> {
        let data = self.read_bytes(path).await?;
        let image = image::load_from_memory(&data).map_err(InfrastructureError::ImageLibError)?;
        Ok(image)
    }

    /// Encodes `image` as PNG at `path`, creating parent directories first.
    pub async fn save_png(&self, path: &Path, image: &RgbaImage) -> Result<(), InfrastructureError> {
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(InfrastructureError::ImageLibError)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(InfrastructureError::IoError)?;
        }
        let mut file = fs::File::create(path).await.map_err(InfrastructureError::IoError)?;
        file.write_all(&buffer.into_inner()).await.map_err(InfrastructureError::IoError)?;
        file.flush().await.map_err(InfrastructureError::IoError)?;
        Ok(())
    }
}

impl Default for LocalFileStorage {
    fn default() -> Self {
        Self::new()
    }
}
