use std::path::{Path, PathBuf};
use std::sync::Arc;
use super::config::DiffConfig;
use super::error::ApplicationError;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage};
use tracing::{debug, info, warn};

use crate::domain::comparison::{ComparisonOptions, ComparisonResult};
use crate::domain::ignore_region::IgnoreRegion;
use crate::domain::image_comparer_trait::ImageComparer;
use crate::infrastructure::file_storage::LocalFileStorage;

const OUTPUT_SUFFIX: &str = "_highlighted.png";

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub region_count: usize,
    /// Where the merged image was written; `None` when nothing differed.
    pub output_path: Option<PathBuf>,
}

pub struct DiffService {
    image_comparer: Arc<dyn ImageComparer + Send + Sync>, // トレイトオブジェクトとして保持
    file_storage: LocalFileStorage,
}

impl DiffService {
    pub fn new(image_comparer: Arc<dyn ImageComparer + Send + Sync>) -> Self {
        Self {
            image_comparer,
            file_storage: LocalFileStorage::new(),
        }
    }

    /// `<diff_folder>/<old file stem>_highlighted.png`
    pub fn output_path_for(old_path: &Path, diff_folder: &Path) -> PathBuf {
        let stem = old_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        diff_folder.join(format!("{}{}", stem, OUTPUT_SUFFIX))
    }

    /// Brings `new` to the size and channel layout of `old` before comparison.
    pub fn reconcile(old: &DynamicImage, new: DynamicImage, label: &str) -> DynamicImage {
        let mut new = new;
        if old.width() != new.width() || old.height() != new.height() {
            info!("Resizing images: {}", label);
            new = new.resize_exact(old.width(), old.height(), FilterType::CatmullRom);
        }
        if old.color() != new.color() {
            info!("Converting image modes: {}", label);
            new = convert_to_layout(&new, old.color());
        }
        new
    }

    pub fn compare_loaded(
        &self,
        old: &DynamicImage,
        new: &DynamicImage,
        ignore_regions: &[IgnoreRegion],
        options: &ComparisonOptions,
    ) -> Result<ComparisonResult, ApplicationError> {
        Ok(self.image_comparer.compare(old, new, ignore_regions, options)?)
    }

    pub async fn process_image_files(
        &self,
        old_path: &Path,
        new_path: &Path,
        config: &DiffConfig,
    ) -> Result<ProcessOutcome, ApplicationError> {
        let label = old_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(old = %old_path.display(), new = %new_path.display(), "Processing image pair");

        let old = self.file_storage.load_image(old_path).await?;
        let new = self.file_storage.load_image(new_path).await?;
        let new = Self::reconcile(&old, new, &label);

        let result = self.compare_loaded(&old, &new, &config.ignore_regions, &config.comparison_options())?;
        let region_count = result.region_count();
        if region_count == 0 {
            info!("No differences found: {}", label);
            return Ok(ProcessOutcome {
                region_count,
                output_path: None,
            });
        }

        let output_path = Self::output_path_for(old_path, &config.diff_folder);
        self.file_storage.save_png(&output_path, &result.side_by_side()).await?;
        info!(regions = region_count, "Merged image saved as: {}", output_path.display());

        Ok(ProcessOutcome {
            region_count,
            output_path: Some(output_path),
        })
    }
}

fn convert_to_layout(image: &DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(image.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        other => {
            // 比較側で LayoutMismatch として報告される
            warn!(?other, "Unsupported channel layout, leaving image as is");
            image.clone()
        }
    }
}
