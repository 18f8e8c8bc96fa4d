use image::{DynamicImage, ImageReader};
use std::io::Cursor;

use crate::constants::{DEFAULT_QUALITY, MAX_PIXELS};
use crate::errors::TransformError;
use crate::transform::dimensions::plan_resize;
use crate::transform::encode::encode_image;
use crate::transform::engine::{ImageMetadata, TransformEngine};
use crate::transform::format::OutputFormat;
use crate::transform::orientation::{orient, read_orientation, Orientation};
use crate::transform::resize::apply_plan;

/// image クレートによる変換エンジン
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEngine;

/// デコード済み画像と、まだ適用していない EXIF の向き
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    orientation: Orientation,
}

impl ImageEngine {
    pub fn new() -> Self {
        Self
    }
}

/// ソース画像の総ピクセル数を検証し、メモリ枯渇を防ぐ
fn validate_source_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    let total_pixels = width as u64 * height as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}

impl TransformEngine for ImageEngine {
    type Image = DecodedImage;

    fn decode(&self, input: &[u8]) -> Result<DecodedImage, TransformError> {
        let reader = ImageReader::new(Cursor::new(input))
            .with_guessed_format()
            .map_err(|e| TransformError::ProcessingFailed(format!("failed to guess format: {e}")))?;

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| TransformError::ProcessingFailed(format!("failed to read dimensions: {e}")))?;
        validate_source_dimensions(width, height)?;

        let image = ImageReader::new(Cursor::new(input))
            .with_guessed_format()
            .map_err(|e| TransformError::ProcessingFailed(format!("failed to guess format: {e}")))?
            .decode()
            .map_err(|e| TransformError::ProcessingFailed(format!("decode failed: {e}")))?;

        Ok(DecodedImage {
            image,
            orientation: read_orientation(input).unwrap_or(Orientation::NoTransforms),
        })
    }

    fn auto_orient(&self, decoded: DecodedImage) -> Result<DecodedImage, TransformError> {
        Ok(DecodedImage {
            image: orient(decoded.image, decoded.orientation),
            orientation: Orientation::NoTransforms,
        })
    }

    fn metadata(&self, decoded: &DecodedImage) -> ImageMetadata {
        ImageMetadata {
            width: decoded.image.width(),
            height: decoded.image.height(),
            orientation: decoded.orientation,
        }
    }

    fn resize(
        &self,
        decoded: DecodedImage,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<DecodedImage, TransformError> {
        let (src_w, src_h) = (decoded.image.width(), decoded.image.height());
        let Some(plan) = plan_resize(src_w, src_h, width, height) else {
            return Ok(decoded);
        };

        Ok(DecodedImage {
            image: apply_plan(&decoded.image, plan)?,
            orientation: decoded.orientation,
        })
    }

    fn encode(
        &self,
        decoded: DecodedImage,
        format: &str,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, TransformError> {
        let output_format = OutputFormat::parse(format)
            .ok_or_else(|| TransformError::UnsupportedFormat(format.to_string()))?;

        encode_image(
            &decoded.image,
            output_format,
            quality.unwrap_or(DEFAULT_QUALITY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{jpeg_with_orientation, png_bytes};

    #[test]
    fn test_decode_reads_dimensions() {
        let engine = ImageEngine::new();
        let decoded = engine.decode(&png_bytes(80, 60)).unwrap();
        let meta = engine.metadata(&decoded);
        assert_eq!((meta.width, meta.height), (80, 60));
        assert_eq!(meta.orientation, Orientation::NoTransforms);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let engine = ImageEngine::new();
        assert!(matches!(
            engine.decode(b"definitely not an image"),
            Err(TransformError::ProcessingFailed(_))
        ));
    }

    #[test]
    fn test_auto_orient_applies_pending_rotation() {
        let engine = ImageEngine::new();
        let decoded = DecodedImage {
            image: DynamicImage::new_rgb8(10, 20),
            orientation: Orientation::Rotate90,
        };
        let oriented = engine.auto_orient(decoded).unwrap();
        let meta = engine.metadata(&oriented);
        assert_eq!((meta.width, meta.height), (20, 10));
        assert_eq!(meta.orientation, Orientation::NoTransforms);
    }

    #[test]
    fn test_auto_orient_from_exif() {
        let engine = ImageEngine::new();
        let decoded = engine.decode(&jpeg_with_orientation(40, 20, 6)).unwrap();
        let meta = engine.metadata(&decoded);
        assert_eq!((meta.width, meta.height), (40, 20));
        assert_eq!(meta.orientation, Orientation::Rotate90);

        let oriented = engine.auto_orient(decoded).unwrap();
        let meta = engine.metadata(&oriented);
        assert_eq!((meta.width, meta.height), (20, 40));
        assert_eq!(meta.orientation, Orientation::NoTransforms);
    }

    #[test]
    fn test_resize_fills_missing_dimension() {
        let engine = ImageEngine::new();
        let decoded = engine.decode(&png_bytes(80, 60)).unwrap();
        let resized = engine.resize(decoded, Some(40), None).unwrap();
        let meta = engine.metadata(&resized);
        assert_eq!((meta.width, meta.height), (40, 30));
    }

    #[test]
    fn test_resize_both_dimensions_is_exact() {
        let engine = ImageEngine::new();
        let decoded = engine.decode(&png_bytes(80, 60)).unwrap();
        let resized = engine.resize(decoded, Some(30), Some(30)).unwrap();
        let meta = engine.metadata(&resized);
        assert_eq!((meta.width, meta.height), (30, 30));
    }

    #[test]
    fn test_encode_unknown_format() {
        let engine = ImageEngine::new();
        let decoded = engine.decode(&png_bytes(8, 8)).unwrap();
        match engine.encode(decoded, "bmp", None) {
            Err(TransformError::UnsupportedFormat(f)) => assert_eq!(f, "bmp"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_webp_roundtrips_dimensions() {
        let engine = ImageEngine::new();
        let decoded = engine.decode(&png_bytes(16, 12)).unwrap();
        let bytes = engine.encode(decoded, "WEBP", Some(50)).unwrap();
        let again = engine.decode(&bytes).unwrap();
        let meta = engine.metadata(&again);
        assert_eq!((meta.width, meta.height), (16, 12));
    }
}
