use crate::errors::TransformError;
use crate::transform::format::OutputFormat;
use image::codecs::avif::AvifEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder};

/// 指定フォーマット・品質で画像をエンコードする
///
/// quality を使うのは JPEG・WebP・AVIF のみ。PNG と GIF は可逆なので無視する
pub fn encode_image(
    img: &DynamicImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, TransformError> {
    let mut out = Vec::new();

    let result = match format {
        OutputFormat::Jpeg => {
            let rgb = img.to_rgb8();
            JpegEncoder::new_with_quality(&mut out, quality).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
        }
        OutputFormat::Png => img.write_with_encoder(PngEncoder::new(&mut out)),
        OutputFormat::Gif => {
            let frame = image::Frame::new(img.to_rgba8());
            GifEncoder::new(&mut out).encode_frame(frame)
        }
        OutputFormat::Avif => {
            img.write_with_encoder(AvifEncoder::new_with_speed_quality(&mut out, 4, quality))
        }
        OutputFormat::WebP => {
            out = encode_webp(img, quality);
            Ok(())
        }
    };

    result.map_err(|e| {
        TransformError::ProcessingFailed(format!("{format:?} encode failed: {e}"))
    })?;
    Ok(out)
}

/// libwebp による非可逆 WebP エンコード
fn encode_webp(img: &DynamicImage, quality: u8) -> Vec<u8> {
    let (width, height) = (img.width(), img.height());
    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode(f32::from(quality))
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode(f32::from(quality))
    };
    encoded.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
            let v = x.wrapping_mul(31) ^ y.wrapping_mul(17);
            image::Rgb([(v * 7) as u8, (x * 4) as u8, (y * 4) as u8])
        }))
    }

    #[test]
    fn test_encode_jpeg() {
        let data = encode_image(&DynamicImage::new_rgb8(10, 10), OutputFormat::Jpeg, 80).unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_jpeg_quality_changes_size() {
        let img = noisy(64, 64);
        let low = encode_image(&img, OutputFormat::Jpeg, 10).unwrap();
        let high = encode_image(&img, OutputFormat::Jpeg, 95).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_encode_png_with_alpha() {
        let data = encode_image(&DynamicImage::new_rgba8(10, 10), OutputFormat::Png, 80).unwrap();
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_webp_is_riff() {
        let data = encode_image(&DynamicImage::new_rgb8(10, 10), OutputFormat::WebP, 80).unwrap();
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_webp_honours_quality() {
        let img = noisy(128, 96);
        let low = encode_image(&img, OutputFormat::WebP, 5).unwrap();
        let high = encode_image(&img, OutputFormat::WebP, 95).unwrap();
        assert!(low.len() < high.len(), "q5={} q95={}", low.len(), high.len());
    }

    #[test]
    fn test_encode_webp_with_alpha() {
        let data = encode_image(&DynamicImage::new_rgba8(10, 10), OutputFormat::WebP, 50).unwrap();
        assert_eq!(&data[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_gif() {
        let data = encode_image(&DynamicImage::new_rgb8(10, 10), OutputFormat::Gif, 80).unwrap();
        assert_eq!(&data[0..3], b"GIF");
    }

    #[test]
    fn test_encode_avif() {
        let data = encode_image(&DynamicImage::new_rgb8(10, 10), OutputFormat::Avif, 80).unwrap();
        assert!(!data.is_empty());
    }
}
