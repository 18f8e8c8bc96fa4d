use crate::constants::{MAX_DIMENSION, MAX_PIXELS};
use crate::errors::TransformError;
use crate::transform::dimensions::ResizePlan;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage, RgbaImage};

/// 画像をリサイズする
///
/// fast_image_resize の Lanczos3 フィルタを使用する。
/// アルファチャンネルを持つ画像は RGBA8、それ以外は RGB8 で処理する
pub fn resize_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, TransformError> {
    // ピクセル数チェック
    let total_pixels = target_w as u64 * target_h as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    let has_alpha = img.color().has_alpha();
    let (raw, pixel_type) = if has_alpha {
        (img.to_rgba8().into_raw(), PixelType::U8x4)
    } else {
        (img.to_rgb8().into_raw(), PixelType::U8x3)
    };

    let src_image = Image::from_vec_u8(img.width(), img.height(), raw, pixel_type)
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, pixel_type);

    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    let converted = if has_alpha {
        RgbaImage::from_raw(target_w, target_h, dst_image.into_vec()).map(DynamicImage::ImageRgba8)
    } else {
        RgbImage::from_raw(target_w, target_h, dst_image.into_vec()).map(DynamicImage::ImageRgb8)
    };

    converted.ok_or_else(|| {
        TransformError::ProcessingFailed("failed to convert resized image".to_string())
    })
}

/// 計画に従ってリサイズし、必要なら中央で切り抜く
pub fn apply_plan(img: &DynamicImage, plan: ResizePlan) -> Result<DynamicImage, TransformError> {
    if plan.width > MAX_DIMENSION || plan.height > MAX_DIMENSION {
        return Err(TransformError::ResolutionTooLarge {
            width: plan.width,
            height: plan.height,
        });
    }

    let resized = if (plan.width, plan.height) == (img.width(), img.height()) {
        img.clone()
    } else {
        resize_image(img, plan.width, plan.height)?
    };

    Ok(match plan.crop {
        Some(rect) => resized.crop_imm(rect.x, rect.y, rect.width, rect.height),
        None => resized,
    })
}
