/// 中央切り抜きの範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// リサイズ後の寸法と、必要なら続けて行う切り抜き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    pub width: u32,
    pub height: u32,
    pub crop: Option<CropRect>,
}

/// 倍率を適用して新しい寸法を計算する
fn apply_scale(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;

    // 最小1pxを保証
    (new_w.max(1), new_h.max(1))
}

/// Cover モードの計画を立てる
///
/// 指定領域を覆う最小の倍率で拡縮し、はみ出した部分を中央で切り抜いて
/// ちょうど `target_w x target_h` にする
fn plan_cover(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> ResizePlan {
    let scale_w = target_w as f64 / src_w as f64;
    let scale_h = target_h as f64 / src_h as f64;
    let (w, h) = apply_scale(src_w, src_h, scale_w.max(scale_h));
    // 丸めで目標を下回らないようにする
    let (w, h) = (w.max(target_w), h.max(target_h));

    let crop = (w != target_w || h != target_h).then(|| CropRect {
        x: (w - target_w) / 2,
        y: (h - target_h) / 2,
        width: target_w,
        height: target_h,
    });

    ResizePlan {
        width: w,
        height: h,
        crop,
    }
}

/// 片方の寸法だけが指定された場合、アスペクト比からもう片方を埋める
fn plan_single(src_w: u32, src_h: u32, scale: f64) -> ResizePlan {
    let (width, height) = apply_scale(src_w, src_h, scale);
    ResizePlan {
        width,
        height,
        crop: None,
    }
}

/// リサイズ計画を立てる
///
/// 拡大も行う（拡大を防ぐかどうかは呼び出し側の判断）。
/// 幅・高さともに未指定なら None
pub fn plan_resize(
    src_w: u32,
    src_h: u32,
    target_w: Option<u32>,
    target_h: Option<u32>,
) -> Option<ResizePlan> {
    match (target_w, target_h) {
        (Some(w), Some(h)) => Some(plan_cover(src_w, src_h, w, h)),
        (Some(w), None) => Some(plan_single(src_w, src_h, w as f64 / src_w as f64)),
        (None, Some(h)) => Some(plan_single(src_w, src_h, h as f64 / src_h as f64)),
        (None, None) => None,
    }
}
