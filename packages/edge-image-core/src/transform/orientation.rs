use image::DynamicImage;

pub use image::metadata::Orientation;

/// バイト列の EXIF から Orientation タグを読み取る
///
/// EXIF を持たない画像や 1-8 以外の値は None
pub fn read_orientation(data: &[u8]) -> Option<Orientation> {
    let exif = exif::Reader::new()
        .read_from_container(&mut std::io::Cursor::new(data))
        .ok()?;

    let value = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
        .value
        .get_uint(0)?;

    u8::try_from(value).ok().and_then(Orientation::from_exif)
}

/// 向き情報に従って画像を正立させる
pub fn orient(mut img: DynamicImage, orientation: Orientation) -> DynamicImage {
    img.apply_orientation(orientation);
    img
}
