//! テスト用のストレージ・エンジンのフェイクと画像生成ヘルパー

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::errors::{StorageError, TransformError};
use crate::storage::ObjectStore;
use crate::transform::{ImageMetadata, Orientation, TransformEngine};

/// メモリ上のオブジェクトストア。取得要求を記録する
#[derive(Default)]
pub struct FakeStore {
    objects: HashMap<String, Bytes>,
    fail: bool,
    requests: Mutex<Vec<(String, String)>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての取得が NotFound 以外のエラーになるストア
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_object(mut self, key: &str, data: &[u8]) -> Self {
        self.objects
            .insert(key.to_string(), Bytes::copy_from_slice(data));
        self
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        self.requests
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));

        if self.fail {
            return Err(StorageError::Internal("connection reset".to_string()));
        }
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedOp {
    Decode,
    AutoOrient,
    Resize {
        width: Option<u32>,
        height: Option<u32>,
    },
    Encode {
        format: String,
        quality: Option<u8>,
    },
}

/// 処理内容を記録するだけのエンジン。画像は寸法だけで表す
pub struct MockEngine {
    width: u32,
    height: u32,
    output_len: usize,
    fail_decode: bool,
    operations: Mutex<Vec<RecordedOp>>,
}

impl MockEngine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            output_len: 64,
            fail_decode: false,
            operations: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_decode() -> Self {
        Self {
            fail_decode: true,
            ..Self::new(0, 0)
        }
    }

    /// encode が返すバイト数を指定する
    pub fn with_output_len(mut self, len: usize) -> Self {
        self.output_len = len;
        self
    }

    pub fn get_operations(&self) -> Vec<RecordedOp> {
        self.operations.lock().unwrap().clone()
    }

    fn record(&self, op: RecordedOp) {
        self.operations.lock().unwrap().push(op);
    }
}

impl TransformEngine for MockEngine {
    type Image = (u32, u32);

    fn decode(&self, _input: &[u8]) -> Result<(u32, u32), TransformError> {
        self.record(RecordedOp::Decode);
        if self.fail_decode {
            return Err(TransformError::ProcessingFailed("decode failed".to_string()));
        }
        Ok((self.width, self.height))
    }

    fn auto_orient(&self, image: (u32, u32)) -> Result<(u32, u32), TransformError> {
        self.record(RecordedOp::AutoOrient);
        Ok(image)
    }

    fn metadata(&self, image: &(u32, u32)) -> ImageMetadata {
        ImageMetadata {
            width: image.0,
            height: image.1,
            orientation: Orientation::NoTransforms,
        }
    }

    fn resize(
        &self,
        image: (u32, u32),
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<(u32, u32), TransformError> {
        self.record(RecordedOp::Resize { width, height });
        Ok((width.unwrap_or(image.0), height.unwrap_or(image.1)))
    }

    fn encode(
        &self,
        _image: (u32, u32),
        format: &str,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, TransformError> {
        self.record(RecordedOp::Encode {
            format: format.to_string(),
            quality,
        });
        Ok(vec![0xAB; self.output_len])
    }
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    gradient(width, height).write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encoded(width, height, ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encoded(width, height, ImageFormat::Jpeg)
}

/// EXIF Orientation タグを埋め込んだ JPEG（APP1 を SOI の直後に挿入する）
pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    // tag 0x0112 (Orientation), SHORT, count 1
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut app1 = b"Exif\x00\x00".to_vec();
    app1.extend_from_slice(&tiff);

    let jpeg = jpeg_bytes(width, height);
    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}
