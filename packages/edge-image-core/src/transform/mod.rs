pub mod apply;
pub mod dimensions;
pub mod encode;
pub mod engine;
pub mod format;
pub mod image_engine;
pub mod orientation;
pub mod resize;

pub use apply::{apply_directive, should_resize};
pub use dimensions::{plan_resize, CropRect, ResizePlan};
pub use encode::encode_image;
pub use engine::{ImageMetadata, TransformEngine};
pub use format::OutputFormat;
pub use image_engine::{DecodedImage, ImageEngine};
pub use orientation::{orient, read_orientation, Orientation};
pub use resize::{apply_plan, resize_image};
