pub mod compose;
pub mod constants;
pub mod edge;
pub mod errors;
pub mod pipeline;
pub mod request;
pub mod storage;
pub mod transform;
pub mod validation;

#[cfg(test)]
mod test_helpers;

// 公開API
pub use compose::{compose, PipelineOutcome};
pub use constants::{DEFAULT_FORMAT, IMAGE_EXTENSIONS, MAX_OUTPUT_BYTES};
pub use edge::{EdgeEvent, EdgeRequest, EdgeResponse};
pub use errors::{GatewayError, StorageError, TransformError};
pub use pipeline::Pipeline;
pub use request::{ObjectKey, TransformDirective};
pub use storage::{ObjectStore, StorageProxyClient};
pub use transform::{ImageEngine, ImageMetadata, TransformEngine};
pub use validation::{classify, Eligibility};
