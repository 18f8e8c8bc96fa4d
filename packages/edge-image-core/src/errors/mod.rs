mod types;

pub use types::{GatewayError, StorageError, TransformError};
