mod types;

pub use types::{BodyEncoding, CfPayload, EdgeEvent, EdgeRecord, EdgeRequest, EdgeResponse, HeaderEntry};
