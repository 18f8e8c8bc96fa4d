pub mod eligibility;
pub mod params;

pub use eligibility::{classify, is_image_extension, Eligibility};
pub use params::validate_directive;
