pub mod directive;
pub mod key;

pub use directive::TransformDirective;
pub use key::ObjectKey;
