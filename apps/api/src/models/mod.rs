pub mod media;
pub mod request;
pub mod result;

pub use media::InlineMedia;
pub use request::{ResumeSource, TailorRequest};
pub use result::TailoringResult;
