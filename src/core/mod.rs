pub mod projection;
pub mod source;

pub use crate::domain::model::{Record, ResumeField};
pub use crate::domain::ports::{ConfigProvider, RecordSource};
pub use crate::utils::error::Result;
