pub mod engine;
pub mod normalizer;
pub mod prompt;
pub mod provider;

pub use crate::domain::model::{BusinessModel, Diagnosis, ScoringRequest};
pub use crate::domain::ports::{CompletionProvider, ConfigProvider};
pub use crate::utils::error::Result;
