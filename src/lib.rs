pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::file::ProfileConfig;
pub use crate::core::{engine::DiagnosisEngine, normalizer, provider::OpenAiProvider};
pub use domain::model::{BusinessModel, Diagnosis};
pub use utils::error::{DiagError, Result};
