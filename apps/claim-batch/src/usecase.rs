//! # ユースケース層
//!
//! バッチの 2 つの工程を実装する:
//!
//! - [`DocumentPipeline`] - 請求書のレンダリングと成果物生成
//! - [`ClaimNotifier`] - 請求書メールの組み立てと送信

mod notification;
mod pipeline;

pub use notification::ClaimNotifier;
pub use pipeline::{ClaimArtifact, DocumentPipeline};
