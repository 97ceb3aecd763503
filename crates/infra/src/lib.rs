//! # Seikyu インフラ層
//!
//! ドメイン層の外側にある外部協力者との境界を実装する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: メール送信（[`notification::NotificationSender`]）と
//!   PDF 変換（[`pdf::DocumentRenderer`]）は trait で抽象化し、
//!   ユースケーステストではモックに差し替える
//! - **外部プロセス・外部サービスは不透明**: ヘッドレスブラウザは
//!   サブプロセスとして、SMTP サーバーはトランスポート経由で呼び出すのみ
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層で発生するエラーの定義
//! - [`notification`] - SMTP / Noop のメール送信実装
//! - [`pdf`] - ヘッドレスブラウザによる HTML → PDF 変換

pub mod error;
pub mod notification;
pub mod pdf;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
