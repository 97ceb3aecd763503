//! # 通知送信
//!
//! 請求書メールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（本番）、Noop（動作確認・通知無効化時）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **型付き配送結果**: 認証拒否は `DeliveryOutcome::AuthRejected` として
//!   返し、継続判断は呼び出し元に委ねる

mod noop;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
use seikyu_domain::notification::{DeliveryOutcome, EmailMessage, NotificationError};
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
/// SMTP / Noop の 2 実装を環境変数で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信し、配送結果を返す
    async fn send_email(
        &self,
        email: &EmailMessage,
    ) -> Result<DeliveryOutcome, NotificationError>;
}
