//! # テスト用モック実装
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! seikyu-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use seikyu_domain::notification::{DeliveryOutcome, EmailMessage, NotificationError};

use crate::{error::InfraError, notification::NotificationSender, pdf::DocumentRenderer};

// ===== MockNotificationSender =====

/// テスト用のモック送信器
///
/// 送信されたメッセージを記録し、コンストラクタで指定した配送結果を返す。
#[derive(Clone)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    outcome: DeliveryOutcome,
}

impl MockNotificationSender {
    /// 常に `Sent` を返す送信器を作成
    pub fn new() -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            outcome: DeliveryOutcome::Sent,
        }
    }

    /// 常に `AuthRejected` を返す送信器を作成
    pub fn rejecting() -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            outcome: DeliveryOutcome::AuthRejected,
        }
    }

    /// 記録された送信メッセージを返す
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
    ) -> Result<DeliveryOutcome, NotificationError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(self.outcome)
    }
}

// ===== MockDocumentRenderer =====

/// テスト用のモック PDF 変換器
///
/// 実際のブラウザを起動せず、固定バイト列を出力パスに書き出す。
/// 呼び出し時のパスの組を記録する。
#[derive(Clone)]
pub struct MockDocumentRenderer {
    content: Vec<u8>,
    calls:   Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
}

impl MockDocumentRenderer {
    /// 指定したバイト列を PDF として書き出す変換器を作成
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            calls:   Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 記録された呼び出し（HTML パス, PDF パス）を返す
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRenderer for MockDocumentRenderer {
    async fn render_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), InfraError> {
        tokio::fs::write(pdf_path, &self.content).await?;
        self.calls
            .lock()
            .unwrap()
            .push((html_path.to_path_buf(), pdf_path.to_path_buf()));
        Ok(())
    }
}
