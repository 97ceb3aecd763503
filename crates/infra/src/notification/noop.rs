//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 動作確認や通知無効化時に使用する。

use async_trait::async_trait;
use seikyu_domain::notification::{DeliveryOutcome, EmailMessage, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
    ) -> Result<DeliveryOutcome, NotificationError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            attachment = %email.attachment.filename,
            "Noop: メール送信をスキップ"
        );
        Ok(DeliveryOutcome::Sent)
    }
}

#[cfg(test)]
mod tests {
    use seikyu_domain::notification::EmailAttachment;

    use super::*;

    #[tokio::test]
    async fn send_emailが送信済みを返す() {
        let sender = NoopNotificationSender;
        let email = EmailMessage {
            from:       "claims@seikyu.example.com".to_string(),
            to:         "billing@acme.example.com".to_string(),
            subject:    "テスト件名".to_string(),
            text_body:  "テスト".to_string(),
            attachment: EmailAttachment {
                filename: "claim.pdf".to_string(),
                content:  vec![1, 2, 3],
            },
        };

        let result = sender.send_email(&email).await;
        assert!(matches!(result, Ok(DeliveryOutcome::Sent)));
    }
}
