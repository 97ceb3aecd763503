//! # 請求通知ユースケース
//!
//! 請求設定と生成済み成果物からメールを組み立てて送信する。
//!
//! ## 設計方針
//!
//! - **型付き配送結果のハンドリング**: 送信器が返す
//!   [`DeliveryOutcome::AuthRejected`] は警告ログに記録して正常終了する
//!   （配送失敗でバッチを落とさない運用方針）。成否は戻り値で判別できる

use std::sync::Arc;

use seikyu_domain::{
    claim::ClaimConfig,
    notification::{ClaimNotification, DeliveryOutcome, EmailAttachment, sender_address},
};
use seikyu_infra::notification::NotificationSender;

use super::pipeline::ClaimArtifact;
use crate::error::BatchError;

/// 請求通知ユースケース
///
/// メッセージ組み立て → 送信 → 結果ハンドリングを統合する。
pub struct ClaimNotifier {
    sender:    Arc<dyn NotificationSender>,
    smtp_user: String,
}

impl ClaimNotifier {
    pub fn new(sender: Arc<dyn NotificationSender>, smtp_user: String) -> Self {
        Self { sender, smtp_user }
    }

    /// 請求書メールを組み立てて送信する
    ///
    /// 添付ファイル名は成果物のベース名から導出する。
    /// 認証拒否は警告ログに記録して `Ok(AuthRejected)` を返す。
    pub async fn notify(
        &self,
        config: &ClaimConfig,
        artifact: &ClaimArtifact,
    ) -> Result<DeliveryOutcome, BatchError> {
        let notification = ClaimNotification {
            period_label:       artifact.period.label_jp(),
            claimee_name_short: config.claimee_name_short()?.to_string(),
            claimer_name_short: config.claimer_name_short()?.to_string(),
            claimee_email:      config.claimee_email()?.to_string(),
            signature:          config.signature()?.to_string(),
        };
        let from = sender_address(&self.smtp_user, config.claimer_email()?)?;

        let filename = artifact
            .pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "claim.pdf".to_string());

        let message = notification.compose(
            from,
            EmailAttachment {
                filename,
                content: artifact.pdf_bytes.clone(),
            },
        );

        let outcome = self.sender.send_email(&message).await?;
        match outcome {
            DeliveryOutcome::Sent => {
                tracing::info!(
                    to = %message.to,
                    subject = %message.subject,
                    "請求書メールを送信しました"
                );
            }
            DeliveryOutcome::AuthRejected => {
                tracing::warn!(
                    to = %message.to,
                    "メールサーバーへのログインに失敗したため送信を断念しました"
                );
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use seikyu_domain::claim::ClaimPeriod;
    use seikyu_infra::mock::MockNotificationSender;

    use super::*;

    fn make_config() -> ClaimConfig {
        ClaimConfig::from_json_str(
            r#"{
                "claim_date_ym": "2024/01",
                "claimee_name_short": "ACME",
                "claimee_name_long": "ACME 株式会社",
                "claimee_email": "billing@acme.example.com",
                "claimer_name_short": "Seikyu",
                "claimer_email": "info@seikyu.example.com",
                "signature": "Seikyu サポート窓口"
            }"#,
        )
        .unwrap()
    }

    fn make_artifact() -> ClaimArtifact {
        ClaimArtifact {
            pdf_path:  "claims/claim_ACME_202401.pdf".into(),
            pdf_bytes: vec![0x25, 0x50, 0x44, 0x46],
            period:    ClaimPeriod::parse("2024/01").unwrap(),
        }
    }

    #[tokio::test]
    async fn 請求書メールが組み立てられて送信される() {
        let sender = MockNotificationSender::new();
        let notifier = ClaimNotifier::new(Arc::new(sender.clone()), "claims".to_string());

        let outcome = notifier
            .notify(&make_config(), &make_artifact())
            .await
            .unwrap();

        assert_eq!(outcome, DeliveryOutcome::Sent);
        let sent = sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "claims@seikyu.example.com");
        assert_eq!(sent[0].to, "billing@acme.example.com");
        assert_eq!(sent[0].subject, "請求書送付（2024年01月分）");
        assert_eq!(sent[0].attachment.filename, "claim_ACME_202401.pdf");
        assert_eq!(sent[0].attachment.content, vec![0x25, 0x50, 0x44, 0x46]);
        assert!(sent[0].text_body.contains("ACME\n財務ご担当者様"));
        assert!(sent[0].text_body.ends_with("Seikyu サポート窓口"));
    }

    #[tokio::test]
    async fn 認証拒否でもエラーにならず結果で判別できる() {
        let sender = MockNotificationSender::rejecting();
        let notifier = ClaimNotifier::new(Arc::new(sender.clone()), "claims".to_string());

        let outcome = notifier
            .notify(&make_config(), &make_artifact())
            .await
            .unwrap();

        assert_eq!(outcome, DeliveryOutcome::AuthRejected);
        // 送信は試みられている（1 回だけ）
        assert_eq!(sender.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn 必須フィールドがないと組み立てに失敗する() {
        let config = ClaimConfig::from_json_str(r#"{"claim_date_ym": "2024/01"}"#).unwrap();
        let notifier =
            ClaimNotifier::new(Arc::new(MockNotificationSender::new()), "claims".to_string());

        let result = notifier.notify(&config, &make_artifact()).await;
        assert!(result.is_err());
    }
}
