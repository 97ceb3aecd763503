//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! STARTTLS で暗号化チャネルへ昇格したうえで 1 回だけ認証を試みる。

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Attachment, Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use seikyu_domain::notification::{DeliveryOutcome, EmailMessage, NotificationError};

use super::NotificationSender;

/// 接続タイムアウト。送信操作自体にはタイムアウトを設けない
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// STARTTLS（rustls）+ 資格情報認証で送信する。リトライは行わない。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名
    /// - `port`: SMTP サーバーのポート番号（例: 587）
    /// - `user`: 認証アカウント名
    /// - `password`: 認証パスワード
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        password: &str,
    ) -> Result<Self, NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| {
                NotificationError::SendFailed(format!("SMTP トランスポート構築失敗: {e}"))
            })?
            .port(port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .timeout(Some(CONNECT_TIMEOUT))
            .build();

        Ok(Self { transport })
    }

    /// ドメインの `EmailMessage` を lettre のメッセージに変換する
    ///
    /// プレーンテキスト本文 1 つと PDF 添付 1 件の multipart/mixed を構築する。
    fn build_message(email: &EmailMessage) -> Result<Message, NotificationError> {
        let from: Mailbox = email.from.parse().map_err(|e| {
            NotificationError::SendFailed(format!("送信元アドレス不正 ({}): {e}", email.from))
        })?;
        let to: Mailbox = email.to.parse().map_err(|e| {
            NotificationError::SendFailed(format!("宛先アドレス不正 ({}): {e}", email.to))
        })?;

        let pdf_content_type = ContentType::parse("application/pdf")
            .map_err(|e| NotificationError::SendFailed(format!("添付の種別が不正: {e}")))?;
        let attachment = Attachment::new(email.attachment.filename.clone())
            .body(email.attachment.content.clone(), pdf_content_type);

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(attachment),
            )
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
    ) -> Result<DeliveryOutcome, NotificationError> {
        let message = Self::build_message(email)?;

        match self.transport.send(message).await {
            Ok(_) => Ok(DeliveryOutcome::Sent),
            // 恒久的拒否（5xx。典型的には認証・資格情報の失敗）は
            // 型付き結果として返し、継続判断は呼び出し元に委ねる
            Err(e) if e.is_permanent() => {
                tracing::warn!(error = %e, "SMTP サーバーが送信を拒否しました");
                Ok(DeliveryOutcome::AuthRejected)
            }
            Err(e) => Err(NotificationError::SendFailed(format!("SMTP 送信失敗: {e}"))),
        }
    }
}
