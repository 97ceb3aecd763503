//! # 通知
//!
//! 請求書送付メールに関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 役割 |
//! |---|------------|------|
//! | [`ClaimNotification`] | 請求通知 | 件名・本文・宛先の導出元 |
//! | [`EmailMessage`] | メールメッセージ | 送信器に渡される完成形 |
//! | [`EmailAttachment`] | 添付ファイル | 請求書 PDF（1 通につき 1 件） |
//! | [`DeliveryOutcome`] | 配送結果 | 送信済み / 認証拒否の型付き結果 |
//!
//! ## 設計方針
//!
//! - **本文は固定文面**: 日本語ビジネスレターの literal に宛名・差出人・
//!   請求対象年月・署名を補間するのみ。条件分岐なし
//! - **型付き配送結果**: 認証失敗はエラーではなく [`DeliveryOutcome`] で
//!   呼び出し元へ返し、継続か中断かはオーケストレーターが決める

use thiserror::Error;

use crate::DomainError;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// 配送結果
///
/// 送信器が同期的に判定できる結果のみを表す。リトライや配送確認は行わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// トランスポートが受理した
    Sent,
    /// サーバーが恒久的に拒否した（認証・資格情報の失敗）
    ///
    /// 呼び出し元はログに記録して処理を継続するのが既定の方針。
    AuthRejected,
}

/// 添付ファイル
///
/// メッセージは必ずちょうど 1 件の添付を持つ。ファイル名は生成した
/// 成果物のベース名から導出される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    /// 添付ファイル名（例: `claim_ACME_202401.pdf`）
    pub filename: String,
    /// 添付ファイルの内容
    pub content:  Vec<u8>,
}

/// メールメッセージ
///
/// 通知組み立ての出力。プレーンテキスト本文 1 つと添付 1 件のみを持ち、
/// 組み立て後は不変。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信元メールアドレス
    pub from:       String,
    /// 送信先メールアドレス
    pub to:         String,
    /// 件名
    pub subject:    String,
    /// プレーンテキスト本文
    pub text_body:  String,
    /// 添付ファイル（請求書 PDF）
    pub attachment: EmailAttachment,
}

/// 請求通知
///
/// 請求設定とレンダリング結果のメタデータから件名・本文を導出する。
#[derive(Debug, Clone)]
pub struct ClaimNotification {
    /// 請求対象年月の表示形式（例: `2024年01月`）
    pub period_label:       String,
    /// 請求先の短縮名（宛名に使用）
    pub claimee_name_short: String,
    /// 請求元の短縮名（差出人表示に使用）
    pub claimer_name_short: String,
    /// 請求先メールアドレス
    pub claimee_email:      String,
    /// メール署名ブロック
    pub signature:          String,
}

impl ClaimNotification {
    /// 件名を返す
    pub fn subject(&self) -> String {
        format!("請求書送付（{}分）", self.period_label)
    }

    /// 宛名の表示名を返す
    fn addressee_display_name(&self) -> String {
        format!("{}\n財務ご担当者様", self.claimee_name_short)
    }

    /// 固定文面のメール本文を返す
    pub fn email_body(&self) -> String {
        format!(
            "
{addressee}

いつもお世話になっております。
{addresser}でございます。

平素より弊サービスをご利用くださり誠にありがとうございます。
{period}分の請求額が確定いたしましたので、請求書を送付させていただきます。
ご確認および期日までのお支払いをお願いいたします。

今後とも弊サービスをよろしくお願いいたします。

--------------------------------------------------
本メールはシステムより自動送信されています。
また、本アドレスは送信専用のため、ご返信いただきましても確認できません。
ご用の場合は以下にご連絡をいただけますと幸いです。

{signature}
",
            addressee = self.addressee_display_name(),
            addresser = self.claimer_name_short,
            period = self.period_label,
            signature = self.signature,
        )
        .trim()
        .to_string()
    }

    /// メールメッセージを組み立てる
    pub fn compose(&self, from_address: String, attachment: EmailAttachment) -> EmailMessage {
        EmailMessage {
            from: from_address,
            to: self.claimee_email.clone(),
            subject: self.subject(),
            text_body: self.email_body(),
            attachment,
        }
    }
}

/// 送信元メールアドレスを導出する
///
/// ローカル部は SMTP アカウント名、ドメイン部は請求元メールアドレスの
/// `@` 以降を使用する。
///
/// # エラー
///
/// 請求元メールアドレスに `@` とドメイン部がない場合は
/// `DomainError::Validation` を返す。
pub fn sender_address(smtp_user: &str, claimer_email: &str) -> Result<String, DomainError> {
    let domain = claimer_email
        .split('@')
        .nth(1)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "請求元メールアドレスにドメイン部がありません: {claimer_email}"
            ))
        })?;
    Ok(format!("{smtp_user}@{domain}"))
}
