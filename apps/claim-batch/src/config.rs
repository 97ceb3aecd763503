//! # バッチ設定
//!
//! 環境変数から請求書送付バッチの設定を読み込む。
//! 環境への参照をここに集約し、各コンポーネントには値として渡す。

use std::{env, path::PathBuf};

/// 請求書送付バッチの設定
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// ヘッドレスブラウザのバイナリを含むディレクトリ
    pub chrome_dir:    PathBuf,
    /// 成果物（HTML / PDF）の出力先ディレクトリ
    pub output_dir:    PathBuf,
    /// 請求書テンプレートのパス
    pub template_path: PathBuf,
    /// 通知バックエンド
    pub backend:       NotificationBackend,
    /// SMTP 設定
    pub smtp:          SmtpConfig,
}

/// SMTP サーバーの設定
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP サーバーのホスト名
    pub host:     String,
    /// SMTP サーバーのポート番号
    pub port:     u16,
    /// 認証アカウント名（送信元アドレスのローカル部を兼ねる）
    pub user:     String,
    /// 認証パスワード
    pub password: String,
}

/// 通知バックエンド
///
/// `NOTIFICATION_BACKEND` 環境変数で送信方法を切り替える:
/// - `smtp`: SMTP サーバー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationBackend {
    Smtp,
    Noop,
}

impl BatchConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            chrome_dir:    env::var("CHROME_PATH")
                .expect("CHROME_PATH が設定されていません（.env を確認してください）")
                .into(),
            output_dir:    env::var("CLAIM_OUTPUT_DIR")
                .unwrap_or_else(|_| "claims".to_string())
                .into(),
            template_path: env::var("CLAIM_TEMPLATE_PATH")
                .unwrap_or_else(|_| "templates/claim.html".to_string())
                .into(),
            backend:       env::var("NOTIFICATION_BACKEND")
                .unwrap_or_else(|_| "smtp".to_string())
                .parse()
                .expect("NOTIFICATION_BACKEND は smtp または noop である必要があります"),
            smtp:          SmtpConfig::from_env(),
        }
    }
}

impl SmtpConfig {
    /// 環境変数から SMTP 設定を読み込む
    fn from_env() -> Self {
        Self {
            host:     env::var("SMTP_HOST")
                .expect("SMTP_HOST が設定されていません（.env を確認してください）"),
            port:     env::var("SMTP_PORT")
                .expect("SMTP_PORT が設定されていません（.env を確認してください）")
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
            user:     env::var("SMTP_USER")
                .expect("SMTP_USER が設定されていません（.env を確認してください）"),
            password: env::var("SMTP_PASSWORD")
                .expect("SMTP_PASSWORD が設定されていません（.env を確認してください）"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn 通知バックエンドの文字列変換が正しい() {
        assert_eq!(
            "smtp".parse::<NotificationBackend>().unwrap(),
            NotificationBackend::Smtp
        );
        assert_eq!(
            "noop".parse::<NotificationBackend>().unwrap(),
            NotificationBackend::Noop
        );
        assert_eq!(NotificationBackend::Smtp.to_string(), "smtp");
        assert_eq!(NotificationBackend::Noop.to_string(), "noop");
    }

    #[test]
    fn 未知の通知バックエンドはパースに失敗する() {
        assert!("ses".parse::<NotificationBackend>().is_err());
    }
}
