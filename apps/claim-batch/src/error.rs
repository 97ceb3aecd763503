//! # バッチエラー定義
//!
//! 各層のエラーをバッチの終了系エラーとして束ねる。
//! いずれも回復不能であり、発生した時点で実行を中断する。

use seikyu_domain::{DomainError, notification::NotificationError};
use seikyu_infra::InfraError;
use thiserror::Error;

/// バッチ実行中に発生するエラー
#[derive(Debug, Error)]
pub enum BatchError {
    /// ドメイン層のエラー（設定不備・未解決トークンなど）
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// インフラ層のエラー（外部レンダラー起動失敗など）
    #[error(transparent)]
    Infra(#[from] InfraError),

    /// 通知送信のエラー
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// 入出力エラー（テンプレート・成果物のファイル操作）
    #[error("入出力エラー: {0}")]
    Io(#[from] std::io::Error),
}
