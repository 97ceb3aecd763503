//! # 請求書送付バッチ
//!
//! 月次請求書を生成して請求先へメール送付する単発バッチ。
//!
//! ## 処理の流れ
//!
//! 逐次実行の 1 本道で、並行処理や再試行は行わない:
//!
//! ```text
//! 請求設定読み込み → テンプレートレンダリング → HTML 保存
//!     → 外部レンダラーで PDF 変換 → メール組み立て → SMTP 送信
//! ```
//!
//! 実行ごとに独立しており、書き出すファイル以外に実行間で持ち越す状態はない。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SMTP_HOST` | **Yes** | SMTP サーバーのホスト名 |
//! | `SMTP_PORT` | **Yes** | SMTP サーバーのポート番号 |
//! | `SMTP_USER` | **Yes** | 認証アカウント名（送信元アドレスのローカル部） |
//! | `SMTP_PASSWORD` | **Yes** | 認証パスワード |
//! | `CHROME_PATH` | **Yes** | ヘッドレスブラウザのバイナリを含むディレクトリ |
//! | `CLAIM_OUTPUT_DIR` | No | 成果物の出力先（デフォルト: `claims`） |
//! | `CLAIM_TEMPLATE_PATH` | No | テンプレートのパス（デフォルト: `templates/claim.html`） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` \| `noop`（デフォルト: `smtp`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p seikyu-claim-batch -- path/to/claim.json
//! ```

mod config;
mod error;
mod usecase;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use config::{BatchConfig, NotificationBackend};
use seikyu_domain::{claim::ClaimConfig, clock::SystemClock};
use seikyu_infra::{
    notification::{NoopNotificationSender, NotificationSender, SmtpNotificationSender},
    pdf::ChromePdfRenderer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usecase::{ClaimNotifier, DocumentPipeline};

/// コマンドライン引数
#[derive(Debug, Parser)]
#[command(name = "claim-batch", about = "月次請求書を生成して送付するバッチ")]
struct Args {
    /// 請求設定 JSON ファイルのパス
    config: PathBuf,
}

/// 請求書送付バッチのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seikyu=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let batch_config = BatchConfig::from_env();

    // 請求設定読み込み
    let raw = tokio::fs::read_to_string(&args.config).await?;
    let mut claim_config = ClaimConfig::from_json_str(&raw)?;
    tracing::info!(config = %args.config.display(), "請求設定を読み込みました");

    // ドキュメントパイプライン: レンダリング → HTML 保存 → PDF 変換
    let pipeline = DocumentPipeline::new(
        ChromePdfRenderer::new(&batch_config.chrome_dir),
        batch_config.template_path.clone(),
        batch_config.output_dir.clone(),
        Arc::new(SystemClock),
    );
    let artifact = pipeline.run(&mut claim_config).await?;

    // 通知: メッセージ組み立て → 送信
    let sender: Arc<dyn NotificationSender> = match batch_config.backend {
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &batch_config.smtp.host,
            batch_config.smtp.port,
            &batch_config.smtp.user,
            &batch_config.smtp.password,
        )?),
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    };
    let notifier = ClaimNotifier::new(sender, batch_config.smtp.user.clone());
    notifier.notify(&claim_config, &artifact).await?;

    Ok(())
}
