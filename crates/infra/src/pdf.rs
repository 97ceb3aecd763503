//! # PDF 変換
//!
//! レンダリング済み HTML ドキュメントをヘッドレスブラウザで PDF に変換する。
//!
//! ## 設計方針
//!
//! - **不透明な外部プロセス**: ブラウザバイナリにパスを渡して起動し、
//!   終了を待つだけ。内部動作には関与しない
//! - **終了コードは検証しない**: 異常終了は警告ログに留め、成果物の有無は
//!   後続の添付読み込みで判明させる（パイプラインの方針）
//! - **タイムアウトなし**: サブプロセスの完了まで呼び出し元をブロックする

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::InfraError;

/// HTML → PDF 変換トレイト
///
/// パイプラインテストではモックに差し替える。
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// `html_path` のドキュメントを PDF に変換し `pdf_path` に書き出す
    async fn render_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), InfraError>;
}

/// ヘッドレス Chrome による PDF 変換
///
/// `{chrome_dir}/chrome --headless --print-to-pdf={pdf} {html}` を
/// サブプロセスとして実行する。
pub struct ChromePdfRenderer {
    chrome_dir: PathBuf,
}

impl ChromePdfRenderer {
    /// 新しい変換インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `chrome_dir`: ブラウザバイナリを含むディレクトリ（`CHROME_PATH`）
    pub fn new(chrome_dir: impl Into<PathBuf>) -> Self {
        Self {
            chrome_dir: chrome_dir.into(),
        }
    }

    fn binary_path(&self) -> PathBuf {
        self.chrome_dir.join("chrome")
    }
}

#[async_trait]
impl DocumentRenderer for ChromePdfRenderer {
    async fn render_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), InfraError> {
        let binary = self.binary_path();

        tracing::info!(
            binary = %binary.display(),
            html = %html_path.display(),
            pdf = %pdf_path.display(),
            "外部レンダラーを起動します"
        );

        let status = Command::new(&binary)
            .arg("--headless")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(html_path)
            .status()
            .await
            .map_err(|e| {
                InfraError::renderer(format!(
                    "外部レンダラーの起動に失敗 ({}): {e}",
                    binary.display()
                ))
            })?;

        // 終了コードは検証しない。成果物の有無は後続処理で判明する
        if !status.success() {
            tracing::warn!(status = %status, "外部レンダラーが異常終了しました");
        }

        Ok(())
    }
}
