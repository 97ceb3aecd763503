//! # ドキュメントパイプライン
//!
//! テンプレート読み込み → 日付注入 → レンダリング → HTML 保存 →
//! 外部レンダラーで PDF 変換 → 添付用バイト列の読み戻し、を逐次実行する。
//!
//! ## 設計方針
//!
//! - **命名規約**: 成果物は `claim_{請求先短縮名}_{YYYYMM}.html` / `.pdf`
//! - **外部レンダラーの成否は添付読み込みで判明**: 終了コードは検証せず、
//!   出力ファイルが読めなければ入出力エラーになる

use std::{path::PathBuf, sync::Arc};

use seikyu_domain::{
    claim::{ClaimConfig, ClaimPeriod},
    clock::{Clock, format_ymd_jp},
    render,
};
use seikyu_infra::pdf::DocumentRenderer;
use tokio::fs;

use crate::error::BatchError;

/// 生成された請求書成果物
#[derive(Debug)]
pub struct ClaimArtifact {
    /// PDF 成果物のパス
    pub pdf_path:  PathBuf,
    /// PDF 成果物の内容（メール添付用）
    pub pdf_bytes: Vec<u8>,
    /// 請求対象年月
    pub period:    ClaimPeriod,
}

/// ドキュメントパイプライン
///
/// 請求設定からレンダリング済み HTML と PDF 成果物を生成する。
/// 全工程が逐次実行で、外部レンダラーの完了まで呼び出しをブロックする。
pub struct DocumentPipeline<R> {
    renderer:      R,
    template_path: PathBuf,
    output_dir:    PathBuf,
    clock:         Arc<dyn Clock>,
}

impl<R: DocumentRenderer> DocumentPipeline<R> {
    pub fn new(
        renderer: R,
        template_path: PathBuf,
        output_dir: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            renderer,
            template_path,
            output_dir,
            clock,
        }
    }

    /// パイプラインを実行する
    ///
    /// レンダリング前に日付系フィールドを設定へ注入する:
    /// `claim_date_ym` は表示形式（`YYYY年MM月`）へ書き換え、発行日
    /// `today_date_ymd` を追加する。
    pub async fn run(&self, config: &mut ClaimConfig) -> Result<ClaimArtifact, BatchError> {
        // ファイル命名用の年月は表示形式へ書き換える前に確定させる
        let period = ClaimPeriod::parse(config.claim_date_ym()?)?;

        // テンプレートは CR を除去して読み込む
        let template = fs::read_to_string(&self.template_path)
            .await?
            .replace('\r', "");

        config.set_scalar("claim_date_ym", period.label_jp());
        config.set_scalar("today_date_ymd", format_ymd_jp(self.clock.today()));

        let document = render::render(&template, config)?;

        fs::create_dir_all(&self.output_dir).await?;
        let base = format!(
            "claim_{}_{}",
            config.claimee_name_short()?,
            period.file_stamp()
        );
        let html_path = self.output_dir.join(format!("{base}.html"));
        fs::write(&html_path, &document).await?;
        tracing::info!(path = %html_path.display(), "請求書 HTML を書き出しました");

        let pdf_path = self.output_dir.join(format!("{base}.pdf"));
        self.renderer.render_pdf(&html_path, &pdf_path).await?;

        // 外部レンダラーの成否はここで初めて判明する
        let pdf_bytes = fs::read(&pdf_path).await?;
        tracing::info!(
            path = %pdf_path.display(),
            size = pdf_bytes.len(),
            "請求書 PDF を取得しました"
        );

        Ok(ClaimArtifact {
            pdf_path,
            pdf_bytes,
            period,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use seikyu_domain::clock::FixedClock;
    use seikyu_infra::mock::MockDocumentRenderer;
    use tempfile::TempDir;

    use super::*;

    const TEMPLATE: &str = "\
<p>{claimee_name_long} 御中</p>\
<p>発行日: {today_date_ymd}</p>\
<p>{claim_date_ym}分</p>\
<table>{details}</table>\
<p>合計: {sum} 円</p>\
<p>{hash}</p>";

    fn make_config() -> ClaimConfig {
        ClaimConfig::from_json_str(
            r#"{
                "claim_date_ym": "2024/01",
                "claimee_name_short": "ACME",
                "claimee_name_long": "ACME 株式会社",
                "details": [{"name": "サーバー利用料", "unit": 100, "qty": 2}]
            }"#,
        )
        .unwrap()
    }

    fn make_pipeline(dir: &TempDir, renderer: MockDocumentRenderer) -> DocumentPipeline<MockDocumentRenderer> {
        let template_path = dir.path().join("claim.html");
        std::fs::write(&template_path, TEMPLATE).unwrap();
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        DocumentPipeline::new(
            renderer,
            template_path,
            dir.path().join("claims"),
            Arc::new(clock),
        )
    }

    #[tokio::test]
    async fn 成果物が命名規約どおりに生成される() {
        let dir = TempDir::new().unwrap();
        let renderer = MockDocumentRenderer::new(b"%PDF-1.7".to_vec());
        let pipeline = make_pipeline(&dir, renderer.clone());

        let mut config = make_config();
        let artifact = pipeline.run(&mut config).await.unwrap();

        let html_path = dir.path().join("claims/claim_ACME_202401.html");
        let pdf_path = dir.path().join("claims/claim_ACME_202401.pdf");
        assert!(html_path.exists());
        assert_eq!(artifact.pdf_path, pdf_path);
        assert_eq!(artifact.pdf_bytes, b"%PDF-1.7");
        assert_eq!(renderer.calls(), vec![(html_path, pdf_path)]);
    }

    #[tokio::test]
    async fn 日付フィールドが注入されてレンダリングされる() {
        let dir = TempDir::new().unwrap();
        let pipeline = make_pipeline(&dir, MockDocumentRenderer::new(b"%PDF".to_vec()));

        let mut config = make_config();
        pipeline.run(&mut config).await.unwrap();

        let html =
            std::fs::read_to_string(dir.path().join("claims/claim_ACME_202401.html")).unwrap();
        assert!(html.contains("2024年01月分"));
        assert!(html.contains("発行日: 2024年02月01日"));
        assert!(html.contains("ACME 株式会社 御中"));
        assert!(html.contains("合計: 200 円"));
    }

    #[tokio::test]
    async fn 未解決トークンがあるとパイプラインは失敗する() {
        let dir = TempDir::new().unwrap();
        let template_path = dir.path().join("claim.html");
        std::fs::write(&template_path, "{unknown_field}{hash}").unwrap();
        let pipeline = DocumentPipeline::new(
            MockDocumentRenderer::new(Vec::new()),
            template_path,
            dir.path().join("claims"),
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())),
        );

        let mut config = make_config();
        let result = pipeline.run(&mut config).await;

        assert!(matches!(
            result,
            Err(BatchError::Domain(
                seikyu_domain::DomainError::TemplateIncomplete { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn テンプレートがない場合は入出力エラーになる() {
        let dir = TempDir::new().unwrap();
        let pipeline = DocumentPipeline::new(
            MockDocumentRenderer::new(Vec::new()),
            dir.path().join("存在しないテンプレート.html"),
            dir.path().join("claims"),
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())),
        );

        let mut config = make_config();
        let result = pipeline.run(&mut config).await;

        assert!(matches!(result, Err(BatchError::Io(_))));
    }
}
