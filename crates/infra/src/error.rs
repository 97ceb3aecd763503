//! # インフラ層エラー定義
//!
//! ファイル入出力や外部プロセスとの連携で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `std::io::Error` をラップし、ドメインエラーと分離
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Io, Renderer 等）

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// `From<std::io::Error>` の変換や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
///
/// ファイル操作や外部プロセス起動で発生するエラーの具体的な種別。
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 入出力エラー
    ///
    /// テンプレート・ドキュメント・成果物のファイル操作の失敗。
    #[error("入出力エラー: {0}")]
    Io(#[source] std::io::Error),

    /// 外部レンダラーエラー
    ///
    /// ヘッドレスブラウザの起動に失敗した場合。
    /// 起動後の終了コードはエラーにしない（パイプラインの方針）。
    #[error("外部レンダラーエラー: {0}")]
    Renderer(String),

    /// 予期しないエラー
    ///
    /// 上記に分類できない予期しないエラー。
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    // ===== Convenience constructors =====

    /// 外部レンダラーエラーを生成する
    pub fn renderer(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Renderer(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<std::io::Error> for InfraError {
    fn from(source: std::io::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Io(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_from_io_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_pipeline", claimee = "ACME");
            let _enter = span.enter();

            let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "テンプレートなし");
            let err: InfraError = io_err.into();

            assert!(matches!(err.kind(), InfraErrorKind::Io(_)));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_pipeline"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_rendererでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_render_pdf");
            let _enter = span.enter();

            let err = InfraError::renderer("起動失敗");

            assert!(matches!(err.kind(), InfraErrorKind::Renderer(msg) if msg == "起動失敗"));
            let trace_str = format!("{}", err.span_trace());
            assert!(trace_str.contains("test_render_pdf"));
        });
    }

    #[test]
    fn test_unexpectedでエラーを生成できる() {
        with_error_layer(|| {
            let err = InfraError::unexpected("想定外");
            assert!(matches!(err.kind(), InfraErrorKind::Unexpected(msg) if msg == "想定外"));
        });
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::renderer("chrome が見つかりません");
        assert_eq!(
            format!("{err}"),
            "外部レンダラーエラー: chrome が見つかりません"
        );
    }

    #[test]
    fn test_sourceがinfra_error_kindに委譲する() {
        use std::error::Error;

        let io_err = std::io::Error::other("下位エラー");
        let err: InfraError = io_err.into();

        // Io variant は std::io::Error を source として持つ
        assert!(err.source().is_some());
    }
}
