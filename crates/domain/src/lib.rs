//! # Seikyu ドメイン層
//!
//! 月次請求書バッチのビジネスロジックを定義する。
//!
//! ## 設計方針
//!
//! このクレートは I/O を一切持たない純粋なドメインロジックのみを提供する:
//!
//! - **請求設定モデル**: JSON 設定のフィールドマッピングと明細行（[`claim`]）
//! - **テンプレートレンダラー**: トークン置換・明細表生成・改ざん検知トレーラー（[`render`]）
//! - **通知組み立て**: メール本文・件名・送信元アドレスの導出（[`notification`]）
//! - **ドメインエラー**: 不正入力や未解決トークンを表現するエラー型（[`error`]）
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps/claim-batch → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（SMTP、外部レンダラー、ファイルシステム）に
//! 一切依存しない。レンダリングと通知組み立ては入力のみから決定される。
//!
//! ## モジュール構成
//!
//! - [`claim`] - 請求設定・明細行・請求対象年月の値オブジェクト
//! - [`clock`] - テスト可能な日付プロバイダ
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`notification`] - メールメッセージと請求通知の組み立て
//! - [`render`] - 請求書テンプレートのレンダリング

pub mod claim;
pub mod clock;
pub mod error;
pub mod notification;
pub mod render;

pub use error::DomainError;
