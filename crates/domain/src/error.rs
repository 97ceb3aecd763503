//! # ドメイン層エラー定義
//!
//! 請求設定の不備やテンプレートの未解決トークンを表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **リトライなし**: いずれのエラーも回復不能であり、バッチは即座に終了する

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// レンダリングや通知組み立ての実行中に発生する例外状態を表現する。
/// バッチはこのエラーを受け取った時点で処理を中断する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値が期待する形式に合致しない場合に使用する。
    ///
    /// # 例
    ///
    /// - 請求対象年月が `YYYY/MM` 形式でない
    /// - 請求元メールアドレスにドメイン部がない
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 設定フィールドの欠落
    ///
    /// 請求設定に必須フィールドが存在しない、または文字列でない場合に使用する。
    /// テンプレート内のトークン解決とは別系統で、パイプラインや通知組み立てが
    /// 直接参照するフィールドに対してのみ発生する。
    #[error("設定フィールド {field} が存在しないか文字列ではありません")]
    MissingField {
        /// 欠落しているフィールド名
        field: String,
    },

    /// テンプレートの未解決トークン
    ///
    /// 全置換パス完了後もテンプレートに `{識別子}` パターンが残っている場合に
    /// 使用する。設定フィールドの不足、または文字列以外の値しか持たない
    /// フィールドへの参照を意味する。レンダラー唯一の検証ゲート。
    #[error("テンプレートに未解決のトークンが残っています: {}", tokens.join(", "))]
    TemplateIncomplete {
        /// 残存したトークン（`{...}` 込みの原文）
        tokens: Vec<String>,
    },
}
