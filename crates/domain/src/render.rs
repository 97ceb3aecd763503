//! # 請求書テンプレートレンダラー
//!
//! `{トークン}` プレースホルダを含む HTML テンプレートと請求設定から
//! 最終ドキュメント文字列を生成する。
//!
//! ## 設計方針
//!
//! - **フィールド種別ごとの固定パス順**: スカラー置換 → 明細表生成 →
//!   改ざん検知トレーラー → 完全性ゲート。設定のキー順に依存しない
//! - **文字列スカラーのみ置換**: 数値・真偽値などのスカラーは置換しない。
//!   該当トークンはゲートで検出される
//! - **唯一の検証ゲート**: 置換後に `{識別子}` パターンが残っていれば
//!   [`DomainError::TemplateIncomplete`]。事前のキー照合は行わない
//!
//! ## 改ざん検知トレーラー
//!
//! `{hash}` トークンは 2 つの SHA-512 ダイジェスト
//! （請求先正式名称のダイジェスト + トレーラー挿入前ドキュメント全体の
//! ダイジェスト）に置換される。受領者は本文からダイジェストを再計算する
//! ことで、生成後の改変を検出できる。

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha512};

use crate::{
    DomainError,
    claim::{ClaimConfig, DETAILS_KEY, LineItem},
};

/// 残存トークン検出パターン（英数字とアンダースコアのみ。空トークンも対象）
static RESIDUAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[a-zA-Z0-9_]*\}").expect("固定パターンのため常に有効")
});

/// テンプレートをレンダリングして最終ドキュメントを生成する
///
/// # 置換パス
///
/// 1. `details` 以外の文字列フィールドを `{キー}` トークンに置換
///    （値は CR 除去・LF → `<br/>` に正規化）
/// 2. `details` の明細行から表の行断片と合計を生成し、`{details}` と
///    `{sum}` に置換
/// 3. `{hash}` を改ざん検知トレーラーに置換（この時点のドキュメントを
///    ダイジェスト対象とするため、トレーラー自身は対象外）
/// 4. 残存トークンを走査し、あれば失敗
///
/// # エラー
///
/// - 設定フィールドの不足・型不一致によりトークンが残存した場合は
///   `DomainError::TemplateIncomplete`
/// - `claimee_name_long` がない場合は `DomainError::MissingField`
/// - `details` の内容が不正な場合は `DomainError::Validation`
pub fn render(template: &str, config: &ClaimConfig) -> Result<String, DomainError> {
    let mut doc = template.to_string();

    // スカラーパス: 文字列フィールドのみ。details は明細パスで扱う
    for (key, value) in config.entries() {
        if key == DETAILS_KEY {
            continue;
        }
        if let Some(text) = value.as_str() {
            doc = doc.replace(&format!("{{{key}}}"), &normalize_scalar(text));
        }
    }

    // 明細パス: 入力順に行断片を連結し、合計を同順で累積する
    if let Some(items) = config.details()? {
        let (rows, total) = render_details(&items);
        doc = doc.replace("{details}", &rows);
        doc = doc.replace("{sum}", &format_thousands(total));
    }

    // 改ざん検知トレーラー: 同一性フィールドのダイジェストと、
    // この時点（トレーラー挿入前）のドキュメント全体のダイジェスト
    let identity_digest = sha512_hex(config.claimee_name_long()?.as_bytes());
    let document_digest = sha512_hex(doc.as_bytes());
    doc = doc.replace("{hash}", &format!("{identity_digest}<br/>{document_digest}"));

    // 完全性ゲート: 残存トークンの走査がレンダラー唯一の検証
    let tokens: Vec<String> = RESIDUAL_TOKEN
        .find_iter(&doc)
        .map(|m| m.as_str().to_string())
        .collect();
    if !tokens.is_empty() {
        return Err(DomainError::TemplateIncomplete { tokens });
    }

    Ok(doc)
}

/// スカラー値を HTML 向けに正規化する（CR 除去、LF → `<br/>`）
fn normalize_scalar(value: &str) -> String {
    value.replace('\r', "").replace('\n', "<br/>")
}

/// 明細行から表の行断片と合計金額を生成する
///
/// 行は入力順に連結し、合計も同順で累積する。
fn render_details(items: &[LineItem]) -> (String, i64) {
    let mut rows = String::new();
    let mut total = 0;
    for item in items {
        let amount = item.amount();
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            item.name,
            format_thousands(item.unit),
            format_thousands(item.qty),
            format_thousands(amount),
        ));
        total += amount;
    }
    (rows, total)
}

/// 整数を 3 桁区切りで書式化する
///
/// 明細の単価・数量・金額および合計の表示に使用する。
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// SHA-512 ダイジェストを 16 進文字列で返す
fn sha512_hex(data: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
