//! # 請求設定モデル
//!
//! 請求書 1 通分の設定（JSON）をドメイン型として表現する。
//!
//! ## 設計方針
//!
//! - **順序保持マッピング**: 設定はフィールド名 → 値の順序付きマッピング。
//!   大半は文字列スカラーで、`details` のみが明細行の配列
//! - **Newtype パターン**: [`ClaimPeriod`] は `YYYY/MM` 文字列をラップし、
//!   ファイル名用・表示用の 2 形式への変換を型に閉じ込める
//! - **寛容な数値解釈**: 明細行の `unit` / `qty` は JSON 数値のほか
//!   数字文字列も受け付ける

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::DomainError;

/// 明細行の配列を保持するフィールド名
pub const DETAILS_KEY: &str = "details";

// =========================================================================
// ClaimPeriod（請求対象年月）
// =========================================================================

/// 請求対象年月（値オブジェクト）
///
/// 設定の `claim_date_ym` フィールド（`YYYY/MM` 形式）から生成する。
/// ファイル命名用の `YYYYMM` と表示用の `YYYY年MM月` の 2 形式を提供する。
///
/// # 不変条件
///
/// - 実在する年月のみ（`2024/13` などは拒否）
///
/// # 使用例
///
/// ```rust
/// use seikyu_domain::claim::ClaimPeriod;
///
/// let period = ClaimPeriod::parse("2024/01").unwrap();
/// assert_eq!(period.file_stamp(), "202401");
/// assert_eq!(period.label_jp(), "2024年01月");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimPeriod {
    first_day: NaiveDate,
}

impl ClaimPeriod {
    /// `YYYY/MM` 形式の文字列から請求対象年月を生成する
    ///
    /// # エラー
    ///
    /// 形式不正または実在しない年月の場合は `DomainError::Validation` を返す。
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let first_day = NaiveDate::parse_from_str(&format!("{value}/01"), "%Y/%m/%d")
            .map_err(|_| {
                DomainError::Validation(format!(
                    "請求対象年月は YYYY/MM 形式である必要があります: {value}"
                ))
            })?;
        Ok(Self { first_day })
    }

    /// ファイル命名用の `YYYYMM` 形式を返す
    pub fn file_stamp(&self) -> String {
        self.first_day.format("%Y%m").to_string()
    }

    /// 表示用の `YYYY年MM月` 形式を返す
    ///
    /// 請求書本体・メール件名・メール本文で使用する。
    pub fn label_jp(&self) -> String {
        self.first_day.format("%Y年%m月").to_string()
    }
}

// =========================================================================
// LineItem（明細行）
// =========================================================================

/// 請求明細行
///
/// `details` 配列の 1 要素。単価 × 数量で金額を導出する。
/// 設定から都度構築される読み取り専用の値で、レンダリング間で共有されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// 品目名
    pub name: String,
    /// 単価
    pub unit: i64,
    /// 数量
    pub qty:  i64,
}

impl LineItem {
    /// 金額（単価 × 数量）を返す
    pub fn amount(&self) -> i64 {
        self.unit * self.qty
    }

    /// JSON 値から明細行を構築する
    ///
    /// `unit` / `qty` は JSON 数値のほか数字文字列（`"100"`）も受け付ける。
    ///
    /// # エラー
    ///
    /// オブジェクトでない、`name` がない、数値が解釈できない場合は
    /// `DomainError::Validation` を返す。
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        let item = value.as_object().ok_or_else(|| {
            DomainError::Validation(format!("明細行はオブジェクトである必要があります: {value}"))
        })?;

        let name = item
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::Validation("明細行に name がありません".to_string()))?
            .to_string();
        let unit = coerce_int(item.get("unit"))
            .ok_or_else(|| DomainError::Validation(format!("明細行 {name} の unit が不正です")))?;
        let qty = coerce_int(item.get("qty"))
            .ok_or_else(|| DomainError::Validation(format!("明細行 {name} の qty が不正です")))?;

        Ok(Self { name, unit, qty })
    }
}

/// JSON 値を整数として解釈する
///
/// 数値（小数は切り捨て）と数字文字列の両方を受け付ける。
fn coerce_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// =========================================================================
// ClaimConfig（請求設定）
// =========================================================================

/// 請求設定
///
/// JSON 設定ファイルをパースした順序付きマッピング。大半のフィールドは
/// 文字列スカラーで、`details` のみが明細行の配列。
///
/// テンプレート内のトークンがどのフィールドを参照するかは事前検証しない
/// （レンダラーの残存トークンゲートが唯一の検証）。このため取得系メソッドは
/// パイプラインと通知組み立てが直接参照するフィールドに限って提供する。
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ClaimConfig(Map<String, Value>);

impl ClaimConfig {
    /// JSON 文字列から請求設定をパースする
    ///
    /// # エラー
    ///
    /// JSON として不正、またはトップレベルがオブジェクトでない場合は
    /// `DomainError::Validation` を返す。
    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::Validation(format!("請求設定 JSON の解析に失敗: {e}")))
    }

    /// 全フィールドを設定順に走査する
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// 文字列フィールドを取得する（存在しない・文字列でない場合は None）
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// 必須の文字列フィールドを取得する
    ///
    /// # エラー
    ///
    /// 存在しない・文字列でない場合は `DomainError::MissingField` を返す。
    pub fn require_str(&self, key: &str) -> Result<&str, DomainError> {
        self.get_str(key).ok_or_else(|| DomainError::MissingField {
            field: key.to_string(),
        })
    }

    /// 文字列スカラーを挿入（既存なら上書き）する
    ///
    /// パイプラインがレンダリング前に `today_date_ymd` の注入と
    /// `claim_date_ym` の表示形式への書き換えに使用する。
    pub fn set_scalar(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), Value::String(value.into()));
    }

    /// 明細行を構築して返す
    ///
    /// `details` フィールドが存在しない場合は `None`（トークンが未解決なら
    /// レンダラーのゲートが検出する）。
    ///
    /// # エラー
    ///
    /// `details` が配列でない、または要素が明細行として不正な場合は
    /// `DomainError::Validation` を返す。
    pub fn details(&self) -> Result<Option<Vec<LineItem>>, DomainError> {
        let Some(value) = self.0.get(DETAILS_KEY) else {
            return Ok(None);
        };
        let array = value.as_array().ok_or_else(|| {
            DomainError::Validation("details は配列である必要があります".to_string())
        })?;
        let items = array
            .iter()
            .map(LineItem::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(items))
    }

    // ===== パイプライン・通知が直接参照するフィールド =====

    /// 請求対象年月（原文。パイプライン実行後は表示形式に書き換わる）
    pub fn claim_date_ym(&self) -> Result<&str, DomainError> {
        self.require_str("claim_date_ym")
    }

    /// 請求先の短縮名（ファイル命名・メール宛名に使用）
    pub fn claimee_name_short(&self) -> Result<&str, DomainError> {
        self.require_str("claimee_name_short")
    }

    /// 請求先の正式名称（改ざん検知トレーラーの同一性フィールド）
    pub fn claimee_name_long(&self) -> Result<&str, DomainError> {
        self.require_str("claimee_name_long")
    }

    /// 請求先メールアドレス
    pub fn claimee_email(&self) -> Result<&str, DomainError> {
        self.require_str("claimee_email")
    }

    /// 請求元の短縮名（メール本文の差出人表示に使用）
    pub fn claimer_name_short(&self) -> Result<&str, DomainError> {
        self.require_str("claimer_name_short")
    }

    /// 請求元メールアドレス（送信元アドレスのドメイン部に使用）
    pub fn claimer_email(&self) -> Result<&str, DomainError> {
        self.require_str("claimer_email")
    }

    /// メール署名ブロック
    pub fn signature(&self) -> Result<&str, DomainError> {
        self.require_str("signature")
    }
}
