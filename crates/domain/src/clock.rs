//! # Clock（日付プロバイダ）
//!
//! パイプラインでの `Local::now()` 直接呼び出しを置き換え、
//! テストで固定日付を注入可能にするための抽象化。
//! 請求書に刻む発行日（`today_date_ymd`）の導出に使用する。

use chrono::{Local, NaiveDate};

/// 今日の日付を提供するトレイト
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 実際のシステム日付（ローカルタイムゾーン）を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 固定日付を返すテスト用実装
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// 日付を `YYYY年MM月DD日` 形式で書式化する
pub fn format_ymd_jp(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}
