//! 时间工具函数
//!
//! 所有时间戳在存储层统一为 `i64` Unix millis；
//! API 层负责与 RFC 3339 日期时间字符串互转。

use chrono::{DateTime, Utc};

/// 当前时间 (Unix millis)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Unix millis → UTC 日期时间
///
/// 超出 chrono 可表示范围的值回落到 epoch，存储层不会产生这种值。
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_round_trip() {
        let now = now_millis();
        assert_eq!(millis_to_datetime(now).timestamp_millis(), now);
    }
}
