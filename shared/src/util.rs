/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque order token (12 lowercase hex chars, 48 random bits)
pub fn order_token() -> String {
    let bytes: [u8; 6] = rand::random();
    hex::encode(bytes)
}
