use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub fn elapsed_seconds(start: i64, end: i64) -> i64 {
    end - start
}

/// True once more than `ttl` seconds have passed since `timestamp`
pub fn is_expired(timestamp: i64, ttl: i64, current_time: i64) -> bool {
    elapsed_seconds(timestamp, current_time) > ttl
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_timestamp() {
        let ts = current_timestamp();
        // After 2020-01-01, before 2100-01-01
        assert!(ts > 1577836800);
        assert!(ts < 4102444800);
    }

    #[test]
    fn test_elapsed_seconds() {
        assert_eq!(elapsed_seconds(100, 150), 50);
        assert_eq!(elapsed_seconds(1000, 1000), 0);
        assert_eq!(elapsed_seconds(200, 100), -100);
    }

    #[test]
    fn test_is_expired_boundary() {
        assert!(!is_expired(900, 100, 1000));
        assert!(is_expired(899, 100, 1000));
    }

    #[test]
    fn test_is_expired_token_lifetime() {
        let ttl = 7200;
        let now = current_timestamp();

        // Page loaded an hour ago
        assert!(!is_expired(now - 3600, ttl, now));

        // Page left open overnight
        assert!(is_expired(now - 12 * 3600, ttl, now));
    }
}
