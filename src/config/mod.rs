/// 환경 변수 기반 설정
/// DATABASE_URL, SERVER_ADDR, AUCTION_DURATION, AUCTION_UPDATE_TIMEOUT, SHUTDOWN_GRACE
// region:    --- Imports
use std::time::Duration;
use tracing::debug;

// endregion: --- Imports

// region:    --- Defaults
/// 경매 기본 진행 시간 (5분)
pub const DEFAULT_AUCTION_DURATION: Duration = Duration::from_secs(5 * 60);
/// 만료 시 상태 업데이트 제한 시간
pub const DEFAULT_UPDATE_TIMEOUT: Duration = Duration::from_millis(50);
/// 종료 시 진행 중인 만료 작업 대기 시간
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
// endregion: --- Defaults

// region:    --- Config
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub server_addr: String,
    pub auction_duration: Duration,
    pub update_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Config {
    /// 프로세스 환경 변수에서 설정 로드
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            auction_duration: parse_duration_or(
                lookup("AUCTION_DURATION").as_deref(),
                DEFAULT_AUCTION_DURATION,
            ),
            update_timeout: parse_duration_or(
                lookup("AUCTION_UPDATE_TIMEOUT").as_deref(),
                DEFAULT_UPDATE_TIMEOUT,
            ),
            shutdown_grace: parse_duration_or(
                lookup("SHUTDOWN_GRACE").as_deref(),
                DEFAULT_SHUTDOWN_GRACE,
            ),
        }
    }
}

/// "50ms", "2s", "5m", "1h 30m" 형식의 시간 파싱.
/// 값이 없거나 잘못되었거나 0이면 기본값을 사용한다 (오류를 반환하지 않음).
pub fn parse_duration_or(raw: Option<&str>, default: Duration) -> Duration {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };
    match humantime::parse_duration(raw) {
        Ok(duration) if !duration.is_zero() => duration,
        Ok(_) => {
            debug!("{:<12} --> 0 시간은 허용되지 않음, 기본값 사용: {}", "Config", raw);
            default
        }
        Err(e) => {
            debug!(
                "{:<12} --> 시간 파싱 실패, 기본값 사용: {} ({})",
                "Config", raw, e
            );
            default
        }
    }
}
// endregion: --- Config

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_missing_duration_uses_default() {
        let config = config_from(&[]);
        assert_eq!(config.auction_duration, DEFAULT_AUCTION_DURATION);
        assert_eq!(config.update_timeout, DEFAULT_UPDATE_TIMEOUT);
        assert_eq!(config.server_addr, DEFAULT_SERVER_ADDR);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_malformed_duration_uses_default() {
        for raw in ["five minutes", "10", "-3s", "0s", "   "] {
            assert_eq!(
                parse_duration_or(Some(raw), DEFAULT_AUCTION_DURATION),
                DEFAULT_AUCTION_DURATION,
                "input: {raw:?}"
            );
        }
    }

    #[test]
    fn test_valid_durations_are_parsed() {
        assert_eq!(
            parse_duration_or(Some("50ms"), DEFAULT_AUCTION_DURATION),
            Duration::from_millis(50)
        );
        assert_eq!(
            parse_duration_or(Some("2s"), DEFAULT_AUCTION_DURATION),
            Duration::from_secs(2)
        );
        assert_eq!(
            parse_duration_or(Some("1h 30m"), DEFAULT_AUCTION_DURATION),
            Duration::from_secs(90 * 60)
        );
    }

    #[test]
    fn test_config_reads_all_keys() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/auctions"),
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("AUCTION_DURATION", "20s"),
            ("AUCTION_UPDATE_TIMEOUT", "80ms"),
            ("SHUTDOWN_GRACE", "1s"),
        ]);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/auctions")
        );
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.auction_duration, Duration::from_secs(20));
        assert_eq!(config.update_timeout, Duration::from_millis(80));
        assert_eq!(config.shutdown_grace, Duration::from_secs(1));
    }
}
