//! 로그 초기화
//!
//! 로그는 stderr로만 보낸다. stdout은 CSV/JSON 파이프 출력용으로 비워 둔다.

use tracing_subscriber::EnvFilter;

/// 전역 subscriber 설치 (`RUST_LOG`가 있으면 그 설정을 우선)
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // 테스트 등에서 두 번 호출되면 무시
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
