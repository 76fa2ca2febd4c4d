//! lady-match CLI 라이브러리
//!
//! 입력 파일 읽기, 결과 출력/내보내기, 사용자 설정을 담당한다.
//! 매칭 계산 자체는 `lady_match_common`에 있다.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod logging;
pub mod report;
