//! # Configuration Module
//!
//! 컴포지션 엔진의 동작 설정을 관리하는 모듈입니다.
//! 환경 변수 기반의 설정값을 프로세스 전역에서 한 곳으로 모아 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`composition_config`] - 순환 의존성 감지, 해결 깊이 제한 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use composition_engine::config::CompositionConfig;
//!
//! // 현재 전역 설정 확인
//! let config = CompositionConfig::current();
//! println!("cycle detection: {}", config.detect_circular_dependencies);
//!
//! // 테스트 하네스 등에서 설정 교체
//! CompositionConfig::install(CompositionConfig {
//!     detect_circular_dependencies: true,
//!     max_resolution_depth: 16,
//! });
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 순환 의존성 감지 (기본값: true)
//! export COMPOSITION_DETECT_CYCLES="true"
//!
//! # 최대 해결 깊이 (1-4096, 기본값: 64)
//! export COMPOSITION_MAX_DEPTH="64"
//! ```

pub mod composition_config;

pub use composition_config::*;
