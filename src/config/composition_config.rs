//! 컴포지션 동작 설정 관리 모듈
//!
//! 순환 의존성 감지와 해결 깊이 제한을 환경 변수에서 읽어 관리합니다.

use std::env;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::utils::string_utils::parse_flag;

/// 순환 의존성 감지 여부 환경 변수
pub const DETECT_CYCLES_VAR: &str = "COMPOSITION_DETECT_CYCLES";

/// 최대 해결 깊이 환경 변수
pub const MAX_DEPTH_VAR: &str = "COMPOSITION_MAX_DEPTH";

const DEFAULT_MAX_DEPTH: usize = 64;
const MAX_DEPTH_LIMIT: usize = 4096;

/// 컴포지션 엔진 설정
///
/// 모든 카탈로그와 컨테이너가 공유하는 프로세스 전역 설정입니다.
/// 첫 접근 시 환경 변수에서 로드되며 `install`로 교체할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionConfig {
    /// 해결 경로에 이미 있는 타입을 다시 요청하면 즉시 실패할지 여부
    pub detect_circular_dependencies: bool,
    /// 한 요청에서 중첩될 수 있는 최대 타입 수
    pub max_resolution_depth: usize,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            detect_circular_dependencies: true,
            max_resolution_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

static GLOBAL_CONFIG: Lazy<RwLock<CompositionConfig>> =
    Lazy::new(|| RwLock::new(CompositionConfig::from_env()));

impl CompositionConfig {
    /// 환경 변수에서 설정을 로드합니다.
    ///
    /// 값이 없거나 해석할 수 없으면 기본값을 사용합니다.
    ///
    /// # Environment Variables
    ///
    /// - `COMPOSITION_DETECT_CYCLES`: 순환 의존성 감지 (기본값: true)
    /// - `COMPOSITION_MAX_DEPTH`: 최대 해결 깊이, 1-4096 (기본값: 64)
    pub fn from_env() -> Self {
        let detect_circular_dependencies = env::var(DETECT_CYCLES_VAR)
            .ok()
            .and_then(|value| {
                let parsed = parse_flag(&value);
                if parsed.is_none() {
                    log::warn!("{} 값 해석 실패: '{}'. 기본값 사용", DETECT_CYCLES_VAR, value);
                }
                parsed
            })
            .unwrap_or(true);

        let max_resolution_depth = env::var(MAX_DEPTH_VAR)
            .ok()
            .map(|value| Self::parse_max_depth(&value))
            .unwrap_or(DEFAULT_MAX_DEPTH);

        Self {
            detect_circular_dependencies,
            max_resolution_depth,
        }
    }

    /// 최대 해결 깊이 문자열을 해석합니다.
    ///
    /// # Returns
    ///
    /// 1-4096 범위의 값. 범위를 벗어나거나 숫자가 아니면 기본값 64를 반환합니다.
    pub fn parse_max_depth(value: &str) -> usize {
        match value.trim().parse::<usize>() {
            Ok(depth) if (1..=MAX_DEPTH_LIMIT).contains(&depth) => depth,
            _ => {
                log::warn!("{} 값 해석 실패: '{}'. 기본값 {} 사용", MAX_DEPTH_VAR, value, DEFAULT_MAX_DEPTH);
                DEFAULT_MAX_DEPTH
            }
        }
    }

    /// 현재 전역 설정의 복사본을 반환합니다.
    pub fn current() -> Self {
        GLOBAL_CONFIG.read().clone()
    }

    /// 전역 설정을 교체합니다.
    ///
    /// 이미 진행 중인 해결 요청도 다음 단계부터 새 설정을 사용합니다.
    pub fn install(config: CompositionConfig) {
        log::debug!("컴포지션 설정 교체: {:?}", config);
        *GLOBAL_CONFIG.write() = config;
    }
}
