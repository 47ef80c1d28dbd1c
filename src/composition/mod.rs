//! # Composition Module
//!
//! 익스포트/임포트 해결 파이프라인의 핵심입니다.
//!
//! ## 데이터 흐름
//!
//! ```text
//! 카탈로그가 후보 타입 열거
//!   → ReflectionContext::meets_context로 필터링
//!   → 소비자가 타깃 타입의 익스포트 요청
//!   → ReflectionContext가 가장 적합한 규칙으로 LazyExport 생성
//!   → LazyExport::value() 시 ReflectionExporter가 생성자 인자를 재귀적으로 해결
//!   → 객체 그래프 반환
//! ```
//!
//! ## 모듈 구성
//!
//! - [`creation_policy`] - `Shared` / `NonShared`
//! - [`import_target`] - 파라미터 임포트 타깃과 `lazy`/`many`/`lazy_many` 헬퍼
//! - [`lazy_export`] - 지연 익스포트
//! - [`metadata`] - 메타데이터 조회
//! - [`export_provider`] - 소비자용 계약
//! - [`shared_exports`] - 프로바이더별 `Shared` 익스포트 저장소
//! - [`reflection_context`] - 교체 가능한 정책과 기본 구현
//! - [`registration_builder`] - 관례 기반 규칙 모음
//! - [`container`] - 소비자용 파사드
//! - [`export_builders`] - 규칙과 생성기

pub mod container;
pub mod creation_policy;
pub mod export_builders;
pub mod export_provider;
pub mod import_target;
pub mod lazy_export;
pub mod metadata;
pub mod reflection_context;
pub mod registration_builder;
pub(crate) mod resolution;
pub mod shared_exports;

pub use container::*;
pub use creation_policy::*;
pub use export_provider::*;
pub use import_target::*;
pub use lazy_export::*;
pub use metadata::*;
pub use reflection_context::*;
pub use registration_builder::*;
pub use shared_exports::*;
