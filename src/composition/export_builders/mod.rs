//! # Export Builders
//!
//! 리플렉션 타입을 익스포트로 바꾸는 규칙과 생성기입니다.
//!
//! - [`export_target_set`] - 파생 관계를 고려하는 익스포트 타깃 집합
//! - [`typed_export_builder`] - 규칙 본체 (우선순위, 메타데이터, 생성 정책, 공유 캐시)
//! - [`matchers`] - 정확한 타입 / 파생 타입 / 조건 함수 매처
//! - [`fluent`] - 체이닝 옵션
//! - [`reflection_exporter`] - 생성자 파라미터 해결 및 인스턴스 생성

pub mod export_target_set;
pub mod fluent;
pub mod matchers;
pub mod reflection_exporter;
pub mod typed_export_builder;

pub use export_target_set::*;
pub use fluent::*;
pub use matchers::*;
pub use reflection_exporter::*;
pub use typed_export_builder::*;
