//! 컴포지션 엔진
//!
//! 타입 서술자와 관례 기반 규칙으로 객체 그래프를 구성하는 의존성 주입 엔진입니다.
//! 카탈로그가 후보 타입을 열거하고, 리플렉션 컨텍스트가 익스포트 규칙을 고르며,
//! 지연 익스포트가 생성자 인자를 재귀적으로 해결합니다.
//!
//! # Features
//!
//! - **명시적 리플렉션**: `TypeInfo` 빌더로 상속 관계, 생성자 파라미터, 익스포트 선언
//! - **관례 기반 규칙**: `RegistrationBuilder`의 정확한 타입 / 파생 타입 / 조건 규칙
//! - **카탈로그**: 타입 목록, `inventory` 등록 모듈, 카탈로그 집계
//! - **생성 정책**: 프로바이더별 싱글톤(`Shared`) 또는 매번 생성(`NonShared`)
//! - **지연 익스포트**: 메타데이터는 즉시, 값은 최초 요청 시 한 번만 생성
//! - **순환 의존성 감지**: 전체 경로를 포함한 에러로 즉시 실패
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ CompositionContainer │ ← 소비자용 파사드
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │       Catalogs       │ ← 후보 타입 열거 + 필터링
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │  ReflectionContext   │ ← 익스포트 규칙 선택
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │  ReflectionExporter  │ ← 생성자 인자 해결 + 인스턴스 생성
//! └──────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use composition_engine::catalogs::TypeCatalog;
//! use composition_engine::composition::{CompositionContainer, CreationPolicy, RegistrationBuilder};
//!
//! let mut rules = RegistrationBuilder::new();
//! rules
//!     .for_types_derived_from(&TypeInfo::of::<dyn Logger>())
//!     .export_as(&[&TypeInfo::of::<dyn Logger>()])
//!     .set_creation_policy(CreationPolicy::Shared);
//!
//! let catalog = TypeCatalog::new(vec![console_logger(), scheduler()], Some(Arc::new(rules)));
//! let container = CompositionContainer::new(catalog);
//!
//! let logger = container.get_exported_value_of::<dyn Logger>().await?;
//! ```

pub mod core;
pub mod config;
pub mod reflection;
pub mod composition;
pub mod catalogs;
pub mod utils;
