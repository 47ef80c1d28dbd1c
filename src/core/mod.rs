//! # Core Module
//!
//! 컴포지션 엔진 전반에서 공유하는 기반 기능입니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **CompositionError**: 컴포지션 실패를 표현하는 단일 에러 타입
//! - **ImportTargetError**: 생성자 파라미터 하나의 해결 실패
//! - **ErrorContext**: 사용자 생성자에서 외부 에러를 변환하는 확장 트레이트
//!
//! ### [`registry`] - 컴파일 타임 타입 등록
//! - **TypeRegistration**: `inventory`로 수집되는 타입 서술자 등록
//! - 모듈 이름별 인덱스 (`ModuleInfo::registered`의 기반)
//!
//! ### [`context`] - 실행 컨텍스트
//! - **ExecutionContext**: `.await`를 넘어 유지되는 컨텍스트 객체
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 엔진 |
//! |--------|---------|
//! | `@Component` | `inventory::submit! { TypeRegistration::new(..) }` |
//! | `@ComponentScan` | `ModuleCatalog` + `ModuleInfo::registered` |
//! | `BeanCreationException` | `CompositionError::CompositionFailed` |
//! | `BeanCurrentlyInCreationException` | `CompositionError::CircularDependency` |
//! | `RequestContextHolder` | `ExecutionContext` |
//!
//! ## 트러블슈팅
//!
//! ### 순환 의존성
//! ```text
//! Circular dependency detected: Ping -> Pong -> Ping
//! ```
//! **해결**: 한쪽 파라미터를 `lazy()` 임포트로 바꾸거나 의존 방향을 재설계
//!
//! ### 익스포트 개수 불일치
//! ```text
//! Import cardinality mismatch: expected exactly one export of 'Clock', found 0
//! ```
//! **해결**: 카탈로그에 구현 타입이 포함되어 있는지, 규칙의 `export_as` 대상이 맞는지 확인

pub mod context;
pub mod errors;
pub mod registry;

pub use context::*;
pub use errors::*;
pub use registry::*;
