//! # Composition Error Handling System
//!
//! 컴포지션 엔진 전역에서 사용하는 에러 타입을 정의합니다.
//! 카탈로그 조회, 생성자 의존성 해결, 지연 익스포트 평가 중 발생하는
//! 모든 실패가 하나의 `CompositionError` 열거형으로 표현됩니다.
//!
//! ## 설계 철학
//!
//! ### 1. 실패의 누적 보고
//! 생성자 파라미터 하나가 실패해도 나머지 파라미터를 계속 해결하고,
//! 실패한 파라미터 전체를 `ImportTargetError` 목록으로 묶어 한 번에 보고합니다.
//!
//! ### 2. 재시도 없음
//! 컴포지션 코어는 자동 재시도나 암묵적 대체(fallback)를 하지 않습니다.
//! 타입은 완전히 생성되거나, 전혀 생성되지 않습니다.
//!
//! ### 3. 공유 가능한 에러
//! 공유(Shared) 익스포트는 결과를 메모이제이션하므로 모든 에러는 `Clone`입니다.
//! 내부 원인은 `Arc`로 보관됩니다.
//!
//! ## 에러 매핑
//!
//! | CompositionError | 발생 시나리오 |
//! |------------------|---------------|
//! | `ImportCardinalityMismatch` | 단일 익스포트 요청이 0개 또는 2개 이상과 매칭 |
//! | `CompositionFailed` | 생성자 파라미터 해결 실패 (파라미터별 원인 포함) |
//! | `CircularDependency` | 해결 중인 타입이 자기 자신을 다시 요청 |
//! | `ResolutionDepthExceeded` | 해결 경로가 설정된 깊이 제한을 초과 |
//! | `NotConstructible` | 생성자도 팩토리도 없는 타입 |
//! | `TypeMismatch` | 익스포트 값을 요청한 타입으로 볼 수 없음 |
//! | `MissingArgument` | 생성자가 존재하지 않는 인자 인덱스를 읽음 |
//! | `ProviderDropped` | 익스포트 프로바이더가 먼저 해제됨 |
//! | `ConstructionFailed` | 사용자 생성자 또는 팩토리가 실패를 반환 |

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::composition::ImportTarget;
use crate::utils::string_utils::indent_continuation_lines;

/// 컴포지션 엔진 전역 에러 타입
///
/// `thiserror`로 `Error` trait을 구현하며, 메모이제이션된 결과를 여러
/// 대기자에게 나눠주기 위해 `Clone`을 구현합니다.
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// use composition_engine::core::errors::{CompositionError, ErrorContext};
///
/// // 사용자 생성자에서 외부 에러 변환
/// let port = std::env::var("PORT").context("HttpListener")?;
/// ```
#[derive(Error, Debug, Clone)]
pub enum CompositionError {
    /// 단일 익스포트 요청의 매칭 개수가 정확히 1이 아닐 때 발생합니다.
    ///
    /// 0개(익스포트 없음)와 2개 이상(모호함) 모두 에러이며,
    /// "첫 번째 것을 사용"하는 암묵적 규칙은 없습니다.
    #[error("Import cardinality mismatch: expected exactly one export of '{type_name}', found {found}")]
    ImportCardinalityMismatch { type_name: String, found: usize },

    /// 하나 이상의 생성자 파라미터를 해결하지 못해 타입 생성에 실패했습니다.
    ///
    /// 실패한 모든 파라미터가 `errors`에 파라미터 인덱스와 함께 담깁니다.
    #[error("{}", describe_composition_failure(.type_name, .errors))]
    CompositionFailed {
        type_name: String,
        errors: Vec<ImportTargetError>,
    },

    /// 순환 의존성 감지
    ///
    /// `path`는 첫 진입 타입부터 다시 요청된 타입까지의 전체 경로입니다.
    /// ```text
    /// Circular dependency detected: OrderService -> PaymentService -> OrderService
    /// ```
    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    CircularDependency { path: Vec<String> },

    /// 해결 경로가 `CompositionConfig::max_resolution_depth`를 넘었습니다.
    #[error("Resolution depth limit of {limit} exceeded while composing '{type_name}'")]
    ResolutionDepthExceeded { type_name: String, limit: usize },

    /// 생성자가 등록되지 않은 타입을 생성하려 했습니다.
    #[error("Type '{type_name}' has no constructor")]
    NotConstructible { type_name: String },

    /// 익스포트 값을 요청한 타입으로 변환할 수 없습니다.
    #[error("Type mismatch: expected '{expected}', found '{actual}'")]
    TypeMismatch { expected: String, actual: String },

    /// 생성자가 전달되지 않은 인자 인덱스를 읽었습니다.
    #[error("Missing argument {index} while constructing '{type_name}'")]
    MissingArgument { type_name: String, index: usize },

    /// 지연 익스포트를 평가하는 시점에 프로바이더가 이미 해제되었습니다.
    #[error("The export provider for '{type_name}' has been dropped")]
    ProviderDropped { type_name: String },

    /// 사용자 생성자 또는 `construct_with` 팩토리가 실패를 보고했습니다.
    #[error("Failed to construct '{type_name}': {message}")]
    ConstructionFailed { type_name: String, message: String },
}

impl CompositionError {
    /// `CompositionFailed`일 때 파라미터별 에러 목록을 반환합니다.
    pub fn import_target_errors(&self) -> &[ImportTargetError] {
        match self {
            CompositionError::CompositionFailed { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn describe_composition_failure(type_name: &str, errors: &[ImportTargetError]) -> String {
    let mut message = format!("Unable to compose '{}':", type_name);

    for error in errors {
        message.push_str(&format!(
            "\n<{}>: {}",
            error.parameter_index(),
            indent_continuation_lines(&error.to_string(), 6)
        ));
    }

    message
}

/// 생성자 파라미터 하나의 해결 실패
///
/// 단독으로 반환되지 않으며 항상 `CompositionError::CompositionFailed`에
/// 모아서 보고됩니다.
#[derive(Debug, Clone)]
pub struct ImportTargetError {
    parameter_index: usize,
    import_target: Option<ImportTarget>,
    inner: Option<Arc<CompositionError>>,
}

impl ImportTargetError {
    /// 임포트 타깃을 결정할 수 없는 파라미터에 대한 에러를 생성합니다.
    pub fn missing(parameter_index: usize) -> Self {
        Self {
            parameter_index,
            import_target: None,
            inner: None,
        }
    }

    /// 임포트 타깃 해결 중 실패한 파라미터에 대한 에러를 생성합니다.
    pub fn new(parameter_index: usize, import_target: ImportTarget, inner: CompositionError) -> Self {
        Self {
            parameter_index,
            import_target: Some(import_target),
            inner: Some(Arc::new(inner)),
        }
    }

    pub fn parameter_index(&self) -> usize {
        self.parameter_index
    }

    pub fn import_target(&self) -> Option<&ImportTarget> {
        self.import_target.as_ref()
    }

    /// 실패의 내부 원인
    pub fn inner(&self) -> Option<&CompositionError> {
        self.inner.as_deref()
    }
}

impl fmt::Display for ImportTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.import_target {
            None => write!(f, "No import target could be determined for the parameter")?,
            Some(ImportTarget::Type(type_info)) => {
                write!(f, "Unable to import an export of type '{}'", type_info.name())?
            }
            Some(ImportTarget::Provider(_)) => write!(f, "The export provider function failed")?,
        }

        if let Some(inner) = &self.inner {
            write!(f, "\n{}", inner)?;
        }

        Ok(())
    }
}

impl std::error::Error for ImportTargetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .as_deref()
            .map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}

/// 편의성을 위한 Result 타입 별칭
///
/// ```rust,ignore
/// async fn compose() -> CompositionResult<ExportedValue> {
///     container.get_exported_value(&TypeInfo::of::<dyn Logger>()).await
/// }
/// ```
pub type CompositionResult<T> = Result<T, CompositionError>;

/// 외부 에러를 `CompositionError::ConstructionFailed`로 변환하는 확장 trait
///
/// 사용자 생성자와 `construct_with` 팩토리 안에서 실패 가능한 코드를
/// 호출할 때 사용합니다. 인자로는 생성 중인 타입 이름을 넘깁니다.
///
/// # 예제
///
/// ```rust,ignore
/// use composition_engine::core::errors::ErrorContext;
///
/// let builder = TypeInfo::builder::<FileStore>()
///     .constructor(|_| {
///         let root = std::env::var("STORE_ROOT").context("FileStore")?;
///         Ok(FileStore::new(root))
///     });
/// ```
pub trait ErrorContext<T> {
    /// 생성 중인 타입 이름과 함께 에러를 변환합니다.
    fn context(self, type_name: &str) -> CompositionResult<T>;

    /// 클로저로 지연 평가된 타입 이름을 제공합니다.
    fn with_context<F>(self, f: F) -> CompositionResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: fmt::Display,
{
    fn context(self, type_name: &str) -> CompositionResult<T> {
        self.map_err(|e| CompositionError::ConstructionFailed {
            type_name: type_name.to_string(),
            message: e.to_string(),
        })
    }

    fn with_context<F>(self, f: F) -> CompositionResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| CompositionError::ConstructionFailed {
            type_name: f(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::TypeInfo;

    struct Database;

    #[test]
    fn test_missing_import_target_message() {
        let error = ImportTargetError::missing(2);

        assert_eq!(error.parameter_index(), 2);
        assert!(error.import_target().is_none());
        assert_eq!(error.to_string(), "No import target could be determined for the parameter");
    }

    #[test]
    fn test_import_target_error_includes_inner_cause() {
        let inner = CompositionError::ImportCardinalityMismatch {
            type_name: "Database".to_string(),
            found: 0,
        };
        let error = ImportTargetError::new(0, ImportTarget::Type(TypeInfo::of::<Database>()), inner);

        let message = error.to_string();
        assert!(message.starts_with("Unable to import an export of type 'Database'"));
        assert!(message.contains("found 0"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_composition_failure_lists_every_parameter() {
        let error = CompositionError::CompositionFailed {
            type_name: "UserService".to_string(),
            errors: vec![
                ImportTargetError::missing(0),
                ImportTargetError::new(
                    2,
                    ImportTarget::Type(TypeInfo::of::<Database>()),
                    CompositionError::ImportCardinalityMismatch {
                        type_name: "Database".to_string(),
                        found: 2,
                    },
                ),
            ],
        };

        let message = error.to_string();
        assert!(message.starts_with("Unable to compose 'UserService':"));
        assert!(message.contains("\n<0>: No import target"));
        assert!(message.contains("\n<2>: Unable to import an export of type 'Database'"));
        // 내부 원인은 6칸 들여쓰기
        assert!(message.contains("\n      Import cardinality mismatch"));
        assert_eq!(error.import_target_errors().len(), 2);
    }

    #[test]
    fn test_circular_dependency_message() {
        let error = CompositionError::CircularDependency {
            path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };

        assert_eq!(error.to_string(), "Circular dependency detected: A -> B -> A");
        assert!(error.import_target_errors().is_empty());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("disk full");
        let composed = result.context("FileStore");

        match composed {
            Err(CompositionError::ConstructionFailed { type_name, message }) => {
                assert_eq!(type_name, "FileStore");
                assert_eq!(message, "disk full");
            }
            _ => panic!("Expected ConstructionFailed"),
        }
    }

    #[test]
    fn test_error_with_context_is_lazy() {
        let ok: Result<u8, &str> = Ok(7);
        let value = ok.with_context(|| panic!("context must not be evaluated")).unwrap();

        assert_eq!(value, 7);
    }
}
