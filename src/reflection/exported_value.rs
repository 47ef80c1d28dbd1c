//! 익스포트 값과 생성자 인자
//!
//! 해결된 인스턴스는 타입이 지워진 `Arc`로 보관되며, 인스턴스를 만든 타입의
//! `TypeInfo` 캐스터 테이블을 통해 구체 타입 또는 trait 객체로 꺼낼 수 있습니다.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::composition::LazyExport;
use crate::core::errors::{CompositionError, CompositionResult};
use crate::reflection::{Instance, TypeInfo};
use crate::utils::string_utils::clean_type_name;

/// 생성된 익스포트 인스턴스
///
/// 공유(Shared) 익스포트는 같은 인스턴스를 가리키는 `ExportedValue`를
/// 여러 번 반환하므로 `ptr_eq`로 동일성을 확인할 수 있습니다.
#[derive(Clone)]
pub struct ExportedValue {
    instance: Instance,
    type_info: TypeInfo,
}

impl ExportedValue {
    pub fn new(instance: Instance, type_info: TypeInfo) -> Self {
        Self { instance, type_info }
    }

    /// 인스턴스를 생성한 (리플렉션된) 타입
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// 인스턴스를 `Arc<U>`로 봅니다.
    ///
    /// `U`는 구체 타입이거나 `cast_as`로 등록된 trait 객체여야 합니다.
    pub fn get<U: ?Sized + 'static>(&self) -> Option<Arc<U>> {
        self.type_info.cast::<U>(&self.instance)
    }

    /// `get`과 같지만 변환 실패를 `TypeMismatch` 에러로 반환합니다.
    pub fn resolve<U: ?Sized + 'static>(&self) -> CompositionResult<Arc<U>> {
        self.get::<U>().ok_or_else(|| CompositionError::TypeMismatch {
            expected: clean_type_name(std::any::type_name::<U>()),
            actual: self.type_info.name().to_string(),
        })
    }

    /// 두 값이 같은 인스턴스를 가리키는지 확인합니다.
    pub fn ptr_eq(&self, other: &ExportedValue) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.instance), Arc::as_ptr(&other.instance))
    }
}

impl fmt::Debug for ExportedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedValue")
            .field("type", &self.type_info.name())
            .finish()
    }
}

/// 임포트 타깃 하나를 해결한 결과
///
/// 일반 타입 임포트는 `Value`, 지연 임포트는 `Export`, 다중 임포트는
/// `Values`/`Exports`가 됩니다. 사용자 제공 프로바이더 함수는 임의의 값을
/// `Custom`으로 돌려줄 수 있습니다.
#[derive(Clone)]
pub enum ImportValue {
    Value(ExportedValue),
    Export(LazyExport),
    Values(Vec<ExportedValue>),
    Exports(Vec<LazyExport>),
    Custom(Arc<dyn Any + Send + Sync>),
}

impl ImportValue {
    /// 사용자 정의 값을 감쌉니다.
    pub fn custom<V: Any + Send + Sync>(value: V) -> Self {
        ImportValue::Custom(Arc::new(value))
    }

    fn kind(&self) -> &'static str {
        match self {
            ImportValue::Value(_) => "value",
            ImportValue::Export(_) => "lazy export",
            ImportValue::Values(_) => "value list",
            ImportValue::Exports(_) => "lazy export list",
            ImportValue::Custom(_) => "custom value",
        }
    }
}

impl fmt::Debug for ImportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ImportValue::Export(export) => f.debug_tuple("Export").field(export).finish(),
            ImportValue::Values(values) => f.debug_tuple("Values").field(values).finish(),
            ImportValue::Exports(exports) => f.debug_tuple("Exports").field(exports).finish(),
            ImportValue::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// 생성자에 전달되는 해결된 인자 목록
///
/// ```rust,ignore
/// TypeInfo::builder::<UserService>()
///     .parameter::<dyn Database>()
///     .import_as(1, lazy_many(&TypeInfo::of::<dyn Plugin>()))
///     .constructor(|args| {
///         Ok(UserService {
///             database: args.get::<dyn Database>(0)?,
///             plugins: args.exports(1)?,
///         })
///     })
/// ```
pub struct ImportArguments {
    type_name: String,
    values: Vec<ImportValue>,
}

impl ImportArguments {
    /// `type_name`은 생성 중인 타입 이름이며 에러 메시지에 사용됩니다.
    pub fn new(type_name: impl Into<String>, values: Vec<ImportValue>) -> Self {
        Self {
            type_name: type_name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `index`번째 인자를 원형 그대로 반환합니다.
    pub fn value(&self, index: usize) -> CompositionResult<&ImportValue> {
        self.values
            .get(index)
            .ok_or_else(|| CompositionError::MissingArgument {
                type_name: self.type_name.clone(),
                index,
            })
    }

    /// 단일 값 인자를 `Arc<U>`로 꺼냅니다.
    ///
    /// `Custom` 인자는 `Arc<U>`로 저장된 경우에만 허용됩니다.
    pub fn get<U: ?Sized + 'static>(&self, index: usize) -> CompositionResult<Arc<U>> {
        match self.value(index)? {
            ImportValue::Value(value) => value.resolve::<U>(),
            ImportValue::Custom(custom) => custom
                .as_ref()
                .downcast_ref::<Arc<U>>()
                .cloned()
                .ok_or_else(|| mismatch::<Arc<U>>("custom value")),
            other => Err(mismatch::<U>(other.kind())),
        }
    }

    /// 지연 익스포트 인자를 꺼냅니다.
    pub fn export(&self, index: usize) -> CompositionResult<LazyExport> {
        match self.value(index)? {
            ImportValue::Export(export) => Ok(export.clone()),
            other => Err(mismatch::<LazyExport>(other.kind())),
        }
    }

    /// 다중 값 인자를 `Arc<U>` 목록으로 꺼냅니다.
    pub fn many<U: ?Sized + 'static>(&self, index: usize) -> CompositionResult<Vec<Arc<U>>> {
        match self.value(index)? {
            ImportValue::Values(values) => values.iter().map(|value| value.resolve::<U>()).collect(),
            other => Err(mismatch::<Vec<Arc<U>>>(other.kind())),
        }
    }

    /// 지연 익스포트 목록 인자를 꺼냅니다.
    pub fn exports(&self, index: usize) -> CompositionResult<Vec<LazyExport>> {
        match self.value(index)? {
            ImportValue::Exports(exports) => Ok(exports.clone()),
            other => Err(mismatch::<Vec<LazyExport>>(other.kind())),
        }
    }

    /// 사용자 정의 프로바이더 함수가 만든 값을 꺼냅니다.
    pub fn custom<V: Any + Clone>(&self, index: usize) -> CompositionResult<V> {
        match self.value(index)? {
            ImportValue::Custom(custom) => custom
                .as_ref()
                .downcast_ref::<V>()
                .cloned()
                .ok_or_else(|| mismatch::<V>("custom value of another type")),
            other => Err(mismatch::<V>(other.kind())),
        }
    }
}

fn mismatch<U: ?Sized>(actual: &str) -> CompositionError {
    CompositionError::TypeMismatch {
        expected: clean_type_name(std::any::type_name::<U>()),
        actual: actual.to_string(),
    }
}
