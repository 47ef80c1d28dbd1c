//! # Type Descriptors
//!
//! 런타임 리플렉션 대신 명시적으로 선언하는 타입 서술자입니다.
//!
//! 각 타입은 `TypeInfo`로 표현되며 다음 정보를 가집니다.
//!
//! - **식별자**: `TypeId` (동등성과 해시의 기준)
//! - **조상 집합**: 명시적으로 선언된 기반 타입 (빌드 시점에 추이적으로 닫힘)
//! - **생성자**: 해결된 인자로 인스턴스를 만드는 함수
//! - **파라미터 타입**: 생성자 파라미터별 기본 임포트 타깃
//! - **임포트 재정의**: 파라미터별 `ImportTarget` 지정
//! - **익스포트 선언**: 익스포트 타깃, 생성 정책, 메타데이터
//! - **캐스터 테이블**: 지워진 인스턴스를 `Arc<U>`로 보는 변환 함수
//!
//! ```rust,ignore
//! trait Logger: Send + Sync { fn log(&self, message: &str); }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger { fn log(&self, message: &str) { println!("{message}"); } }
//!
//! let logger = TypeInfo::of::<dyn Logger>();
//! let console = TypeInfo::builder::<ConsoleLogger>()
//!     .implements(&logger, |c| c as Arc<dyn Logger>)
//!     .constructor(|_| Ok(ConsoleLogger))
//!     .export_as(&[&logger])
//!     .build();
//!
//! assert!(console.is_derived_from(&logger));
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::composition::export_builders::ExportTargetSet;
use crate::composition::{CreationPolicy, ImportTarget};
use crate::core::errors::{CompositionError, CompositionResult};
use crate::reflection::ImportArguments;
use crate::utils::string_utils::clean_type_name;

/// 타입이 지워진 인스턴스
pub type Instance = Arc<dyn Any + Send + Sync>;

type Caster = Arc<dyn Fn(Instance) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

type Constructor = Arc<dyn Fn(ImportArguments) -> CompositionResult<Instance> + Send + Sync>;

/// 타입 식별자와 전체 타입 이름의 쌍
///
/// 동등성과 해시는 `TypeId`만 사용합니다.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    type_name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 모듈 경로를 포함한 전체 타입 이름
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&clean_type_name(self.type_name))
    }
}

struct TypeDescriptor {
    key: TypeKey,
    name: String,
    ancestors: HashSet<TypeId>,
    constructor: Option<Constructor>,
    parameters: Vec<Option<TypeInfo>>,
    import_overrides: Vec<Option<ImportTarget>>,
    export_targets: Option<ExportTargetSet>,
    creation_policy: Option<CreationPolicy>,
    metadata: HashMap<String, Value>,
    casters: HashMap<TypeId, Caster>,
}

impl TypeDescriptor {
    fn identity(key: TypeKey) -> Self {
        Self {
            key,
            name: clean_type_name(key.type_name),
            ancestors: HashSet::new(),
            constructor: None,
            parameters: Vec::new(),
            import_overrides: Vec::new(),
            export_targets: None,
            creation_policy: None,
            metadata: HashMap::new(),
            casters: HashMap::new(),
        }
    }
}

/// 생성 가능한 타입의 서술자
///
/// `Arc` 기반 핸들이므로 복제 비용이 낮습니다. 동일한 `TypeId`를 가진
/// 두 서술자는 같은 타입으로 취급됩니다.
#[derive(Clone)]
pub struct TypeInfo(Arc<TypeDescriptor>);

impl TypeInfo {
    /// 식별 정보만 가진 서술자를 생성합니다.
    ///
    /// 추상 기반 타입(`dyn Trait`)이나 익스포트 조회 대상으로 사용합니다.
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeInfo(Arc::new(TypeDescriptor::identity(TypeKey::of::<T>())))
    }

    /// 생성자와 익스포트 선언을 가진 서술자를 만드는 빌더를 반환합니다.
    pub fn builder<T: Any + Send + Sync>() -> TypeInfoBuilder<T> {
        TypeInfoBuilder::new()
    }

    pub fn key(&self) -> TypeKey {
        self.0.key
    }

    pub fn type_id(&self) -> TypeId {
        self.0.key.id
    }

    /// 모듈 경로가 제거된 표시용 이름
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// 현재 타입이 `base`에서 파생되었는지 확인합니다.
    ///
    /// 자기 자신은 파생으로 보지 않습니다.
    pub fn is_derived_from(&self, base: &TypeInfo) -> bool {
        self.is_derived_from_id(base.type_id())
    }

    pub(crate) fn is_derived_from_id(&self, base: TypeId) -> bool {
        base != self.type_id() && self.0.ancestors.contains(&base)
    }

    pub fn is_constructible(&self) -> bool {
        self.0.constructor.is_some()
    }

    /// 생성자 파라미터별 선언 타입 (`None`은 추론 불가)
    pub fn parameters(&self) -> &[Option<TypeInfo>] {
        &self.0.parameters
    }

    /// 파라미터별 임포트 재정의
    pub fn import_overrides(&self) -> &[Option<ImportTarget>] {
        &self.0.import_overrides
    }

    /// 타입에 선언된 익스포트 타깃 (선언되지 않았으면 `None`)
    pub fn declared_export_targets(&self) -> Option<&ExportTargetSet> {
        self.0.export_targets.as_ref()
    }

    pub fn declared_creation_policy(&self) -> Option<CreationPolicy> {
        self.0.creation_policy
    }

    /// 타입 수준 메타데이터를 조회합니다.
    pub fn get_metadata(&self, key: &str) -> Option<&Value> {
        self.0.metadata.get(key)
    }

    /// 해결된 인자로 인스턴스를 생성합니다.
    pub(crate) fn construct(&self, arguments: ImportArguments) -> CompositionResult<Instance> {
        match &self.0.constructor {
            Some(constructor) => constructor(arguments),
            None => Err(CompositionError::NotConstructible {
                type_name: self.name().to_string(),
            }),
        }
    }

    /// 지워진 인스턴스를 `Arc<U>`로 변환합니다.
    pub(crate) fn cast<U: ?Sized + 'static>(&self, instance: &Instance) -> Option<Arc<U>> {
        let caster = self.0.casters.get(&TypeId::of::<U>())?;

        caster(instance.clone())?
            .downcast::<Arc<U>>()
            .ok()
            .map(|boxed| *boxed)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name())
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `TypeInfo` 빌더
///
/// 데코레이터 기반 선언(`exportAs`, `exportCreationPolicy`, `exportMetadata`,
/// `importAs`)을 명시적인 메서드 체인으로 대체합니다.
pub struct TypeInfoBuilder<T> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> TypeInfoBuilder<T> {
    fn new() -> Self {
        let mut descriptor = TypeDescriptor::identity(TypeKey::of::<T>());

        let identity: Caster = Arc::new(|instance: Instance| {
            instance
                .downcast::<T>()
                .ok()
                .map(|concrete| Box::new(concrete) as Box<dyn Any + Send + Sync>)
        });
        descriptor.casters.insert(TypeId::of::<T>(), identity);

        Self {
            descriptor,
            _marker: PhantomData,
        }
    }

    /// 표시용 이름을 지정합니다.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.descriptor.name = name.into();
        self
    }

    /// `base`와 그 조상 전체를 현재 타입의 조상으로 추가합니다.
    pub fn derives_from(mut self, base: &TypeInfo) -> Self {
        self.descriptor.ancestors.insert(base.type_id());
        self.descriptor
            .ancestors
            .extend(base.0.ancestors.iter().copied());
        self
    }

    /// 인스턴스를 `Arc<U>`로 보는 변환을 등록하고 `U`를 조상으로 추가합니다.
    pub fn cast_as<U, F>(mut self, cast: F) -> Self
    where
        U: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<U> + Send + Sync + 'static,
    {
        let caster: Caster = Arc::new(move |instance: Instance| {
            instance
                .downcast::<T>()
                .ok()
                .map(|concrete| Box::new(cast(concrete)) as Box<dyn Any + Send + Sync>)
        });

        self.descriptor.ancestors.insert(TypeId::of::<U>());
        self.descriptor.casters.insert(TypeId::of::<U>(), caster);
        self
    }

    /// `derives_from`과 `cast_as`를 함께 적용합니다.
    pub fn implements<U, F>(self, base: &TypeInfo, cast: F) -> Self
    where
        U: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<U> + Send + Sync + 'static,
    {
        self.derives_from(base).cast_as(cast)
    }

    /// 생성자 파라미터를 타입 `U`로 선언합니다.
    pub fn parameter<U: ?Sized + 'static>(self) -> Self {
        self.parameter_type(&TypeInfo::of::<U>())
    }

    pub fn parameter_type(mut self, parameter: &TypeInfo) -> Self {
        self.descriptor.parameters.push(Some(parameter.clone()));
        self
    }

    /// 타입을 추론할 수 없는 파라미터를 선언합니다.
    ///
    /// 임포트 재정의가 없으면 해당 파라미터는 해결에 실패합니다.
    pub fn untyped_parameter(mut self) -> Self {
        self.descriptor.parameters.push(None);
        self
    }

    /// `index`번째 파라미터의 임포트 타깃을 재정의합니다.
    pub fn import_as(mut self, index: usize, target: ImportTarget) -> Self {
        let overrides = &mut self.descriptor.import_overrides;
        if overrides.len() <= index {
            overrides.resize(index + 1, None);
        }
        overrides[index] = Some(target);
        self
    }

    /// 해결된 인자로 인스턴스를 만드는 생성자를 등록합니다.
    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn(ImportArguments) -> CompositionResult<T> + Send + Sync + 'static,
    {
        self.descriptor.constructor = Some(Arc::new(move |arguments| {
            constructor(arguments).map(|value| Arc::new(value) as Instance)
        }));
        self
    }

    /// 타입 자신을 익스포트 타깃으로 선언합니다.
    pub fn export(self) -> Self {
        self.export_as(&[])
    }

    /// 타입 자신과 `bases`를 익스포트 타깃으로 선언합니다.
    pub fn export_as(mut self, bases: &[&TypeInfo]) -> Self {
        let keys = bases
            .iter()
            .map(|base| base.key())
            .chain(std::iter::once(self.descriptor.key));

        self.descriptor.export_targets = Some(ExportTargetSet::from_keys(keys));
        self
    }

    pub fn creation_policy(mut self, creation_policy: CreationPolicy) -> Self {
        self.descriptor.creation_policy = Some(creation_policy);
        self
    }

    /// 타입 수준 메타데이터를 추가합니다.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.descriptor.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> TypeInfo {
        TypeInfo(Arc::new(self.descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Shape: Send + Sync {
        fn sides(&self) -> u32;
    }

    trait Polygon: Send + Sync {}

    struct Square;

    impl Shape for Square {
        fn sides(&self) -> u32 {
            4
        }
    }

    struct Circle;

    #[test]
    fn test_identity_equality() {
        let a = TypeInfo::of::<Square>();
        let b = TypeInfo::builder::<Square>().build();

        assert_eq!(a, b);
        assert_ne!(a, TypeInfo::of::<Circle>());
        assert_eq!(a.name(), "Square");
        assert_eq!(TypeInfo::of::<dyn Shape>().name(), "dyn Shape");
    }

    #[test]
    fn test_derivation_is_strict_and_transitive() {
        let polygon = TypeInfo::of::<dyn Polygon>();
        let shape = TypeInfo::builder::<Circle>().derives_from(&polygon).build();
        let square = TypeInfo::builder::<Square>().derives_from(&shape).build();

        assert!(square.is_derived_from(&shape));
        assert!(square.is_derived_from(&polygon));
        assert!(!square.is_derived_from(&square));
        assert!(!polygon.is_derived_from(&square));
    }

    #[test]
    fn test_cast_as_registers_ancestor_and_caster() {
        let shape = TypeInfo::of::<dyn Shape>();
        let square = TypeInfo::builder::<Square>()
            .implements(&shape, |s| s as Arc<dyn Shape>)
            .constructor(|_| Ok(Square))
            .build();

        assert!(square.is_derived_from(&shape));

        let instance = square
            .construct(ImportArguments::new("Square", Vec::new()))
            .unwrap();
        let as_shape = square.cast::<dyn Shape>(&instance).unwrap();
        let as_square = square.cast::<Square>(&instance).unwrap();

        assert_eq!(as_shape.sides(), 4);
        assert!(Arc::ptr_eq(&as_square, &instance.clone().downcast::<Square>().unwrap()));
        assert!(square.cast::<Circle>(&instance).is_none());
    }

    #[test]
    fn test_missing_constructor() {
        let shape = TypeInfo::of::<dyn Shape>();
        let result = shape.construct(ImportArguments::new("dyn Shape", Vec::new()));

        assert!(!shape.is_constructible());
        assert!(matches!(result, Err(CompositionError::NotConstructible { .. })));
    }

    #[test]
    fn test_declarations() {
        let shape = TypeInfo::of::<dyn Shape>();
        let square = TypeInfo::builder::<Square>()
            .parameter::<Circle>()
            .untyped_parameter()
            .import_as(3, ImportTarget::Type(TypeInfo::of::<Circle>()))
            .export_as(&[&shape])
            .creation_policy(CreationPolicy::Shared)
            .metadata("sides", 4)
            .named("UnitSquare")
            .build();

        assert_eq!(square.name(), "UnitSquare");
        assert_eq!(square.parameters().len(), 2);
        assert!(square.parameters()[1].is_none());
        assert_eq!(square.import_overrides().len(), 4);
        assert!(square.import_overrides()[3].is_some());
        assert!(square.import_overrides()[0].is_none());
        assert_eq!(square.declared_creation_policy(), Some(CreationPolicy::Shared));
        assert_eq!(square.get_metadata("sides"), Some(&Value::from(4)));

        let targets = square.declared_export_targets().unwrap();
        assert!(targets.has(&shape));
        assert!(targets.has(&square));
    }
}
