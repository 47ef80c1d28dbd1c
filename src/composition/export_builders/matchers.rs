//! 규칙 종류별 타입 매처

use std::fmt;

use crate::composition::export_builders::TypeMatcher;
use crate::reflection::TypeInfo;

/// 정확히 같은 타입에만 적용되는 규칙 (우선순위 300)
pub struct TypeExportBuilder {
    target: TypeInfo,
}

impl TypeExportBuilder {
    pub fn new(target: &TypeInfo) -> Self {
        Self { target: target.clone() }
    }
}

impl TypeMatcher for TypeExportBuilder {
    fn base_priority(&self) -> u32 {
        300
    }

    fn default_export_target(&self) -> Option<TypeInfo> {
        Some(self.target.clone())
    }

    fn matches(&self, reflected: &TypeInfo) -> bool {
        *reflected == self.target
    }
}

/// 기반 타입에서 파생된 타입에 적용되는 규칙 (우선순위 200)
///
/// 기반 타입 자신은 매칭되지 않습니다.
pub struct DerivedTypeExportBuilder {
    base: TypeInfo,
}

impl DerivedTypeExportBuilder {
    pub fn new(base: &TypeInfo) -> Self {
        Self { base: base.clone() }
    }
}

impl TypeMatcher for DerivedTypeExportBuilder {
    fn base_priority(&self) -> u32 {
        200
    }

    fn default_export_target(&self) -> Option<TypeInfo> {
        Some(self.base.clone())
    }

    fn matches(&self, reflected: &TypeInfo) -> bool {
        reflected.is_derived_from(&self.base)
    }
}

/// 임의의 조건 함수에 적용되는 규칙 (우선순위 100)
pub struct PredicateExportBuilder {
    predicate: Box<dyn Fn(&TypeInfo) -> bool + Send + Sync>,
}

impl PredicateExportBuilder {
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&TypeInfo) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl TypeMatcher for PredicateExportBuilder {
    fn base_priority(&self) -> u32 {
        100
    }

    fn default_export_target(&self) -> Option<TypeInfo> {
        None
    }

    fn matches(&self, reflected: &TypeInfo) -> bool {
        (self.predicate)(reflected)
    }
}

impl fmt::Debug for PredicateExportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PredicateExportBuilder")
    }
}
