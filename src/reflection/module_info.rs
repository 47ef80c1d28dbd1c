//! 모듈 서술자
//!
//! 모듈은 이름이 붙은 타입 서술자 묶음입니다. 모듈 카탈로그는 모듈을 열거해
//! 그 안의 타입을 리플렉션 대상으로 사용합니다.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::registry;
use crate::reflection::TypeInfo;

/// 이름과 타입 목록을 가진 모듈
///
/// 타입 목록은 등록 순서를 유지하며 같은 타입은 한 번만 포함됩니다.
#[derive(Clone, Debug)]
pub struct ModuleInfo {
    name: String,
    types: Arc<Vec<TypeInfo>>,
}

impl ModuleInfo {
    pub fn new(name: impl Into<String>, types: impl IntoIterator<Item = TypeInfo>) -> Self {
        let mut seen = HashSet::new();
        let types = types
            .into_iter()
            .filter(|type_info| seen.insert(type_info.type_id()))
            .collect();

        Self {
            name: name.into(),
            types: Arc::new(types),
        }
    }

    /// `inventory`로 등록된 타입들로 모듈을 구성합니다.
    pub fn registered(name: &str) -> Self {
        Self::new(name, registry::registered_types(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
