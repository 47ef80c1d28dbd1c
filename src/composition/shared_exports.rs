//! # Shared Exports
//!
//! `Shared` 정책 익스포트의 프로바이더별 저장소입니다.
//!
//! 저장소는 프로바이더(카탈로그)가 소유하므로 싱글톤 인스턴스는 프로바이더와
//! 함께 해제됩니다. 같은 리플렉션 컨텍스트를 여러 프로바이더가 공유해도
//! 컨텍스트 쪽에는 인스턴스가 남지 않습니다.
//!
//! ```text
//! 키: (규칙/컨텍스트 식별자, 리플렉션 타입)
//! 값: LazyExport (최초 평가 결과를 보관)
//! ```

use std::any::TypeId;
use std::collections::HashMap;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::composition::LazyExport;
use crate::reflection::TypeInfo;

/// 프로바이더가 소유하는 공유 익스포트 저장소
#[derive(Default)]
pub struct SharedExports {
    exports: Mutex<HashMap<(Uuid, TypeId), LazyExport>>,
}

impl SharedExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// `owner` 규칙이 `reflected`에 대해 만든 공유 익스포트를 반환합니다.
    /// 없으면 `create`로 만들어 저장합니다.
    pub fn get_or_insert_with<F>(&self, owner: Uuid, reflected: &TypeInfo, create: F) -> LazyExport
    where
        F: FnOnce() -> LazyExport,
    {
        self.exports
            .lock()
            .entry((owner, reflected.type_id()))
            .or_insert_with(create)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.exports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::composition::TypeMetadataProvider;
    use crate::core::errors::CompositionError;

    struct Cache;

    fn export(type_info: &TypeInfo) -> LazyExport {
        let metadata = Arc::new(TypeMetadataProvider::new(type_info.clone()));
        LazyExport::new(type_info.clone(), metadata, || async {
            Err(CompositionError::NotConstructible {
                type_name: "Cache".to_string(),
            })
        })
    }

    #[test]
    fn test_entry_is_created_once_per_owner() {
        let shared = SharedExports::new();
        let cache = TypeInfo::of::<Cache>();
        let owner = Uuid::new_v4();

        let first = shared.get_or_insert_with(owner, &cache, || export(&cache));
        let second = shared.get_or_insert_with(owner, &cache, || export(&cache));
        let other = shared.get_or_insert_with(Uuid::new_v4(), &cache, || export(&cache));

        assert!(first.ptr_eq(&second));
        assert!(!first.ptr_eq(&other));
        assert_eq!(shared.len(), 2);
    }
}
