//! 익스포트 메타데이터 조회
//!
//! 지연 익스포트는 값을 평가하지 않고도 메타데이터를 조회할 수 있습니다.
//! 규칙(rule) 수준 메타데이터는 같은 키의 타입 수준 메타데이터를 가립니다.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::reflection::TypeInfo;

/// 키로 메타데이터 값을 조회하는 인터페이스
pub trait MetadataProvider: Send + Sync {
    fn get_metadata(&self, key: &str) -> Option<Value>;
}

/// 타입에 선언된 메타데이터만 조회합니다.
pub struct TypeMetadataProvider {
    type_info: TypeInfo,
}

impl TypeMetadataProvider {
    pub fn new(type_info: TypeInfo) -> Self {
        Self { type_info }
    }
}

impl MetadataProvider for TypeMetadataProvider {
    fn get_metadata(&self, key: &str) -> Option<Value> {
        self.type_info.get_metadata(key).cloned()
    }
}

/// 규칙 메타데이터를 먼저 조회하고 없으면 타입 메타데이터로 대체합니다.
pub struct RuleMetadataProvider {
    metadata: Arc<HashMap<String, Value>>,
    fallback: TypeMetadataProvider,
}

impl RuleMetadataProvider {
    pub fn new(type_info: TypeInfo, metadata: Arc<HashMap<String, Value>>) -> Self {
        Self {
            metadata,
            fallback: TypeMetadataProvider::new(type_info),
        }
    }
}

impl MetadataProvider for RuleMetadataProvider {
    fn get_metadata(&self, key: &str) -> Option<Value> {
        self.metadata
            .get(key)
            .cloned()
            .or_else(|| self.fallback.get_metadata(key))
    }
}
