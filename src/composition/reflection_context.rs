//! # Reflection Context
//!
//! 카탈로그가 사용하는 교체 가능한 정책 객체입니다.
//!
//! - `meets_context`: 리플렉션 타입을 카탈로그의 대상으로 포함할지 결정
//! - `get_export`: 리플렉션 타입을 요청된 익스포트 타깃으로 내보낼 방법 결정
//!
//! 구현체:
//!
//! | 구현체 | 동작 |
//! |--------|------|
//! | `DefaultReflectionContext` | 타입에 선언된 `export_as`/`creation_policy`/`metadata` 사용 |
//! | `RegistrationBuilder` | 관례 기반 규칙 중 우선순위가 가장 높은 규칙 사용 |
//! | `TypedExportBuilder` | 규칙 하나 |

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::composition::export_builders::{ReflectionExporter, deferred_export};
use crate::composition::{CreationPolicy, ExportProvider, LazyExport, MetadataProvider, TypeMetadataProvider};
use crate::core::errors::CompositionResult;
use crate::reflection::TypeInfo;

#[async_trait]
pub trait ReflectionContext: Send + Sync {
    /// `reflected`가 현재 컨텍스트를 만족하는지 확인합니다.
    fn meets_context(&self, reflected: &TypeInfo) -> bool;

    /// `reflected`를 `target`으로 익스포트합니다.
    ///
    /// 현재 컨텍스트가 `reflected`를 `target`으로 내보내지 않으면 `None`을 반환합니다.
    async fn get_export(
        &self,
        reflected: &TypeInfo,
        target: &TypeInfo,
        provider: &Arc<dyn ExportProvider>,
    ) -> CompositionResult<Option<LazyExport>>;
}

/// 타입에 선언된 익스포트 정보를 사용하는 기본 컨텍스트
///
/// 모든 타입이 컨텍스트를 만족하지만, `export`/`export_as`를 선언하지 않은
/// 타입은 아무 타깃으로도 익스포트되지 않습니다.
/// `Shared` 인스턴스는 프로바이더의 `SharedExports`에 저장됩니다.
pub struct DefaultReflectionContext {
    id: Uuid,
}

impl Default for DefaultReflectionContext {
    fn default() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl DefaultReflectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_export(reflected: &TypeInfo, provider: &Arc<dyn ExportProvider>) -> LazyExport {
        let metadata: Arc<dyn MetadataProvider> = Arc::new(TypeMetadataProvider::new(reflected.clone()));

        deferred_export(reflected, metadata, provider, ReflectionExporter::factory(), None)
    }
}

#[async_trait]
impl ReflectionContext for DefaultReflectionContext {
    fn meets_context(&self, _reflected: &TypeInfo) -> bool {
        true
    }

    async fn get_export(
        &self,
        reflected: &TypeInfo,
        target: &TypeInfo,
        provider: &Arc<dyn ExportProvider>,
    ) -> CompositionResult<Option<LazyExport>> {
        let Some(export_targets) = reflected.declared_export_targets() else {
            return Ok(None);
        };

        if !export_targets.has(target) || !export_targets.is_export_target(reflected) {
            return Ok(None);
        }

        let creation_policy = reflected.declared_creation_policy().unwrap_or_default();
        log::trace!("{} as {} ({:?})", reflected.name(), target.name(), creation_policy);

        let export = match creation_policy {
            CreationPolicy::NonShared => Self::create_export(reflected, provider),
            CreationPolicy::Shared => provider
                .shared_exports()
                .get_or_insert_with(self.id, reflected, || Self::create_export(reflected, provider)),
        };

        Ok(Some(export))
    }
}
