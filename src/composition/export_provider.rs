//! # Export Provider
//!
//! 컴포지션 엔진의 유일한 소비자용 계약입니다.
//!
//! ```text
//! get_exports(T)          -> Vec<LazyExport>   // 모든 매칭, 비어 있을 수 있음
//! get_exported_values(T)  -> Vec<ExportedValue>
//! get_export(T)           -> LazyExport        // 정확히 하나여야 함
//! get_exported_value(T)   -> ExportedValue
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::composition::{LazyExport, SharedExports};
use crate::config::CompositionConfig;
use crate::core::errors::{CompositionError, CompositionResult};
use crate::reflection::{ExportedValue, TypeInfo};

/// 익스포트를 제공하는 객체
///
/// 구현체는 `provider_id`, `shared_exports`, `get_exports`를 구현하고 나머지는
/// 기본 구현을 사용합니다.
#[async_trait]
pub trait ExportProvider: Send + Sync {
    fn provider_id(&self) -> Uuid;

    /// 이 프로바이더가 소유하는 `Shared` 익스포트 저장소
    fn shared_exports(&self) -> &SharedExports;

    /// 이 프로바이더에서 시작된 해결에 적용할 설정
    fn composition_config(&self) -> CompositionConfig {
        CompositionConfig::current()
    }

    /// `target`으로 익스포트되는 모든 지연 익스포트를 반환합니다.
    async fn get_exports(&self, target: &TypeInfo) -> CompositionResult<Vec<LazyExport>>;

    /// `target`으로 익스포트되는 모든 값을 순서대로 평가해 반환합니다.
    async fn get_exported_values(&self, target: &TypeInfo) -> CompositionResult<Vec<ExportedValue>> {
        let exports = self.get_exports(target).await?;
        let mut values = Vec::with_capacity(exports.len());

        for export in exports {
            values.push(export.value().await?);
        }

        Ok(values)
    }

    /// `target`의 유일한 익스포트를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `ImportCardinalityMismatch` - 매칭이 0개이거나 2개 이상
    async fn get_export(&self, target: &TypeInfo) -> CompositionResult<LazyExport> {
        let mut exports = self.get_exports(target).await?;

        if exports.len() != 1 {
            log::debug!("익스포트 개수 불일치: {} ({}개)", target.name(), exports.len());
            return Err(CompositionError::ImportCardinalityMismatch {
                type_name: target.name().to_string(),
                found: exports.len(),
            });
        }

        Ok(exports.remove(0))
    }

    /// `target`의 유일한 익스포트를 평가해 반환합니다.
    async fn get_exported_value(&self, target: &TypeInfo) -> CompositionResult<ExportedValue> {
        self.get_export(target).await?.value().await
    }
}
