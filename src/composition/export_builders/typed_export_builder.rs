//! # Typed Export Builder
//!
//! 리플렉션 타입을 익스포트 타깃에 연결하는 규칙(rule)입니다.
//! 규칙마다 우선순위, 익스포트 타깃, 메타데이터, 생성 정책, 생성 함수를 가집니다.
//!
//! ## 우선순위
//!
//! | 규칙 | 기본 우선순위 | `construct_with*` 적용 후 |
//! |------|---------------|---------------------------|
//! | `TypeExportBuilder` | 300 | 4800 |
//! | `DerivedTypeExportBuilder` | 200 | 3200 |
//! | `PredicateExportBuilder` | 100 | 1600 |
//!
//! 생성 방법을 직접 지정한 규칙은 관례 기반 매칭보다 항상 우선합니다.
//! 우선순위 상승은 `construct_with*` 호출마다 16배이며 `u32::MAX`에서 멈춥니다.
//!
//! `Shared` 익스포트는 규칙 식별자를 키로 프로바이더의 `SharedExports`에
//! 저장됩니다. 규칙 자체는 인스턴스를 보관하지 않습니다.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::composition::export_builders::{ExportFactory, ExportTargetSet, ReflectionExporter};
use crate::composition::{
    CreationPolicy, ExportProvider, ImportTarget, LazyExport, MetadataProvider, ReflectionContext,
    RuleMetadataProvider,
};
use crate::core::errors::{CompositionError, CompositionResult};
use crate::reflection::TypeInfo;

/// 규칙이 어떤 리플렉션 타입에 적용되는지 결정합니다.
pub trait TypeMatcher: Send + Sync {
    fn base_priority(&self) -> u32;

    /// 규칙의 기본 익스포트 타깃 (`None`이면 매칭된 타입 자신으로만 익스포트)
    fn default_export_target(&self) -> Option<TypeInfo>;

    fn matches(&self, reflected: &TypeInfo) -> bool;
}

/// 매처와 익스포트 설정을 가진 규칙
pub struct TypedExportBuilder {
    id: Uuid,
    matcher: Box<dyn TypeMatcher>,
    priority: u32,
    export_targets: Option<ExportTargetSet>,
    import_targets: Option<Vec<ImportTarget>>,
    metadata: HashMap<String, Value>,
    creation_policy: CreationPolicy,
    factory: ExportFactory,
}

impl TypedExportBuilder {
    pub fn new(matcher: impl TypeMatcher + 'static) -> Self {
        let export_targets = matcher
            .default_export_target()
            .map(|target| ExportTargetSet::new(&[&target]));

        Self {
            id: Uuid::new_v4(),
            priority: matcher.base_priority(),
            matcher: Box::new(matcher),
            export_targets,
            import_targets: None,
            metadata: HashMap::new(),
            creation_policy: CreationPolicy::NonShared,
            factory: ReflectionExporter::factory(),
        }
    }

    /// 프로바이더의 공유 익스포트 저장소에서 이 규칙을 구분하는 식별자
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn creation_policy(&self) -> CreationPolicy {
        self.creation_policy
    }

    pub fn export_targets(&self) -> Option<&ExportTargetSet> {
        self.export_targets.as_ref()
    }

    pub fn set_creation_policy(&mut self, creation_policy: CreationPolicy) {
        self.creation_policy = creation_policy;
    }

    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// 익스포트 타깃을 `bases`로 교체합니다. 빈 목록은 무시됩니다.
    pub fn export_as(&mut self, bases: &[&TypeInfo]) {
        if bases.is_empty() {
            return;
        }
        self.export_targets = Some(ExportTargetSet::new(bases));
    }

    /// 생성 함수를 교체하고 우선순위를 올립니다.
    pub fn construct_with(&mut self, factory: ExportFactory) {
        self.factory = factory;
        self.escalate_priority();
    }

    /// 파라미터별 임포트 타깃을 지정하고 우선순위를 올립니다.
    pub fn construct_with_imports(&mut self, imports: Vec<ImportTarget>) {
        self.import_targets = Some(imports);
        self.escalate_priority();
    }

    fn escalate_priority(&mut self) {
        self.priority = self.priority.saturating_mul(16);
    }

    fn is_export_target_of(&self, reflected: &TypeInfo) -> bool {
        self.export_targets
            .as_ref()
            .is_none_or(|targets| targets.is_export_target(reflected))
    }

    fn create_export(&self, reflected: &TypeInfo, provider: &Arc<dyn ExportProvider>) -> LazyExport {
        let metadata: Arc<dyn MetadataProvider> =
            Arc::new(RuleMetadataProvider::new(reflected.clone(), Arc::new(self.metadata.clone())));

        deferred_export(
            reflected,
            metadata,
            provider,
            self.factory.clone(),
            self.import_targets.clone(),
        )
    }
}

#[async_trait]
impl ReflectionContext for TypedExportBuilder {
    fn meets_context(&self, reflected: &TypeInfo) -> bool {
        self.matcher.matches(reflected) && self.is_export_target_of(reflected)
    }

    async fn get_export(
        &self,
        reflected: &TypeInfo,
        target: &TypeInfo,
        provider: &Arc<dyn ExportProvider>,
    ) -> CompositionResult<Option<LazyExport>> {
        let exported_as_target = self
            .export_targets
            .as_ref()
            .is_some_and(|targets| targets.has(target));

        if reflected != target && !exported_as_target {
            return Ok(None);
        }

        let export = match self.creation_policy {
            CreationPolicy::NonShared => self.create_export(reflected, provider),
            CreationPolicy::Shared => provider
                .shared_exports()
                .get_or_insert_with(self.id, reflected, || self.create_export(reflected, provider)),
        };

        log::trace!(
            "규칙(우선순위 {}) → {} as {} ({:?})",
            self.priority,
            reflected.name(),
            target.name(),
            self.creation_policy
        );
        Ok(Some(export))
    }
}

/// 프로바이더를 약한 참조로 보관하는 지연 익스포트를 만듭니다.
///
/// 프로바이더의 공유 익스포트 저장소에 들어가도 순환 참조가 생기지 않으며,
/// 순환/깊이 검사는 프로바이더의 설정을 따릅니다.
pub(crate) fn deferred_export(
    reflected: &TypeInfo,
    metadata: Arc<dyn MetadataProvider>,
    provider: &Arc<dyn ExportProvider>,
    factory: ExportFactory,
    import_targets: Option<Vec<ImportTarget>>,
) -> LazyExport {
    let weak_provider = Arc::downgrade(provider);
    let config = provider.composition_config();
    let target = reflected.clone();

    LazyExport::with_config(reflected.clone(), metadata, config, move || async move {
        let provider = weak_provider
            .upgrade()
            .ok_or_else(|| CompositionError::ProviderDropped {
                type_name: target.name().to_string(),
            })?;

        factory(provider, target, import_targets).await
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::composition::export_builders::TypeExportBuilder;

    struct Widget;

    #[test]
    fn test_priority_escalation_saturates() {
        let mut export_builder = TypedExportBuilder::new(TypeExportBuilder::new(&TypeInfo::of::<Widget>()));

        export_builder.construct_with_imports(Vec::new());
        assert_eq!(export_builder.priority(), 4800);

        for _ in 0..10 {
            export_builder.construct_with(ReflectionExporter::factory());
        }
        assert_eq!(export_builder.priority(), u32::MAX);
    }

    #[test]
    fn test_rules_have_distinct_ids() {
        let first = TypedExportBuilder::new(TypeExportBuilder::new(&TypeInfo::of::<Widget>()));
        let second = TypedExportBuilder::new(TypeExportBuilder::new(&TypeInfo::of::<Widget>()));

        assert_ne!(first.id(), second.id());
    }
}
