//! # Registration Builder
//!
//! 관례 기반 규칙을 모아 하나의 `ReflectionContext`로 동작합니다.
//! Spring의 `@Bean` 팩토리 메서드와 컴포넌트 스캔 필터를 합친 역할입니다.
//!
//! ## 규칙 선택
//!
//! ```text
//! get_export(reflected, target)
//!   ├─ meets_context(reflected)를 만족하는 규칙 수집
//!   ├─ 없으면 None
//!   ├─ 우선순위 내림차순 정렬 (같은 우선순위는 먼저 등록된 규칙 우선)
//!   └─ 최상위 규칙에만 위임
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let mut registration = RegistrationBuilder::new();
//!
//! registration
//!     .for_types_derived_from(&TypeInfo::of::<dyn Plugin>())
//!     .add_metadata("kind", "plugin")
//!     .export_as(&[&TypeInfo::of::<dyn Plugin>()])
//!     .set_creation_policy(CreationPolicy::Shared);
//!
//! registration
//!     .for_type(&TypeInfo::of::<Settings>())
//!     .construct_with(|_provider, _type_info| async { Ok(Arc::new(Settings::load())) });
//!
//! let catalog = TypeCatalog::new(types, Some(Arc::new(registration)));
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::composition::export_builders::{
    DerivedTypeExportBuilder, ExportBuilderOptions, PredicateExportBuilder, TypeExportBuilder,
    TypedExportBuilder,
};
use crate::composition::{ExportProvider, LazyExport, ReflectionContext};
use crate::core::errors::CompositionResult;
use crate::reflection::TypeInfo;

/// 관례 기반 익스포트 규칙 모음
#[derive(Default)]
pub struct RegistrationBuilder {
    export_builders: Vec<TypedExportBuilder>,
}

impl RegistrationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 정확히 `target` 타입에 적용되는 규칙을 등록합니다.
    pub fn for_type(&mut self, target: &TypeInfo) -> ExportBuilderOptions<'_> {
        self.register(TypedExportBuilder::new(TypeExportBuilder::new(target)))
    }

    /// `base`에서 파생된 타입에 적용되는 규칙을 등록합니다.
    pub fn for_types_derived_from(&mut self, base: &TypeInfo) -> ExportBuilderOptions<'_> {
        self.register(TypedExportBuilder::new(DerivedTypeExportBuilder::new(base)))
    }

    /// `predicate`를 만족하는 타입에 적용되는 규칙을 등록합니다.
    ///
    /// `export_as`를 지정하지 않으면 매칭된 타입 자신으로만 익스포트됩니다.
    pub fn for_types_matching<P>(&mut self, predicate: P) -> ExportBuilderOptions<'_>
    where
        P: Fn(&TypeInfo) -> bool + Send + Sync + 'static,
    {
        self.register(TypedExportBuilder::new(PredicateExportBuilder::new(predicate)))
    }

    /// 등록된 규칙 (등록 순서)
    pub fn export_builders(&self) -> &[TypedExportBuilder] {
        &self.export_builders
    }

    fn register(&mut self, export_builder: TypedExportBuilder) -> ExportBuilderOptions<'_> {
        let index = self.export_builders.len();
        self.export_builders.push(export_builder);

        ExportBuilderOptions::new(&mut self.export_builders[index])
    }
}

#[async_trait]
impl ReflectionContext for RegistrationBuilder {
    fn meets_context(&self, reflected: &TypeInfo) -> bool {
        self.export_builders
            .iter()
            .any(|export_builder| export_builder.meets_context(reflected))
    }

    async fn get_export(
        &self,
        reflected: &TypeInfo,
        target: &TypeInfo,
        provider: &Arc<dyn ExportProvider>,
    ) -> CompositionResult<Option<LazyExport>> {
        let mut candidates: Vec<&TypedExportBuilder> = self
            .export_builders
            .iter()
            .filter(|export_builder| export_builder.meets_context(reflected))
            .collect();

        // 안정 정렬: 같은 우선순위는 등록 순서 유지
        candidates.sort_by(|a, b| b.priority().cmp(&a.priority()));

        let Some(selected) = candidates.first() else {
            return Ok(None);
        };

        log::debug!(
            "📋 {} 규칙 선택: 우선순위 {} (후보 {}개)",
            reflected.name(),
            selected.priority(),
            candidates.len()
        );

        selected.get_export(reflected, target, provider).await
    }
}
