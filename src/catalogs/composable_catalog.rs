//! # Composable Catalog
//!
//! 후보 타입을 열거하고 리플렉션 컨텍스트로 필터링해 익스포트를 제공하는
//! 카탈로그의 공통 구현입니다. 열거 방식만 `CatalogSource`로 분리되어 있습니다.
//!
//! ## 메모이제이션
//!
//! `get_reflection_targets()`는 카탈로그 인스턴스마다 한 번만 계산되며 이후 같은
//! 집합(`Arc`)을 반환합니다. 무효화 API는 없으며, 다시 열거하려면 새 카탈로그를
//! 만들어야 합니다.
//!
//! ## 수명
//!
//! `Shared` 익스포트와 그 인스턴스는 카탈로그의 `SharedExports`에 저장되어
//! 카탈로그가 해제될 때 함께 해제됩니다.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::composition::{DefaultReflectionContext, ExportProvider, LazyExport, ReflectionContext, SharedExports};
use crate::config::CompositionConfig;
use crate::core::errors::{CompositionError, CompositionResult};
use crate::reflection::{ModuleInfo, TypeInfo};

/// 카탈로그 소스가 열거하는 항목
#[derive(Clone, Debug)]
pub enum ReflectionItem {
    Type(TypeInfo),
    Module(ModuleInfo),
}

/// 카탈로그의 후보 타입 열거 방식
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    async fn on_enumerate(&self) -> CompositionResult<Vec<ReflectionItem>>;
}

/// 리플렉션 대상 집합을 노출하는 익스포트 프로바이더
#[async_trait]
pub trait Catalog: ExportProvider {
    async fn get_reflection_targets(&self) -> CompositionResult<Arc<ReflectionTargets>>;
}

/// 중복 없는 리플렉션 타입 집합 (열거 순서 유지)
#[derive(Default)]
pub struct ReflectionTargets {
    types: Vec<TypeInfo>,
    ids: HashSet<TypeId>,
}

impl ReflectionTargets {
    /// 새 타입이면 추가하고 `true`를 반환합니다.
    pub fn insert(&mut self, type_info: TypeInfo) -> bool {
        if !self.ids.insert(type_info.type_id()) {
            return false;
        }
        self.types.push(type_info);
        true
    }

    pub fn contains(&self, type_info: &TypeInfo) -> bool {
        self.ids.contains(&type_info.type_id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeInfo> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl fmt::Debug for ReflectionTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.types.iter().map(|t| t.name())).finish()
    }
}

/// 소스 `S`로 후보를 열거하는 카탈로그
///
/// 항상 `Arc`로 생성되며, 자기 자신을 익스포트 프로바이더로 리플렉션
/// 컨텍스트에 전달합니다.
pub struct ComposableCatalog<S> {
    id: Uuid,
    source: S,
    reflection_context: Arc<dyn ReflectionContext>,
    reflection_targets: OnceCell<Arc<ReflectionTargets>>,
    shared_exports: SharedExports,
    config: CompositionConfig,
    this: Weak<Self>,
}

impl<S: CatalogSource> ComposableCatalog<S> {
    /// `reflection_context`가 `None`이면 `DefaultReflectionContext`를 사용합니다.
    pub fn with_source(source: S, reflection_context: Option<Arc<dyn ReflectionContext>>) -> Arc<Self> {
        Self::with_source_and_config(source, reflection_context, CompositionConfig::current())
    }

    /// 전역 설정 대신 `config`로 해결 경로를 검사하는 카탈로그를 만듭니다.
    pub fn with_source_and_config(
        source: S,
        reflection_context: Option<Arc<dyn ReflectionContext>>,
        config: CompositionConfig,
    ) -> Arc<Self> {
        let reflection_context = reflection_context
            .unwrap_or_else(|| Arc::new(DefaultReflectionContext::new()) as Arc<dyn ReflectionContext>);

        Arc::new_cyclic(|this| Self {
            id: Uuid::new_v4(),
            source,
            reflection_context,
            reflection_targets: OnceCell::new(),
            shared_exports: SharedExports::new(),
            config,
            this: this.clone(),
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn reflection_context(&self) -> &Arc<dyn ReflectionContext> {
        &self.reflection_context
    }

    /// 컨텍스트를 만족하는 리플렉션 대상 집합 (최초 1회 계산)
    pub async fn get_reflection_targets(&self) -> CompositionResult<Arc<ReflectionTargets>> {
        self.reflection_targets
            .get_or_try_init(|| self.enumerate_targets())
            .await
            .cloned()
    }

    async fn enumerate_targets(&self) -> CompositionResult<Arc<ReflectionTargets>> {
        let mut targets = ReflectionTargets::default();

        for item in self.source.on_enumerate().await? {
            match item {
                ReflectionItem::Type(type_info) => self.accept(&mut targets, type_info),
                ReflectionItem::Module(module) => {
                    for type_info in module.types() {
                        self.accept(&mut targets, type_info.clone());
                    }
                }
            }
        }

        log::debug!("📚 카탈로그 {} 리플렉션 대상 {}개: {:?}", self.id, targets.len(), targets);
        Ok(Arc::new(targets))
    }

    fn accept(&self, targets: &mut ReflectionTargets, type_info: TypeInfo) {
        if self.reflection_context.meets_context(&type_info) {
            targets.insert(type_info);
        } else {
            log::trace!("{} 제외 (컨텍스트 불일치)", type_info.name());
        }
    }
}

#[async_trait]
impl<S: CatalogSource> ExportProvider for ComposableCatalog<S> {
    fn provider_id(&self) -> Uuid {
        self.id
    }

    fn shared_exports(&self) -> &SharedExports {
        &self.shared_exports
    }

    fn composition_config(&self) -> CompositionConfig {
        self.config.clone()
    }

    async fn get_exports(&self, target: &TypeInfo) -> CompositionResult<Vec<LazyExport>> {
        let provider: Arc<dyn ExportProvider> =
            self.this
                .upgrade()
                .ok_or_else(|| CompositionError::ProviderDropped {
                    type_name: target.name().to_string(),
                })?;

        let targets = self.get_reflection_targets().await?;
        let mut exports = Vec::new();

        for reflected in targets.iter() {
            if let Some(export) = self
                .reflection_context
                .get_export(reflected, target, &provider)
                .await?
            {
                exports.push(export);
            }
        }

        log::trace!("{} 익스포트 {}개", target.name(), exports.len());
        Ok(exports)
    }
}

#[async_trait]
impl<S: CatalogSource> Catalog for ComposableCatalog<S> {
    async fn get_reflection_targets(&self) -> CompositionResult<Arc<ReflectionTargets>> {
        ComposableCatalog::get_reflection_targets(self).await
    }
}
