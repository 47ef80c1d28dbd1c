use std::sync::Arc;

use async_trait::async_trait;

use crate::catalogs::{CatalogSource, ComposableCatalog, ReflectionItem};
use crate::composition::ReflectionContext;
use crate::config::CompositionConfig;
use crate::core::errors::CompositionResult;
use crate::reflection::TypeInfo;

/// 고정된 타입 목록
pub struct TypeSource {
    types: Vec<TypeInfo>,
}

#[async_trait]
impl CatalogSource for TypeSource {
    async fn on_enumerate(&self) -> CompositionResult<Vec<ReflectionItem>> {
        Ok(self.types.iter().cloned().map(ReflectionItem::Type).collect())
    }
}

/// 주어진 타입 목록을 후보로 사용하는 카탈로그
pub type TypeCatalog = ComposableCatalog<TypeSource>;

impl ComposableCatalog<TypeSource> {
    pub fn new(
        types: impl IntoIterator<Item = TypeInfo>,
        reflection_context: Option<Arc<dyn ReflectionContext>>,
    ) -> Arc<Self> {
        let source = TypeSource {
            types: types.into_iter().collect(),
        };

        Self::with_source(source, reflection_context)
    }

    /// 순환/깊이 검사에 `config`를 사용하는 카탈로그를 만듭니다.
    pub fn with_config(
        types: impl IntoIterator<Item = TypeInfo>,
        reflection_context: Option<Arc<dyn ReflectionContext>>,
        config: CompositionConfig,
    ) -> Arc<Self> {
        let source = TypeSource {
            types: types.into_iter().collect(),
        };

        Self::with_source_and_config(source, reflection_context, config)
    }
}
