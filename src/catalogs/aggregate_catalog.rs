use std::sync::Arc;

use async_trait::async_trait;

use crate::catalogs::{Catalog, CatalogSource, ComposableCatalog, ReflectionItem};
use crate::composition::ReflectionContext;
use crate::core::errors::CompositionResult;

/// 하위 카탈로그 목록
///
/// 각 하위 카탈로그가 이미 필터링한 리플렉션 대상을 다시 열거합니다.
pub struct AggregateSource {
    catalogs: Vec<Arc<dyn Catalog>>,
}

impl AggregateSource {
    pub fn catalogs(&self) -> &[Arc<dyn Catalog>] {
        &self.catalogs
    }
}

#[async_trait]
impl CatalogSource for AggregateSource {
    async fn on_enumerate(&self) -> CompositionResult<Vec<ReflectionItem>> {
        let mut items = Vec::new();

        for catalog in &self.catalogs {
            let targets = catalog.get_reflection_targets().await?;
            items.extend(targets.iter().cloned().map(ReflectionItem::Type));
        }

        Ok(items)
    }
}

/// 여러 카탈로그의 리플렉션 대상 합집합을 후보로 사용하는 카탈로그
pub type AggregateCatalog = ComposableCatalog<AggregateSource>;

impl ComposableCatalog<AggregateSource> {
    pub fn new(
        catalogs: Vec<Arc<dyn Catalog>>,
        reflection_context: Option<Arc<dyn ReflectionContext>>,
    ) -> Arc<Self> {
        log::debug!("🧩 집계 카탈로그: 하위 카탈로그 {}개", catalogs.len());
        Self::with_source(AggregateSource { catalogs }, reflection_context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::catalogs::TypeCatalog;
    use crate::composition::{ExportProvider, RegistrationBuilder};
    use crate::reflection::TypeInfo;

    struct Alpha;
    struct Beta;
    struct Gamma;

    fn alpha() -> TypeInfo {
        TypeInfo::builder::<Alpha>().constructor(|_| Ok(Alpha)).export().build()
    }

    fn beta() -> TypeInfo {
        TypeInfo::builder::<Beta>().constructor(|_| Ok(Beta)).export().build()
    }

    fn gamma() -> TypeInfo {
        TypeInfo::builder::<Gamma>().constructor(|_| Ok(Gamma)).export().build()
    }

    #[tokio::test]
    async fn test_union_without_duplicates() {
        let first: Arc<dyn Catalog> = TypeCatalog::new(vec![alpha(), beta()], None);
        let second: Arc<dyn Catalog> = TypeCatalog::new(vec![beta(), gamma()], None);
        let aggregate = AggregateCatalog::new(vec![first, second], None);

        let targets = aggregate.get_reflection_targets().await.unwrap();

        assert_eq!(targets.len(), 3);
        for type_info in [alpha(), beta(), gamma()] {
            assert!(targets.contains(&type_info));
        }

        let again = aggregate.get_reflection_targets().await.unwrap();
        assert!(Arc::ptr_eq(&targets, &again));
    }

    #[tokio::test]
    async fn test_child_filtering_is_preserved() {
        let mut builder = RegistrationBuilder::new();
        builder.for_type(&alpha());
        let context: Arc<dyn ReflectionContext> = Arc::new(builder);

        let filtered: Arc<dyn Catalog> = TypeCatalog::new(vec![alpha(), beta()], Some(context));
        let aggregate = AggregateCatalog::new(vec![filtered], None);

        let targets = aggregate.get_reflection_targets().await.unwrap();

        assert_eq!(targets.len(), 1);
        assert!(!targets.contains(&beta()));
    }

    #[tokio::test]
    async fn test_aggregate_exports_through_own_context() {
        let first: Arc<dyn Catalog> = TypeCatalog::new(vec![alpha()], None);
        let second: Arc<dyn Catalog> = TypeCatalog::new(vec![alpha(), gamma()], None);
        let aggregate = AggregateCatalog::new(vec![first, second], None);

        // 중복된 Alpha는 한 번만 익스포트됨
        assert_eq!(aggregate.get_exports(&alpha()).await.unwrap().len(), 1);
        assert!(aggregate.get_exported_value(&gamma()).await.is_ok());
        assert_eq!(aggregate.source().catalogs().len(), 2);
    }
}
