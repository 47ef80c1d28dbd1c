//! # Composition Container
//!
//! 소비자가 익스포트를 조회하는 파사드입니다. Spring의 `ApplicationContext`처럼
//! 카탈로그(또는 임의의 `ExportProvider`)를 감싸고 타입 지정 헬퍼를 제공합니다.
//!
//! ```rust,ignore
//! let container = CompositionContainer::new(catalog);
//!
//! let logger: Arc<dyn Logger> = container.get_exported_value_of::<dyn Logger>().await?;
//! let plugins: Vec<Arc<dyn Plugin>> = container.get_exported_values_of::<dyn Plugin>().await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::composition::{ExportProvider, LazyExport, SharedExports};
use crate::config::CompositionConfig;
use crate::core::errors::CompositionResult;
use crate::reflection::TypeInfo;

/// 익스포트 프로바이더 파사드
#[derive(Clone)]
pub struct CompositionContainer {
    provider: Arc<dyn ExportProvider>,
}

impl CompositionContainer {
    pub fn new(provider: Arc<dyn ExportProvider>) -> Self {
        log::debug!("컴포지션 컨테이너 생성 (프로바이더 {})", provider.provider_id());
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn ExportProvider> {
        &self.provider
    }

    /// `T`의 유일한 익스포트 값을 `Arc<T>`로 반환합니다.
    pub async fn get_exported_value_of<T: ?Sized + 'static>(&self) -> CompositionResult<Arc<T>> {
        self.provider
            .get_exported_value(&TypeInfo::of::<T>())
            .await?
            .resolve::<T>()
    }

    /// `T`의 모든 익스포트 값을 `Arc<T>` 목록으로 반환합니다.
    pub async fn get_exported_values_of<T: ?Sized + 'static>(&self) -> CompositionResult<Vec<Arc<T>>> {
        self.provider
            .get_exported_values(&TypeInfo::of::<T>())
            .await?
            .iter()
            .map(|value| value.resolve::<T>())
            .collect()
    }

    pub async fn get_export_of<T: ?Sized + 'static>(&self) -> CompositionResult<LazyExport> {
        self.provider.get_export(&TypeInfo::of::<T>()).await
    }

    pub async fn get_exports_of<T: ?Sized + 'static>(&self) -> CompositionResult<Vec<LazyExport>> {
        self.provider.get_exports(&TypeInfo::of::<T>()).await
    }
}

#[async_trait]
impl ExportProvider for CompositionContainer {
    fn provider_id(&self) -> Uuid {
        self.provider.provider_id()
    }

    fn shared_exports(&self) -> &SharedExports {
        self.provider.shared_exports()
    }

    fn composition_config(&self) -> CompositionConfig {
        self.provider.composition_config()
    }

    async fn get_exports(&self, target: &TypeInfo) -> CompositionResult<Vec<LazyExport>> {
        self.provider.get_exports(target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::catalogs::TypeCatalog;
    use crate::composition::CreationPolicy;
    use crate::config::CompositionConfig;
    use crate::core::errors::CompositionError;

    trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> u64 {
            42
        }
    }

    struct Scheduler {
        clock: Arc<dyn Clock>,
    }

    struct Ping {
        _pong: Arc<Pong>,
    }

    struct Pong {
        _ping: Arc<Ping>,
    }

    fn clock() -> TypeInfo {
        TypeInfo::of::<dyn Clock>()
    }

    fn fixed_clock() -> TypeInfo {
        TypeInfo::builder::<FixedClock>()
            .implements(&clock(), |c| c as Arc<dyn Clock>)
            .constructor(|_| Ok(FixedClock))
            .export_as(&[&clock()])
            .creation_policy(CreationPolicy::Shared)
            .build()
    }

    fn scheduler() -> TypeInfo {
        TypeInfo::builder::<Scheduler>()
            .parameter::<dyn Clock>()
            .constructor(|args| Ok(Scheduler { clock: args.get(0)? }))
            .export()
            .build()
    }

    fn ping(policy: CreationPolicy) -> TypeInfo {
        TypeInfo::builder::<Ping>()
            .parameter::<Pong>()
            .constructor(|args| Ok(Ping { _pong: args.get(0)? }))
            .export()
            .creation_policy(policy)
            .build()
    }

    fn pong(policy: CreationPolicy) -> TypeInfo {
        TypeInfo::builder::<Pong>()
            .parameter::<Ping>()
            .constructor(|args| Ok(Pong { _ping: args.get(0)? }))
            .export()
            .creation_policy(policy)
            .build()
    }

    struct First {
        _next: Arc<Second>,
    }

    struct Second {
        _next: Arc<Third>,
    }

    struct Third;

    fn chain() -> Vec<TypeInfo> {
        vec![
            TypeInfo::builder::<First>()
                .parameter::<Second>()
                .constructor(|args| Ok(First { _next: args.get(0)? }))
                .export()
                .build(),
            TypeInfo::builder::<Second>()
                .parameter::<Third>()
                .constructor(|args| Ok(Second { _next: args.get(0)? }))
                .export()
                .build(),
            TypeInfo::builder::<Third>().constructor(|_| Ok(Third)).export().build(),
        ]
    }

    /// 첫 번째 실패 파라미터를 따라 가장 안쪽 원인을 찾습니다.
    fn root_cause(error: &CompositionError) -> &CompositionError {
        match error.import_target_errors().first().and_then(|e| e.inner()) {
            Some(inner) => root_cause(inner),
            None => error,
        }
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let catalog = TypeCatalog::new(vec![fixed_clock(), scheduler()], None);
        let container = CompositionContainer::new(catalog.clone());

        let scheduler = container.get_exported_value_of::<Scheduler>().await.unwrap();
        let clock = container.get_exported_value_of::<dyn Clock>().await.unwrap();

        assert_eq!(scheduler.clock.now(), 42);
        assert!(Arc::ptr_eq(&scheduler.clock, &clock));
        assert_eq!(container.get_exported_values_of::<dyn Clock>().await.unwrap().len(), 1);
        assert_eq!(container.get_exports_of::<Scheduler>().await.unwrap().len(), 1);
        assert!(container.get_export_of::<Scheduler>().await.is_ok());
        assert_eq!(container.provider_id(), catalog.provider_id());
    }

    #[tokio::test]
    async fn test_circular_dependency_is_reported() {
        for policy in [CreationPolicy::NonShared, CreationPolicy::Shared] {
            let catalog = TypeCatalog::new(vec![ping(policy), pong(policy)], None);
            let container = CompositionContainer::new(catalog);

            let error = match container.get_exported_value_of::<Ping>().await {
                Err(error) => error,
                Ok(_) => panic!("Expected composition failure"),
            };

            // Ping <0> → Pong <0> → CircularDependency
            let ping_errors = error.import_target_errors();
            assert_eq!(ping_errors.len(), 1);

            let pong_failure = ping_errors[0].inner().unwrap();
            let cycle = pong_failure.import_target_errors()[0].inner().unwrap();

            match cycle {
                CompositionError::CircularDependency { path } => {
                    assert_eq!(path, &vec!["Ping", "Pong", "Ping"]);
                }
                other => panic!("Expected CircularDependency, got {}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_resolution_depth_limit() {
        let config = CompositionConfig {
            detect_circular_dependencies: true,
            max_resolution_depth: 2,
        };
        let container = CompositionContainer::new(TypeCatalog::with_config(chain(), None, config));

        let error = match container.get_exported_value_of::<First>().await {
            Err(error) => error,
            Ok(_) => panic!("Expected composition failure"),
        };

        match root_cause(&error) {
            CompositionError::ResolutionDepthExceeded { type_name, limit } => {
                assert_eq!(type_name, "Third");
                assert_eq!(*limit, 2);
            }
            other => panic!("Expected ResolutionDepthExceeded, got {}", other),
        }

        // 제한이 충분하면 같은 체인이 구성됨
        let relaxed = CompositionConfig {
            detect_circular_dependencies: true,
            max_resolution_depth: 3,
        };
        let container = CompositionContainer::new(TypeCatalog::with_config(chain(), None, relaxed));
        assert!(container.get_exported_value_of::<First>().await.is_ok());
    }

    #[tokio::test]
    async fn test_cycle_without_detection_stops_at_depth_limit() {
        let config = CompositionConfig {
            detect_circular_dependencies: false,
            max_resolution_depth: 8,
        };
        let policy = CreationPolicy::NonShared;
        let catalog = TypeCatalog::with_config(vec![ping(policy), pong(policy)], None, config);
        let container = CompositionContainer::new(catalog);

        let error = match container.get_exported_value_of::<Ping>().await {
            Err(error) => error,
            Ok(_) => panic!("Expected composition failure"),
        };

        assert!(matches!(
            root_cause(&error),
            CompositionError::ResolutionDepthExceeded { limit: 8, .. }
        ));
        assert_eq!(container.composition_config().max_resolution_depth, 8);
    }

    #[tokio::test]
    async fn test_provider_dropped() {
        let catalog = TypeCatalog::new(vec![scheduler(), fixed_clock()], None);
        let export = catalog.get_export(&TypeInfo::of::<Scheduler>()).await.unwrap();

        drop(catalog);

        assert!(matches!(
            export.value().await,
            Err(CompositionError::ProviderDropped { .. })
        ));
    }
}
