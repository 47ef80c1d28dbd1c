use std::sync::Arc;

use async_trait::async_trait;

use crate::catalogs::{CatalogSource, ComposableCatalog, ReflectionItem};
use crate::composition::ReflectionContext;
use crate::core::errors::CompositionResult;
use crate::reflection::ModuleInfo;

/// 모듈 목록
pub struct ModuleSource {
    modules: Vec<ModuleInfo>,
}

impl ModuleSource {
    pub fn modules(&self) -> &[ModuleInfo] {
        &self.modules
    }
}

#[async_trait]
impl CatalogSource for ModuleSource {
    async fn on_enumerate(&self) -> CompositionResult<Vec<ReflectionItem>> {
        Ok(self.modules.iter().cloned().map(ReflectionItem::Module).collect())
    }
}

/// 모듈에 포함된 타입을 후보로 사용하는 카탈로그
///
/// ```rust,ignore
/// let catalog = ModuleCatalog::new(vec![ModuleInfo::registered("plugins")], None);
/// ```
pub type ModuleCatalog = ComposableCatalog<ModuleSource>;

impl ComposableCatalog<ModuleSource> {
    pub fn new(
        modules: impl IntoIterator<Item = ModuleInfo>,
        reflection_context: Option<Arc<dyn ReflectionContext>>,
    ) -> Arc<Self> {
        let source = ModuleSource {
            modules: modules.into_iter().collect(),
        };

        for module in source.modules() {
            log::debug!("📦 모듈 카탈로그: {} ({}개 타입)", module.name(), module.len());
        }

        Self::with_source(source, reflection_context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::composition::{ExportProvider, RegistrationBuilder};
    use crate::core::registry::TypeRegistration;
    use crate::reflection::TypeInfo;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct EnglishGreeter;
    struct KoreanGreeter;
    struct Unrelated;

    impl Greeter for EnglishGreeter {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    impl Greeter for KoreanGreeter {
        fn greet(&self) -> String {
            "안녕하세요".to_string()
        }
    }

    fn greeter() -> TypeInfo {
        TypeInfo::of::<dyn Greeter>()
    }

    fn describe_english() -> TypeInfo {
        TypeInfo::builder::<EnglishGreeter>()
            .implements(&greeter(), |g| g as Arc<dyn Greeter>)
            .constructor(|_| Ok(EnglishGreeter))
            .export_as(&[&greeter()])
            .build()
    }

    fn describe_korean() -> TypeInfo {
        TypeInfo::builder::<KoreanGreeter>()
            .implements(&greeter(), |g| g as Arc<dyn Greeter>)
            .constructor(|_| Ok(KoreanGreeter))
            .export_as(&[&greeter()])
            .build()
    }

    fn describe_unrelated() -> TypeInfo {
        TypeInfo::builder::<Unrelated>().constructor(|_| Ok(Unrelated)).build()
    }

    inventory::submit! {
        TypeRegistration::new("module_catalog_tests", describe_english)
    }

    inventory::submit! {
        TypeRegistration::new("module_catalog_tests", describe_korean)
    }

    inventory::submit! {
        TypeRegistration::new("module_catalog_tests", describe_unrelated)
    }

    #[tokio::test]
    async fn test_registered_module_exports() {
        let module = ModuleInfo::registered("module_catalog_tests");
        let catalog = ModuleCatalog::new(vec![module], None);

        assert_eq!(catalog.get_reflection_targets().await.unwrap().len(), 3);

        let mut greetings: Vec<String> = catalog
            .get_exported_values(&greeter())
            .await
            .unwrap()
            .iter()
            .map(|value| value.resolve::<dyn Greeter>().unwrap().greet())
            .collect();
        greetings.sort();

        assert_eq!(greetings, vec!["hello", "안녕하세요"]);
    }

    #[tokio::test]
    async fn test_context_filters_module_types() {
        let mut builder = RegistrationBuilder::new();
        builder.for_types_derived_from(&greeter());
        let context: Arc<dyn ReflectionContext> = Arc::new(builder);

        let module = ModuleInfo::registered("module_catalog_tests");
        let catalog = ModuleCatalog::new(vec![module], Some(context));
        let targets = catalog.get_reflection_targets().await.unwrap();

        assert_eq!(targets.len(), 2);
        assert!(!targets.contains(&describe_unrelated()));
    }

    #[tokio::test]
    async fn test_unknown_module_is_empty() {
        let catalog = ModuleCatalog::new(vec![ModuleInfo::registered("no_such_module")], None);

        assert!(catalog.get_reflection_targets().await.unwrap().is_empty());
        assert!(catalog.get_exports(&greeter()).await.unwrap().is_empty());
    }
}
