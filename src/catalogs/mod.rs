//! # Catalogs Module
//!
//! 후보 타입을 열거하는 카탈로그들입니다. 모든 카탈로그는
//! `ComposableCatalog<S>` 하나의 구현을 공유하고 열거 방식(`CatalogSource`)만 다릅니다.
//!
//! | 카탈로그 | 후보 |
//! |----------|------|
//! | [`TypeCatalog`] | 고정된 타입 목록 |
//! | [`ModuleCatalog`] | 모듈(`ModuleInfo`)에 포함된 타입 |
//! | [`AggregateCatalog`] | 하위 카탈로그들이 필터링한 대상의 합집합 |
//!
//! ```rust,ignore
//! let core = TypeCatalog::new(vec![console_logger(), scheduler()], None);
//! let plugins = ModuleCatalog::new(vec![ModuleInfo::registered("plugins")], Some(rules));
//! let catalog = AggregateCatalog::new(vec![core, plugins], None);
//!
//! let container = CompositionContainer::new(catalog);
//! ```

pub mod aggregate_catalog;
pub mod composable_catalog;
pub mod module_catalog;
pub mod type_catalog;

pub use aggregate_catalog::*;
pub use composable_catalog::*;
pub use module_catalog::*;
pub use type_catalog::*;
