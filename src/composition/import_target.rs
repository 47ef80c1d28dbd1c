//! # Import Targets
//!
//! 생성자 파라미터 하나를 무엇으로 채울지 지정합니다.
//!
//! - **타입 임포트**: `ImportTarget::Type` - 해당 타입의 익스포트 값 하나
//! - **함수 임포트**: `ImportTarget::Provider` - 프로바이더를 받아 값을 만드는 함수
//!
//! 함수 임포트를 만드는 헬퍼:
//!
//! | 헬퍼 | 결과 | 생성자에서 꺼내기 |
//! |------|------|-------------------|
//! | `lazy(T)` | 단일 `LazyExport` | `args.export(i)` |
//! | `many(T)` | 모든 익스포트 값 | `args.many::<T>(i)` |
//! | `lazy_many(T)` | 모든 `LazyExport` | `args.exports(i)` |

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::composition::ExportProvider;
use crate::core::errors::CompositionResult;
use crate::reflection::{ImportValue, TypeInfo};

/// 프로바이더로부터 임포트 값을 만드는 함수
pub type ExportProviderFn =
    Arc<dyn Fn(Arc<dyn ExportProvider>) -> BoxFuture<'static, CompositionResult<ImportValue>> + Send + Sync>;

/// 생성자 파라미터의 임포트 타깃
#[derive(Clone)]
pub enum ImportTarget {
    /// 타입으로 임포트 (`get_exported_value`)
    Type(TypeInfo),
    /// 함수로 임포트
    Provider(ExportProviderFn),
}

impl ImportTarget {
    /// 비동기 함수로 함수 임포트를 만듭니다.
    ///
    /// ```rust,ignore
    /// let settings = ImportTarget::from_fn(|_provider| async {
    ///     Ok(ImportValue::custom(Settings::load()))
    /// });
    /// ```
    pub fn from_fn<F, Fut>(provider_fn: F) -> Self
    where
        F: Fn(Arc<dyn ExportProvider>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CompositionResult<ImportValue>> + Send + 'static,
    {
        ImportTarget::Provider(Arc::new(move |provider| provider_fn(provider).boxed()))
    }

    /// 임포트 타깃을 해결합니다.
    pub async fn resolve(&self, provider: &Arc<dyn ExportProvider>) -> CompositionResult<ImportValue> {
        match self {
            ImportTarget::Type(type_info) => provider
                .get_exported_value(type_info)
                .await
                .map(ImportValue::Value),
            ImportTarget::Provider(provider_fn) => provider_fn(provider.clone()).await,
        }
    }
}

impl From<TypeInfo> for ImportTarget {
    fn from(type_info: TypeInfo) -> Self {
        ImportTarget::Type(type_info)
    }
}

impl From<&TypeInfo> for ImportTarget {
    fn from(type_info: &TypeInfo) -> Self {
        ImportTarget::Type(type_info.clone())
    }
}

impl fmt::Debug for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportTarget::Type(type_info) => f.debug_tuple("Type").field(&type_info.name()).finish(),
            ImportTarget::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// `target`의 단일 익스포트를 평가하지 않은 채로 임포트합니다.
pub fn lazy(target: &TypeInfo) -> ImportTarget {
    let target = target.clone();

    ImportTarget::from_fn(move |provider| {
        let target = target.clone();
        async move { provider.get_export(&target).await.map(ImportValue::Export) }
    })
}

/// `target`의 모든 익스포트 값을 임포트합니다.
pub fn many(target: &TypeInfo) -> ImportTarget {
    let target = target.clone();

    ImportTarget::from_fn(move |provider| {
        let target = target.clone();
        async move {
            provider
                .get_exported_values(&target)
                .await
                .map(ImportValue::Values)
        }
    })
}

/// `target`의 모든 익스포트를 평가하지 않은 채로 임포트합니다.
pub fn lazy_many(target: &TypeInfo) -> ImportTarget {
    let target = target.clone();

    ImportTarget::from_fn(move |provider| {
        let target = target.clone();
        async move { provider.get_exports(&target).await.map(ImportValue::Exports) }
    })
}
