//! # Lazy Export
//!
//! 값의 생성을 첫 접근 시점까지 미루는 익스포트입니다.
//!
//! - 초기화 함수는 최대 한 번 실행되며, 동시에 기다리는 모든 대기자가 같은 결과를 받습니다.
//! - 메타데이터는 값을 평가하지 않고도 조회할 수 있습니다.
//! - 복제본은 같은 셀을 공유합니다.
//!
//! ```rust,ignore
//! let export = container.get_export(&TypeInfo::of::<dyn Plugin>()).await?;
//!
//! if export.get_metadata("enabled") == Some(Value::Bool(true)) {
//!     let plugin = export.value().await?.resolve::<dyn Plugin>()?;
//!     plugin.start();
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;

use crate::composition::resolution;
use crate::composition::MetadataProvider;
use crate::config::CompositionConfig;
use crate::core::errors::CompositionResult;
use crate::reflection::{ExportedValue, TypeInfo};

type SharedValue = Shared<BoxFuture<'static, CompositionResult<ExportedValue>>>;

struct LazyExportCell {
    type_info: TypeInfo,
    value: SharedValue,
    metadata: Arc<dyn MetadataProvider>,
    config: CompositionConfig,
}

/// 지연 평가되는 익스포트와 그 메타데이터
#[derive(Clone)]
pub struct LazyExport(Arc<LazyExportCell>);

impl LazyExport {
    /// `type_info`는 값을 생성할 리플렉션 타입입니다.
    ///
    /// `init`은 첫 `value()` 호출 시 한 번만 실행되며, 그 요청의
    /// 해결 경로를 이어받습니다. 순환/깊이 검사는 전역 설정을 따릅니다.
    pub fn new<F, Fut>(type_info: TypeInfo, metadata: Arc<dyn MetadataProvider>, init: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = CompositionResult<ExportedValue>> + Send + 'static,
    {
        Self::with_config(type_info, metadata, CompositionConfig::current(), init)
    }

    /// `config`로 순환/깊이 검사를 수행하는 지연 익스포트를 만듭니다.
    pub fn with_config<F, Fut>(
        type_info: TypeInfo,
        metadata: Arc<dyn MetadataProvider>,
        config: CompositionConfig,
        init: F,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = CompositionResult<ExportedValue>> + Send + 'static,
    {
        let value = async move {
            let path = resolution::current_path();
            resolution::within(path, init()).await
        }
        .boxed()
        .shared();

        LazyExport(Arc::new(LazyExportCell {
            type_info,
            value,
            metadata,
            config,
        }))
    }

    /// 값을 평가하거나 이미 평가된 값을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `CircularDependency` - 이 익스포트가 자기 자신의 생성 중에 다시 요청됨
    /// * `ResolutionDepthExceeded` - 해결 경로가 설정된 제한을 넘음
    /// * 초기화 함수가 반환한 에러 (모든 대기자에게 같은 에러)
    pub async fn value(&self) -> CompositionResult<ExportedValue> {
        let path = resolution::current_path();
        let next = resolution::enter(&path, &self.0.type_info, &self.0.config)?;

        resolution::within(next, self.0.value.clone()).await
    }

    /// 값을 평가하지 않고 메타데이터를 조회합니다.
    pub fn get_metadata(&self, key: &str) -> Option<Value> {
        self.0.metadata.get_metadata(key)
    }

    pub fn metadata(&self) -> &Arc<dyn MetadataProvider> {
        &self.0.metadata
    }

    /// 값을 생성할 리플렉션 타입
    pub fn type_info(&self) -> &TypeInfo {
        &self.0.type_info
    }

    /// 두 익스포트가 같은 셀을 공유하는지 확인합니다.
    pub fn ptr_eq(&self, other: &LazyExport) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LazyExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyExport")
            .field("type", &self.0.type_info.name())
            .field("evaluated", &self.0.value.peek().is_some())
            .finish()
    }
}
