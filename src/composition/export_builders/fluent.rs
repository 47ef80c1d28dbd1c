//! # Fluent Rule Options
//!
//! `RegistrationBuilder`의 규칙 등록 메서드가 반환하는 체이닝 옵션입니다.
//!
//! ```text
//! ExportBuilderOptions
//!   ├─ construct_with(f)          → ExportOptions
//!   ├─ construct_instance_with(f) → ExportOptions
//!   ├─ construct_with_imports(..) → ExportOptions
//!   ├─ add_metadata(k, v)         → ExportOptions
//!   ├─ set_creation_policy(p)     → ExportOptions
//!   └─ export_as(..)              → CreationPolicyOptions
//!
//! ExportOptions
//!   ├─ add_metadata(k, v)         → ExportOptions
//!   └─ export_as(..)              → CreationPolicyOptions
//!
//! CreationPolicyOptions
//!   └─ set_creation_policy(p)
//! ```

use std::any::{Any, TypeId};
use std::future::Future;
use std::sync::Arc;

use futures_util::future::FutureExt;
use serde_json::Value;

use crate::composition::export_builders::TypedExportBuilder;
use crate::composition::{CreationPolicy, ExportProvider, ImportTarget};
use crate::core::errors::{CompositionError, CompositionResult};
use crate::reflection::{ExportedValue, Instance, TypeInfo};
use crate::utils::string_utils::clean_type_name;

/// 새로 등록된 규칙의 전체 옵션
pub struct ExportBuilderOptions<'a> {
    builder: &'a mut TypedExportBuilder,
}

impl<'a> ExportBuilderOptions<'a> {
    pub(crate) fn new(builder: &'a mut TypedExportBuilder) -> Self {
        Self { builder }
    }

    /// 매칭된 타입의 인스턴스를 만드는 비동기 팩토리를 지정합니다.
    ///
    /// 팩토리가 만든 값의 타입은 매칭된 리플렉션 타입과 같아야 합니다.
    ///
    /// ```rust,ignore
    /// registration
    ///     .for_type(&TypeInfo::of::<Settings>())
    ///     .construct_with(|_provider, _type_info| async { Ok(Arc::new(Settings::load())) });
    /// ```
    pub fn construct_with<V, F, Fut>(self, factory: F) -> ExportOptions<'a>
    where
        V: Any + Send + Sync,
        F: Fn(Arc<dyn ExportProvider>, TypeInfo) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CompositionResult<Arc<V>>> + Send + 'static,
    {
        self.builder.construct_with(Arc::new(
            move |provider: Arc<dyn ExportProvider>, reflected: TypeInfo, _imports: Option<Vec<ImportTarget>>| {
                let value = factory(provider, reflected.clone());

                async move {
                    let value = value.await?;

                    if TypeId::of::<V>() != reflected.type_id() {
                        return Err(CompositionError::TypeMismatch {
                            expected: reflected.name().to_string(),
                            actual: clean_type_name(std::any::type_name::<V>()),
                        });
                    }

                    Ok(ExportedValue::new(value as Instance, reflected))
                }
                .boxed()
            },
        ));

        ExportOptions::new(self.builder)
    }

    /// 매칭된 타입마다 인스턴스를 만드는 비동기 팩토리를 지정합니다.
    ///
    /// 파생 타입/조건 규칙처럼 여러 타입에 매칭되는 규칙에서 사용합니다.
    /// 팩토리는 전달받은 리플렉션 타입의 인스턴스를 반환해야 합니다.
    ///
    /// ```rust,ignore
    /// registration
    ///     .for_types_derived_from(&TypeInfo::of::<dyn Plugin>())
    ///     .construct_instance_with(|_provider, reflected| async move {
    ///         plugin_factory.create(reflected.name())
    ///     });
    /// ```
    pub fn construct_instance_with<F, Fut>(self, factory: F) -> ExportOptions<'a>
    where
        F: Fn(Arc<dyn ExportProvider>, TypeInfo) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CompositionResult<Instance>> + Send + 'static,
    {
        self.builder.construct_with(Arc::new(
            move |provider: Arc<dyn ExportProvider>, reflected: TypeInfo, _imports: Option<Vec<ImportTarget>>| {
                let instance = factory(provider, reflected.clone());

                async move {
                    let instance = instance.await?;
                    let actual = (*instance).type_id();

                    if actual != reflected.type_id() {
                        return Err(CompositionError::TypeMismatch {
                            expected: reflected.name().to_string(),
                            actual: format!("{:?}", actual),
                        });
                    }

                    Ok(ExportedValue::new(instance, reflected))
                }
                .boxed()
            },
        ));

        ExportOptions::new(self.builder)
    }

    /// 생성자 파라미터별 임포트 타깃을 지정합니다.
    pub fn construct_with_imports(self, imports: Vec<ImportTarget>) -> ExportOptions<'a> {
        self.builder.construct_with_imports(imports);
        ExportOptions::new(self.builder)
    }

    pub fn add_metadata(self, key: impl Into<String>, value: impl Into<Value>) -> ExportOptions<'a> {
        ExportOptions::new(self.builder).add_metadata(key, value)
    }

    pub fn set_creation_policy(self, creation_policy: CreationPolicy) -> ExportOptions<'a> {
        self.builder.set_creation_policy(creation_policy);
        ExportOptions::new(self.builder)
    }

    pub fn export_as(self, bases: &[&TypeInfo]) -> CreationPolicyOptions<'a> {
        ExportOptions::new(self.builder).export_as(bases)
    }
}

/// 메타데이터와 익스포트 타깃 옵션
pub struct ExportOptions<'a> {
    builder: &'a mut TypedExportBuilder,
}

impl<'a> ExportOptions<'a> {
    fn new(builder: &'a mut TypedExportBuilder) -> Self {
        Self { builder }
    }

    /// 규칙 메타데이터를 추가합니다. 같은 키의 타입 메타데이터보다 우선합니다.
    pub fn add_metadata(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.builder.add_metadata(key, value);
        self
    }

    /// 익스포트 타깃을 `bases`로 교체합니다.
    pub fn export_as(self, bases: &[&TypeInfo]) -> CreationPolicyOptions<'a> {
        self.builder.export_as(bases);
        CreationPolicyOptions { builder: self.builder }
    }
}

/// 생성 정책 옵션
pub struct CreationPolicyOptions<'a> {
    builder: &'a mut TypedExportBuilder,
}

impl CreationPolicyOptions<'_> {
    pub fn set_creation_policy(self, creation_policy: CreationPolicy) {
        self.builder.set_creation_policy(creation_policy);
    }
}
