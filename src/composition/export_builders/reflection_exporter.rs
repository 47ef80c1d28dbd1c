//! # Reflection Exporter
//!
//! 타입 서술자의 생성자 파라미터를 프로바이더로 해결한 뒤 인스턴스를 생성합니다.
//!
//! ## 해결 순서
//!
//! ```text
//! 1. 인자 개수 = max(선언된 파라미터 수, 임포트 타깃 목록 길이)
//! 2. 인덱스별 임포트 타깃 결정
//!    ├─ 명시적 목록 (construct_with_imports) 또는 타입의 import_as 재정의
//!    └─ 없으면 선언된 파라미터 타입
//! 3. 인덱스별 해결 (선언 순서)
//!    ├─ 타깃 없음 → ImportTargetError::missing
//!    └─ 해결 실패 → ImportTargetError::new (중단하지 않음)
//! 4. 에러가 하나라도 있으면 CompositionFailed (전체 목록)
//! 5. 생성자 호출
//! ```

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::composition::{ExportProvider, ImportTarget};
use crate::core::errors::{CompositionError, CompositionResult, ImportTargetError};
use crate::reflection::{ExportedValue, ImportArguments, TypeInfo};

/// 리플렉션 타입의 인스턴스를 만드는 함수
///
/// 인자: 프로바이더, 리플렉션 타입, 규칙에 지정된 임포트 타깃 목록
pub type ExportFactory = Arc<
    dyn Fn(Arc<dyn ExportProvider>, TypeInfo, Option<Vec<ImportTarget>>) -> BoxFuture<'static, CompositionResult<ExportedValue>>
        + Send
        + Sync,
>;

/// 생성자 리플렉션으로 익스포트 값을 만드는 유틸리티
pub struct ReflectionExporter;

impl ReflectionExporter {
    /// `target`의 인스턴스를 생성합니다.
    ///
    /// `import_targets`가 `None`이면 타입에 선언된 임포트 재정의를 사용합니다.
    ///
    /// # Errors
    ///
    /// * `CompositionFailed` - 하나 이상의 파라미터 해결 실패 (실패한 파라미터 전체 포함)
    /// * `NotConstructible` - 생성자가 없는 타입
    /// * 생성자가 반환한 에러
    pub async fn get_exported_value(
        provider: &Arc<dyn ExportProvider>,
        target: &TypeInfo,
        import_targets: Option<&[ImportTarget]>,
    ) -> CompositionResult<ExportedValue> {
        let imports: Vec<Option<ImportTarget>> = match import_targets {
            Some(explicit) => explicit.iter().cloned().map(Some).collect(),
            None => target.import_overrides().to_vec(),
        };
        let parameters = target.parameters();
        let argument_count = parameters.len().max(imports.len());

        log::debug!("🔧 {} 생성 시작 (인자 {}개)", target.name(), argument_count);

        let mut values = Vec::with_capacity(argument_count);
        let mut errors = Vec::new();

        for index in 0..argument_count {
            let import_target = imports
                .get(index)
                .cloned()
                .flatten()
                .or_else(|| parameters.get(index).cloned().flatten().map(ImportTarget::Type));

            let Some(import_target) = import_target else {
                log::trace!("{} 인자 {}: 임포트 타깃 없음", target.name(), index);
                errors.push(ImportTargetError::missing(index));
                continue;
            };

            match import_target.resolve(provider).await {
                Ok(value) => {
                    log::trace!("{} 인자 {} 해결: {:?}", target.name(), index, import_target);
                    values.push(value);
                }
                Err(e) => {
                    log::trace!("{} 인자 {} 해결 실패: {}", target.name(), index, e);
                    errors.push(ImportTargetError::new(index, import_target, e));
                }
            }
        }

        if !errors.is_empty() {
            let error = CompositionError::CompositionFailed {
                type_name: target.name().to_string(),
                errors,
            };
            log::warn!("❌ {}", error);
            return Err(error);
        }

        let instance = target.construct(ImportArguments::new(target.name(), values))?;
        log::debug!("✅ {} 생성 완료", target.name());

        Ok(ExportedValue::new(instance, target.clone()))
    }

    /// 기본 생성 함수 (`get_exported_value`)
    pub fn factory() -> ExportFactory {
        Arc::new(
            |provider: Arc<dyn ExportProvider>, target: TypeInfo, import_targets: Option<Vec<ImportTarget>>| {
                async move {
                    ReflectionExporter::get_exported_value(&provider, &target, import_targets.as_deref()).await
                }
                .boxed()
            },
        )
    }
}
