//! 해결 경로 추적
//!
//! 현재 생성 중인 리플렉션 타입의 체인을 task-local로 전달합니다.
//! `LazyExport::value`가 경로에 진입할 때 순환과 깊이 제한을 검사합니다.

use std::future::Future;

use crate::config::CompositionConfig;
use crate::core::errors::{CompositionError, CompositionResult};
use crate::reflection::TypeInfo;

tokio::task_local! {
    static RESOLUTION_PATH: Vec<TypeInfo>;
}

/// 현재 태스크의 해결 경로 (범위 밖이면 빈 경로)
pub(crate) fn current_path() -> Vec<TypeInfo> {
    RESOLUTION_PATH
        .try_with(|path| path.clone())
        .unwrap_or_default()
}

/// `type_info`를 경로에 추가한 새 경로를 반환합니다.
///
/// # Errors
///
/// * `CircularDependency` - 이미 경로에 있는 타입 (감지가 켜진 경우)
/// * `ResolutionDepthExceeded` - 경로 길이가 설정된 제한을 넘는 경우
pub(crate) fn enter(
    path: &[TypeInfo],
    type_info: &TypeInfo,
    config: &CompositionConfig,
) -> CompositionResult<Vec<TypeInfo>> {

    if config.detect_circular_dependencies && path.contains(type_info) {
        let cycle: Vec<String> = path
            .iter()
            .chain(std::iter::once(type_info))
            .map(|t| t.name().to_string())
            .collect();

        log::warn!("🔄 순환 의존성 감지: {}", cycle.join(" -> "));
        return Err(CompositionError::CircularDependency { path: cycle });
    }

    if path.len() >= config.max_resolution_depth {
        log::warn!("해결 깊이 제한 {} 초과: {}", config.max_resolution_depth, type_info.name());
        return Err(CompositionError::ResolutionDepthExceeded {
            type_name: type_info.name().to_string(),
            limit: config.max_resolution_depth,
        });
    }

    let mut next = path.to_vec();
    next.push(type_info.clone());
    Ok(next)
}

/// `path`를 해결 경로로 설정한 채 `future`를 실행합니다.
pub(crate) async fn within<F: Future>(path: Vec<TypeInfo>, future: F) -> F::Output {
    RESOLUTION_PATH.scope(path, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;

    #[test]
    fn test_empty_path_outside_scope() {
        assert!(current_path().is_empty());
    }

    #[test]
    fn test_enter_detects_cycle_with_full_path() {
        let alpha = TypeInfo::of::<Alpha>();
        let beta = TypeInfo::of::<Beta>();

        let config = CompositionConfig::default();

        let path = enter(&[], &alpha, &config).unwrap();
        let path = enter(&path, &beta, &config).unwrap();
        assert_eq!(path.len(), 2);

        match enter(&path, &alpha, &config) {
            Err(CompositionError::CircularDependency { path }) => {
                assert_eq!(path, vec!["Alpha", "Beta", "Alpha"]);
            }
            other => panic!("Expected CircularDependency, got {:?}", other.map(|p| p.len())),
        }
    }

    #[test]
    fn test_enter_enforces_depth_limit() {
        let alpha = TypeInfo::of::<Alpha>();
        let beta = TypeInfo::of::<Beta>();
        let config = CompositionConfig {
            detect_circular_dependencies: false,
            max_resolution_depth: 2,
        };

        let path = enter(&[], &alpha, &config).unwrap();
        let path = enter(&path, &alpha, &config).unwrap();

        assert!(matches!(
            enter(&path, &beta, &config),
            Err(CompositionError::ResolutionDepthExceeded { limit: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_path_is_scoped_to_future() {
        let alpha = TypeInfo::of::<Alpha>();

        let inner = within(vec![alpha.clone()], async { current_path() }).await;

        assert_eq!(inner, vec![alpha]);
        assert!(current_path().is_empty());
    }
}
