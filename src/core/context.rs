//! # Execution Context
//!
//! `.await` 지점을 넘어 유지되는 실행 컨텍스트입니다. 요청 단위 상태(문화권,
//! 트랜잭션, 요청 정보 등)를 인자로 넘기지 않고 하위 비동기 함수에서 조회할 때
//! 사용합니다.
//!
//! ## 동작 원리
//!
//! ```text
//! ExecutionContext::new().with(obj).using(fut)
//!   ├─ tokio::task_local 스코프 안에서 fut 실행
//!   ├─ 하위 함수: ExecutionContext::get_context_object::<T>()
//!   │    └─ 가장 안쪽 컨텍스트부터 부모 방향으로 탐색
//!   └─ fut 완료 → 컨텍스트 참조 해제
//! ```
//!
//! `tokio::spawn`된 태스크는 컨텍스트를 자동으로 상속하지 않으므로
//! `ExecutionContext::scope()`로 감싸서 넘겨야 합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let context = ExecutionContext::new().with(RequestInfo { id: 7 });
//!
//! context
//!     .using(async {
//!         tokio::time::sleep(Duration::from_millis(10)).await;
//!
//!         let info = ExecutionContext::get_context_object::<RequestInfo>();
//!         assert_eq!(info.unwrap().id, 7);
//!
//!         tokio::spawn(ExecutionContext::scope(async { /* 같은 컨텍스트 */ }));
//!     })
//!     .await;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::Either;

tokio::task_local! {
    static CURRENT_CONTEXT: ExecutionContext;
}

type ContextObject = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Default)]
struct ContextFrame {
    name: Option<String>,
    objects: HashMap<TypeId, ContextObject>,
    parent: Option<ExecutionContext>,
}

/// 컨텍스트 객체 묶음
///
/// 복제 비용이 싼 핸들이며, 마지막 핸들이 사라질 때 컨텍스트 객체도 해제됩니다.
#[derive(Clone, Default)]
pub struct ExecutionContext {
    frame: Arc<ContextFrame>,
}

impl ExecutionContext {
    /// 현재 컨텍스트(있다면)를 부모로 하는 새 컨텍스트를 만듭니다.
    pub fn new() -> Self {
        Self {
            frame: Arc::new(ContextFrame {
                parent: Self::current(),
                ..ContextFrame::default()
            }),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.frame).name = Some(name.into());
        self
    }

    /// 컨텍스트 객체를 추가합니다. 같은 타입의 객체는 교체됩니다.
    pub fn with<T: Any + Send + Sync>(mut self, object: T) -> Self {
        Arc::make_mut(&mut self.frame)
            .objects
            .insert(TypeId::of::<T>(), Arc::new(object));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.frame.name.as_deref()
    }

    pub fn parent(&self) -> Option<&ExecutionContext> {
        self.frame.parent.as_ref()
    }

    /// 이 컨텍스트 안에서 `future`를 실행합니다.
    pub fn using<F: Future>(self, future: F) -> impl Future<Output = F::Output> {
        log::trace!("실행 컨텍스트 진입: {:?}", self);
        CURRENT_CONTEXT.scope(self, future)
    }

    /// 현재 실행 중인 컨텍스트
    pub fn current() -> Option<ExecutionContext> {
        CURRENT_CONTEXT.try_with(|context| context.clone()).ok()
    }

    /// 현재 컨텍스트를 즉시 캡처해 `future`에 연결합니다.
    ///
    /// `tokio::spawn`에 넘길 퓨처를 감쌀 때 사용합니다.
    pub fn scope<F: Future>(future: F) -> impl Future<Output = F::Output> {
        match Self::current() {
            Some(context) => Either::Left(context.using(future)),
            None => Either::Right(future),
        }
    }

    /// 현재 컨텍스트에서 타입 `T`의 컨텍스트 객체를 찾습니다.
    pub fn get_context_object<T: Any + Send + Sync>() -> Option<Arc<T>> {
        Self::current().and_then(|context| context.lookup::<T>())
    }

    /// 이 컨텍스트부터 부모 방향으로 타입 `T`의 객체를 찾습니다.
    pub fn lookup<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let mut context = Some(self);

        while let Some(current) = context {
            if let Some(object) = current.frame.objects.get(&TypeId::of::<T>()) {
                return object.clone().downcast::<T>().ok();
            }
            context = current.parent();
        }

        None
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("name", &self.frame.name)
            .field("objects", &self.frame.objects.len())
            .field("has_parent", &self.frame.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Debug, PartialEq)]
    struct Culture(&'static str);

    #[derive(Debug, PartialEq)]
    struct RequestId(u32);

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_context_survives_await() {
        let context = ExecutionContext::new().named("request").with(Culture("ko-KR"));

        let culture = context
            .using(async {
                tokio::task::yield_now().await;
                ExecutionContext::get_context_object::<Culture>()
            })
            .await;

        assert_eq!(culture.as_deref(), Some(&Culture("ko-KR")));
        assert!(ExecutionContext::get_context_object::<Culture>().is_none());
    }

    #[tokio::test]
    async fn test_nested_context_falls_back_to_parent() {
        let outer = ExecutionContext::new().with(Culture("en-US")).with(RequestId(1));

        outer
            .using(async {
                let inner = ExecutionContext::new().with(RequestId(2));
                assert!(inner.parent().is_some());

                inner
                    .using(async {
                        assert_eq!(
                            ExecutionContext::get_context_object::<RequestId>().as_deref(),
                            Some(&RequestId(2))
                        );
                        assert_eq!(
                            ExecutionContext::get_context_object::<Culture>().as_deref(),
                            Some(&Culture("en-US"))
                        );
                    })
                    .await;

                assert_eq!(
                    ExecutionContext::get_context_object::<RequestId>().as_deref(),
                    Some(&RequestId(1))
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_scope_carries_context_into_spawned_task() {
        let context = ExecutionContext::new().with(RequestId(7));

        let handle = context
            .using(async {
                tokio::spawn(ExecutionContext::scope(async {
                    ExecutionContext::get_context_object::<RequestId>()
                }))
            })
            .await;

        let id = handle.await.unwrap();
        assert_eq!(id.as_deref(), Some(&RequestId(7)));
    }

    #[tokio::test]
    async fn test_scope_without_context() {
        let id = ExecutionContext::scope(async { ExecutionContext::get_context_object::<RequestId>() }).await;

        assert!(id.is_none());
    }

    #[tokio::test]
    async fn test_objects_released_after_last_future() {
        let dropped = Arc::new(AtomicBool::new(false));
        let context = ExecutionContext::new().with(DropFlag(dropped.clone()));

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = context
            .using(async move {
                tokio::spawn(ExecutionContext::scope(async move {
                    let _ = rx.await;
                }))
            })
            .await;

        // 스폰된 태스크가 컨텍스트를 붙잡고 있음
        assert!(!dropped.load(Ordering::SeqCst));

        tx.send(()).unwrap();
        handle.await.unwrap();

        assert!(dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn test_with_replaces_same_type() {
        let context = ExecutionContext::default().with(RequestId(1)).with(RequestId(2));

        assert_eq!(context.lookup::<RequestId>().as_deref(), Some(&RequestId(2)));
        assert!(context.lookup::<Culture>().is_none());
        assert!(context.name().is_none());
    }
}
