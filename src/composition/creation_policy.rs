use serde::{Deserialize, Serialize};

/// 익스포트 인스턴스의 생성 정책
///
/// | 정책 | 동작 |
/// |------|------|
/// | `NonShared` | 요청마다 새 인스턴스 (기본값) |
/// | `Shared` | (리플렉션 타입, 프로바이더) 쌍마다 하나의 인스턴스 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CreationPolicy {
    #[default]
    NonShared,
    Shared,
}
