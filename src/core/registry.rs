//! # Type Registry - 컴파일 타임 타입 등록
//!
//! 모듈 카탈로그가 열거할 타입 서술자를 `inventory` 크레이트로 수집합니다.
//! Spring의 컴포넌트 스캔(`@ComponentScan`)과 비슷한 역할로, 소스 어디에서든
//! `inventory::submit!`으로 등록한 타입이 모듈 이름별로 묶여 조회됩니다.
//!
//! ## Spring Framework와의 비교
//!
//! | Spring 개념 | 이 시스템 | 비고 |
//! |-------------|-----------|------|
//! | `@ComponentScan("pkg")` | `ModuleInfo::registered("pkg")` | 모듈 단위 수집 |
//! | `@Component` | `inventory::submit!` | 등록 |
//! | `BeanDefinition` | `TypeInfo` | 타입 서술자 |
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ inventory::submit! { TypeRegistration::new("plugins", describe) }
//!    └─ inventory::collect! → 전역 레지스트리에 등록
//!
//! 2. 첫 조회 시
//!    ├─ 모든 TypeRegistration 순회
//!    ├─ describe() 호출 → TypeInfo 생성
//!    └─ 모듈 이름별 인덱스 구성 (이후 재사용)
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! fn describe_console_logger() -> TypeInfo {
//!     TypeInfo::builder::<ConsoleLogger>()
//!         .constructor(|_| Ok(ConsoleLogger))
//!         .export()
//!         .build()
//! }
//!
//! inventory::submit! {
//!     TypeRegistration::new("plugins", describe_console_logger)
//! }
//!
//! let module = ModuleInfo::registered("plugins");
//! let catalog = ModuleCatalog::new(vec![module], None);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::reflection::TypeInfo;

/// 타입 등록 정보
///
/// `inventory`를 통해 수집되며, 같은 모듈 이름을 가진 등록들이 하나의
/// `ModuleInfo`로 묶입니다.
pub struct TypeRegistration {
    /// 타입이 속한 모듈 이름 (검색 키로 사용)
    pub module: &'static str,
    /// 타입 서술자 생성 함수 (첫 조회 시 한 번 호출)
    pub describe: fn() -> TypeInfo,
}

impl TypeRegistration {
    pub const fn new(module: &'static str, describe: fn() -> TypeInfo) -> Self {
        Self { module, describe }
    }
}

inventory::collect!(TypeRegistration);

/// 모듈 이름 → 타입 서술자 목록 인덱스
/// 첫 접근 시 한 번만 구성되며, 이후 같은 `TypeInfo`를 반환합니다.
static MODULE_INDEX: Lazy<HashMap<&'static str, Vec<TypeInfo>>> = Lazy::new(|| {
    let mut index: HashMap<&'static str, Vec<TypeInfo>> = HashMap::new();

    for registration in inventory::iter::<TypeRegistration>() {
        let type_info = (registration.describe)();
        log::debug!("📦 타입 등록: {} (모듈: {})", type_info.name(), registration.module);

        let types = index.entry(registration.module).or_default();
        if !types.contains(&type_info) {
            types.push(type_info);
        }
    }

    log::debug!("📚 타입 레지스트리 초기화 완료: {}개 모듈", index.len());
    index
});

/// 모듈에 등록된 타입 서술자 목록을 반환합니다.
///
/// 등록되지 않은 모듈이면 빈 목록을 반환합니다. 같은 모듈 안에서의 순서는
/// 링크 순서에 따르므로 보장되지 않습니다.
pub fn registered_types(module: &str) -> Vec<TypeInfo> {
    MODULE_INDEX.get(module).cloned().unwrap_or_default()
}

/// 등록된 모든 모듈 이름을 정렬해 반환합니다.
pub fn registered_modules() -> Vec<&'static str> {
    let mut modules: Vec<_> = MODULE_INDEX.keys().copied().collect();
    modules.sort_unstable();
    modules
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RegisteredAlpha;
    struct RegisteredBeta;

    fn describe_alpha() -> TypeInfo {
        TypeInfo::builder::<RegisteredAlpha>()
            .constructor(|_| Ok(RegisteredAlpha))
            .export()
            .build()
    }

    fn describe_beta() -> TypeInfo {
        TypeInfo::builder::<RegisteredBeta>()
            .constructor(|_| Ok(RegisteredBeta))
            .export()
            .build()
    }

    inventory::submit! { TypeRegistration::new("registry_tests", describe_alpha) }
    inventory::submit! { TypeRegistration::new("registry_tests", describe_beta) }
    inventory::submit! { TypeRegistration::new("registry_tests", describe_beta) }

    #[test]
    fn test_registered_types_grouped_by_module() {
        let types = registered_types("registry_tests");

        // 중복 등록은 한 번만
        assert_eq!(types.len(), 2);
        assert!(types.contains(&TypeInfo::of::<RegisteredAlpha>()));
        assert!(types.contains(&TypeInfo::of::<RegisteredBeta>()));
        assert!(registered_modules().contains(&"registry_tests"));
    }

    #[test]
    fn test_unknown_module_is_empty() {
        assert!(registered_types("no_such_module").is_empty());
    }
}
