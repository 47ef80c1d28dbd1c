//! # Reflection Module
//!
//! 컴포지션 엔진이 사용하는 타입 수준 정보를 제공합니다.
//!
//! ## 모듈 구성
//!
//! - [`type_info`] - 타입 서술자(`TypeInfo`)와 빌더
//! - [`module_info`] - 이름이 붙은 타입 묶음(`ModuleInfo`)
//! - [`exported_value`] - 생성된 인스턴스와 생성자 인자

pub mod exported_value;
pub mod module_info;
pub mod type_info;

pub use exported_value::*;
pub use module_info::*;
pub use type_info::*;
