//! 공통 유틸리티 함수 모듈
//!
//! 컴포지션 엔진 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 타입 이름 정리, 에러 메시지 들여쓰기, 플래그 파싱
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::clean_type_name;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! assert_eq!(clean_type_name("app::plugins::ConsoleLogger"), "ConsoleLogger");
//!
//! print_boxed_title("Composition Engine");
//! ```

pub mod string_utils;
pub mod display_terminal;
