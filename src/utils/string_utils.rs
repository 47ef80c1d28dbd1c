//! # 문자열 유틸리티
//!
//! 타입 이름 정리, 에러 메시지 들여쓰기, 환경 변수 플래그 파싱 등
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.

/// 타입 이름에서 모듈 경로를 제거합니다.
///
/// `std::any::type_name::<T>()`는 전체 모듈 경로를 포함하므로
/// (예: `composition_engine::plugins::ConsoleLogger`),
/// 실제 타입 이름만 추출하여 진단 메시지에 사용합니다.
/// 제네릭 인자는 각각 같은 방식으로 정리되며, `dyn ` 접두사는 유지됩니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::clean_type_name;
///
/// assert_eq!(clean_type_name("app::services::UserService"), "UserService");
/// assert_eq!(clean_type_name("dyn app::Logger"), "dyn Logger");
/// assert_eq!(clean_type_name("alloc::vec::Vec<app::Plugin>"), "Vec<Plugin>");
/// ```
pub fn clean_type_name(type_name: &str) -> String {
    let mut cleaned = String::with_capacity(type_name.len());
    let mut segment = String::new();

    for ch in type_name.chars() {
        match ch {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' => {
                cleaned.push_str(strip_module_path(&segment));
                segment.clear();
                cleaned.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    cleaned.push_str(strip_module_path(&segment));

    cleaned
}

fn strip_module_path(segment: &str) -> &str {
    match segment.rfind("::") {
        Some(pos) => &segment[pos + 2..],
        None => segment,
    }
}

/// 여러 줄 메시지의 두 번째 줄부터 지정한 칸 수만큼 들여씁니다.
///
/// 중첩된 컴포지션 에러를 파라미터 항목 아래에 정렬하기 위해 사용합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(indent_continuation_lines("a\nb", 2), "a\n  b");
/// ```
pub fn indent_continuation_lines(message: &str, width: usize) -> String {
    let indent = format!("\n{}", " ".repeat(width));

    message.replace('\n', &indent)
}

/// 환경 변수 플래그 값을 해석합니다.
///
/// 대소문자를 구분하지 않으며, 알 수 없는 값은 `None`을 반환합니다.
///
/// * 참: `true`, `1`, `yes`, `on`
/// * 거짓: `false`, `0`, `no`, `off`
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_type_name() {
        assert_eq!(clean_type_name("UserService"), "UserService");
        assert_eq!(clean_type_name("app::services::UserService"), "UserService");
        assert_eq!(clean_type_name("dyn app::plugins::Logger"), "dyn Logger");
        assert_eq!(
            clean_type_name("std::collections::HashMap<alloc::string::String, app::Plugin>"),
            "HashMap<String, Plugin>"
        );
        assert_eq!(clean_type_name("&app::Config"), "&Config");
    }

    #[test]
    fn test_indent_continuation_lines() {
        assert_eq!(indent_continuation_lines("single", 6), "single");
        assert_eq!(indent_continuation_lines("first\nsecond", 6), "first\n      second");
        assert_eq!(indent_continuation_lines("a\nb\nc", 1), "a\n b\n c");
    }

    #[test]
    fn test_parse_flag() {
        // 참 값
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("On"), Some(true));

        // 거짓 값
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));

        // 알 수 없는 값
        assert_eq!(parse_flag(""), None);
        assert_eq!(parse_flag("maybe"), None);
    }
}
