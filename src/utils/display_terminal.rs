//! 터미널 출력 포맷팅 유틸리티
//!
//! 데모 바이너리가 컴포지션 진행 상황과 결과를 보여줄 때 사용하는 출력 함수들입니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// # Examples
///
/// ```rust,ignore
/// print_boxed_title("Composition Engine");
/// ```
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                Composition Engine                ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Building catalogs
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 처리된 항목 수와 함께 표시합니다
///
/// ```text
/// ✓ Step 1: Catalogs ready (4 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 하위 항목 한 줄을 트리 형태로 출력합니다
///
/// ```text
///    ├─ ConsoleLogger: Shared
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 여러 줄 에러 메시지를 하위 항목 들여쓰기에 맞춰 출력합니다
pub fn print_sub_error(name: &str, message: &str) {
    let mut lines = message.lines();

    println!("   ├─ {}: ✗ {}", name, lines.next().unwrap_or_default());
    for line in lines {
        println!("   │    {}", line);
    }
}

/// 컴포지션 결과 요약을 출력합니다
///
/// # Arguments
///
/// * `types` - 리플렉션 대상 타입 수
/// * `composed` - 성공적으로 구성된 익스포트 수
/// * `failed` - 구성에 실패한 익스포트 수
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║            🎉 COMPOSITION COMPLETED              ║
/// ╚══════════════════════════════════════════════════╝
///    📦 Reflection Targets: 6
///    🔧 Composed Exports: 4
///    ⚠️  Failed Exports: 1
/// ```
pub fn print_composition_summary(types: usize, composed: usize, failed: usize) {
    println!();
    print_boxed_title("🎉 COMPOSITION COMPLETED");
    println!("   📦 Reflection Targets: {}", types);
    println!("   🔧 Composed Exports: {}", composed);
    println!("   ⚠️  Failed Exports: {}", failed);
    println!();
}
