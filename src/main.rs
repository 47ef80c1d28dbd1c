//! 컴포지션 엔진 데모 애플리케이션
//!
//! 핵심 타입 카탈로그와 `inventory`로 등록된 플러그인 모듈을 집계 카탈로그로 묶고,
//! 관례 기반 규칙으로 플러그인 호스트의 객체 그래프를 구성합니다.

use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use composition_engine::catalogs::{AggregateCatalog, Catalog, ModuleCatalog, TypeCatalog};
use composition_engine::composition::{
    lazy, many, CompositionContainer, CreationPolicy, ExportProvider, LazyExport, ReflectionContext,
    RegistrationBuilder,
};
use composition_engine::config::CompositionConfig;
use composition_engine::core::context::ExecutionContext;
use composition_engine::core::errors::{CompositionResult, ErrorContext};
use composition_engine::core::registry::TypeRegistration;
use composition_engine::reflection::{ModuleInfo, TypeInfo};
use composition_engine::utils::display_terminal::{
    print_boxed_title, print_composition_summary, print_step_complete, print_step_start, print_sub_error,
    print_sub_task,
};

/// 플러그인 모듈 이름
const PLUGIN_MODULE: &str = "demo_plugins";

// ---------------------------------------------------------------------------
// 데모 타입
// ---------------------------------------------------------------------------

trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

trait Plugin: Send + Sync {
    fn name(&self) -> &str;
    fn run(&self) -> String;
}

/// 실행 컨텍스트로 전달되는 문화권 정보
struct Culture(String);

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        info!("📝 {}", message);
    }
}

struct GreetingPlugin {
    logger: Arc<dyn Logger>,
    culture: String,
}

impl Plugin for GreetingPlugin {
    fn name(&self) -> &str {
        "greeting"
    }

    fn run(&self) -> String {
        self.logger.log("greeting plugin invoked");
        match self.culture.as_str() {
            "ko-KR" => "안녕하세요".to_string(),
            _ => "Hello".to_string(),
        }
    }
}

struct UptimePlugin {
    logger: Arc<dyn Logger>,
    started_at: u64,
}

impl Plugin for UptimePlugin {
    fn name(&self) -> &str {
        "uptime"
    }

    fn run(&self) -> String {
        self.logger.log("uptime plugin invoked");
        format!("started at {}", self.started_at)
    }
}

struct PluginHost {
    plugins: Vec<Arc<dyn Plugin>>,
    logger: LazyExport,
}

impl PluginHost {
    async fn run_all(&self) -> CompositionResult<Vec<(String, String)>> {
        let logger = self.logger.value().await?.resolve::<dyn Logger>()?;
        logger.log(&format!("running {} plugins", self.plugins.len()));

        Ok(self
            .plugins
            .iter()
            .map(|plugin| (plugin.name().to_string(), plugin.run()))
            .collect())
    }
}

/// 임포트 타깃을 알 수 없는 파라미터를 가진 타입 (실패 보고 데모용)
struct ReportWriter;

fn logger() -> TypeInfo {
    TypeInfo::of::<dyn Logger>()
}

fn plugin() -> TypeInfo {
    TypeInfo::of::<dyn Plugin>()
}

fn console_logger() -> TypeInfo {
    TypeInfo::builder::<ConsoleLogger>()
        .implements(&logger(), |l| l as Arc<dyn Logger>)
        .constructor(|_| Ok(ConsoleLogger))
        .build()
}

fn plugin_host() -> TypeInfo {
    TypeInfo::builder::<PluginHost>()
        .import_as(0, many(&plugin()))
        .import_as(1, lazy(&logger()))
        .constructor(|args| {
            Ok(PluginHost {
                plugins: args.many(0)?,
                logger: args.export(1)?,
            })
        })
        .build()
}

fn report_writer() -> TypeInfo {
    TypeInfo::builder::<ReportWriter>()
        .untyped_parameter()
        .constructor(|_| Ok(ReportWriter))
        .build()
}

fn describe_greeting_plugin() -> TypeInfo {
    TypeInfo::builder::<GreetingPlugin>()
        .implements(&plugin(), |p| p as Arc<dyn Plugin>)
        .parameter::<dyn Logger>()
        .constructor(|args| {
            let culture = ExecutionContext::get_context_object::<Culture>()
                .map(|culture| culture.0.clone())
                .unwrap_or_else(|| "en-US".to_string());

            Ok(GreetingPlugin {
                logger: args.get(0)?,
                culture,
            })
        })
        .metadata("description", "Greets in the current culture")
        .build()
}

fn describe_uptime_plugin() -> TypeInfo {
    TypeInfo::builder::<UptimePlugin>()
        .implements(&plugin(), |p| p as Arc<dyn Plugin>)
        .parameter::<dyn Logger>()
        .constructor(|args| {
            let started_at = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .context("UptimePlugin")?
                .as_secs();

            Ok(UptimePlugin {
                logger: args.get(0)?,
                started_at,
            })
        })
        .metadata("description", "Reports the plugin start time")
        .build()
}

inventory::submit! {
    TypeRegistration::new(PLUGIN_MODULE, describe_greeting_plugin)
}

inventory::submit! {
    TypeRegistration::new(PLUGIN_MODULE, describe_uptime_plugin)
}

// ---------------------------------------------------------------------------
// 애플리케이션
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    let profile = load_env_file();
    init_logging();

    info!("🚀 컴포지션 엔진 데모 시작중... (profile: {})", profile);

    if let Err(e) = run().await {
        error!("❌ 데모 실패: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> CompositionResult<()> {
    print_boxed_title("Composition Engine");

    let config = CompositionConfig::current();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => info!("⚙️ 컴포지션 설정:\n{}", json),
        Err(e) => warn!("설정 직렬화 실패: {}", e),
    }

    // Step 1: 카탈로그 구성
    print_step_start(1, "Building catalogs");

    let core: Arc<dyn Catalog> = TypeCatalog::new(vec![console_logger(), plugin_host(), report_writer()], None);
    let plugins: Arc<dyn Catalog> = ModuleCatalog::new(vec![ModuleInfo::registered(PLUGIN_MODULE)], None);
    let catalog = AggregateCatalog::new(vec![core, plugins], Some(build_rules()));

    print_step_complete(1, "Catalogs ready", catalog.source().catalogs().len());

    // Step 2: 리플렉션 대상 열거
    print_step_start(2, "Enumerating reflection targets");

    let targets = catalog.get_reflection_targets().await?;
    for type_info in targets.iter() {
        print_sub_task(type_info.name(), "candidate");
    }

    print_step_complete(2, "Reflection targets", targets.len());

    // Step 3: 실행 컨텍스트 안에서 객체 그래프 구성
    print_step_start(3, "Composing plugin host");

    let container = CompositionContainer::new(catalog.clone());
    let context = ExecutionContext::new()
        .named("demo")
        .with(Culture("ko-KR".to_string()));

    let (composed, failed) = context.using(compose(container)).await?;

    print_step_complete(3, "Plugin host composed", composed);
    print_composition_summary(targets.len(), composed, failed);

    Ok(())
}

/// 집계 카탈로그에 적용할 관례 기반 규칙
fn build_rules() -> Arc<dyn ReflectionContext> {
    let mut rules = RegistrationBuilder::new();

    rules
        .for_types_derived_from(&logger())
        .export_as(&[&logger()])
        .set_creation_policy(CreationPolicy::Shared);

    rules
        .for_types_derived_from(&plugin())
        .add_metadata("category", "plugin")
        .export_as(&[&plugin()])
        .set_creation_policy(CreationPolicy::Shared);

    rules.for_type(&plugin_host());
    rules.for_type(&report_writer());

    Arc::new(rules)
}

/// 플러그인 호스트를 구성하고 (성공, 실패) 익스포트 수를 반환합니다.
async fn compose(container: CompositionContainer) -> CompositionResult<(usize, usize)> {
    let mut composed = 0;
    let mut failed = 0;

    // 메타데이터는 값을 생성하지 않고 조회
    for export in container.get_exports_of::<dyn Plugin>().await? {
        let description = export
            .get_metadata("description")
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        let category = export.get_metadata("category").unwrap_or_default();

        print_sub_task(export.type_info().name(), &format!("{} ({})", description, category));
    }

    let host = container.get_exported_value_of::<PluginHost>().await?;
    composed += 1 + host.plugins.len();

    for (name, output) in host.run_all().await? {
        print_sub_task(&name, &output);
    }

    let first = container.get_exported_value_of::<dyn Logger>().await?;
    let second = container.get_exported_value_of::<dyn Logger>().await?;
    print_sub_task(
        "Logger",
        if Arc::ptr_eq(&first, &second) { "shared instance" } else { "distinct instances" },
    );

    match container.get_exported_value(&report_writer()).await {
        Ok(_) => composed += 1,
        Err(e) => {
            failed += 1;
            print_sub_error(report_writer().name(), &e.to_string());
        }
    }

    Ok((composed, failed))
}

/// 환경별 설정 파일을 로드하고 선택된 프로필을 반환합니다
///
/// 로깅 초기화 전에 호출되므로 `.env` 파일의 `RUST_LOG`도 적용됩니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() -> String {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    if let Err(e) = loaded {
        eprintln!("환경 파일 로드 실패 (profile: {}): {}", profile, e);
    }

    profile
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,composition_engine=debug")
///
/// ```bash
/// # 규칙 선택과 인자 해결까지 추적
/// RUST_LOG=composition_engine=trace cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,composition_engine=debug"));
}
