use clap::Parser;
use small_registrar::core::ConfigProvider;
use small_registrar::utils::error::ErrorSeverity;
use small_registrar::utils::{logger, validation::Validate};
use small_registrar::{CliConfig, RegistrarError, RegistrarPipeline, ReportEngine, TomlConfig};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting registrar");
    tracing::debug!("CLI config: {:?}", cli);

    let exit_code = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match TomlConfig::from_file(&path) {
                Ok(config) => {
                    let monitor = cli.monitor || config.monitoring_enabled();
                    run(config, monitor)
                }
                Err(e) => report_failure(&e),
            }
        }
        None => {
            let monitor = cli.monitor;
            run(cli, monitor)
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

fn run<C: ConfigProvider + Validate>(config: C, monitor_enabled: bool) -> i32 {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return report_failure(&e);
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = ReportEngine::new_with_monitoring(RegistrarPipeline::new(config), monitor_enabled);
    let mut stdout = std::io::stdout().lock();

    match engine.run(&mut stdout) {
        Ok(summary) => {
            let warnings = engine.pipeline().take_warnings();
            tracing::info!(
                "✅ Reported {} students, {} instructors, {} majors ({} warnings)",
                summary.students,
                summary.instructors,
                summary.majors,
                warnings.len()
            );
            0
        }
        Err(e) => report_failure(&e),
    }
}

fn report_failure(e: &RegistrarError) -> i32 {
    tracing::error!(
        "❌ Registrar run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
