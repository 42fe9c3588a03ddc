use clap::Parser;
use lab_mix::config::cli::RequestSource;
use lab_mix::utils::{logger, validation::Validate};
use lab_mix::{CalculationEngine, CliConfig, DefaultsConfig, MixError, Operation};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config) {
        tracing::error!("❌ Calculation failed: {}", e);
        tracing::debug!("💡 Suggestion: {}", e.recovery_suggestion());

        // 與網頁 API 相同的錯誤格式
        println!("{}", CalculationEngine::error_body(&e));
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run(config: CliConfig) -> Result<(), MixError> {
    config.validate()?;

    if config.list {
        for operation in Operation::ALL {
            println!(
                "{:<14} {:<16} {}",
                operation.name(),
                operation.alias(),
                operation.description()
            );
        }
        return Ok(());
    }

    let defaults = DefaultsConfig::load(config.config.as_deref())?;
    let engine = CalculationEngine::new(defaults);

    let operation = config
        .operation
        .as_deref()
        .unwrap_or_default()
        .parse::<Operation>()?;
    let payload = RequestSource::new(config.input, config.json).read_payload()?;

    let result = engine.evaluate(operation, &payload)?;
    tracing::info!("✅ {} calculated", operation);

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", rendered);

    Ok(())
}
