use clap::Parser;
use menu_etl::config::cli::{Command, ImportArgs, PriceArgs, ServiceOrderArgs};
use menu_etl::core::service_order::service_order_file_name;
use menu_etl::utils::error::ErrorSeverity;
use menu_etl::utils::{logger, validation::Validate};
use menu_etl::{
    compute_pricing, map_event_to_service_order_fields, AppConfig, CliConfig, EtlEngine,
    Event, LocalStorage, MenuImportPipeline, Result,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting menu-etl CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ menu-etl failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };

    // 驗證配置
    config.validate()?;
    Ok(config)
}

async fn run(cli: CliConfig) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Import(args) => run_import(args, &config).await,
        Command::Price(args) => run_price(args, &config),
        Command::ServiceOrder(args) => run_service_order(args, &config).await,
    }
}

async fn run_import(args: ImportArgs, config: &AppConfig) -> Result<()> {
    let settings = args.into_settings(&config.import);
    settings.validate()?;

    let storage = LocalStorage::new(".");
    let pipeline = MenuImportPipeline::new(storage, settings);
    let engine = EtlEngine::new(pipeline);

    let output_path = engine.run().await?;
    tracing::info!("✅ Menu import completed successfully!");
    println!("✅ Menu import completed successfully!");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

fn run_price(args: PriceArgs, config: &AppConfig) -> Result<()> {
    let mut pricing = config.pricing;
    if let Some(rate) = args.service_fee_rate {
        pricing.service_fee_rate = rate;
    }
    if let Some(rate) = args.discount_rate {
        pricing.discount_rate = rate;
    }

    let outputs = compute_pricing(args.unit_price, args.participants, &pricing)?;
    tracing::debug!("Pricing for {} x {}: {:?}", args.unit_price, args.participants, outputs);

    println!("{}", serde_json::to_string_pretty(&outputs)?);
    Ok(())
}

async fn run_service_order(args: ServiceOrderArgs, config: &AppConfig) -> Result<()> {
    let mut options = config.service_order;
    if let Some(minutes) = args.utc_offset_minutes {
        options.utc_offset_minutes = minutes;
    }

    let raw = tokio::fs::read(&args.event).await?;
    let event: Event = serde_json::from_slice(&raw)?;
    tracing::info!(
        "Mapping event {} to service-order fields ({})",
        event.id,
        service_order_file_name(&event)
    );

    let fields = map_event_to_service_order_fields(&event, &options);
    let json = serde_json::to_string_pretty(&fields)?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, json).await?;
            println!("📁 Fields saved to: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
