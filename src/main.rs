use clap::Parser;
use event_planner::adapters::json::{JsonEventStore, JsonLogisticsStore, JsonParticipantStore};
use event_planner::domain::ports::EventStore;
use event_planner::utils::{logger, validation::Validate};
use event_planner::{AssociationService, CliConfig, CostEngine, SeedConfig};

async fn run(config: &CliConfig) -> event_planner::Result<()> {
    // 創建存儲和服務
    let events = JsonEventStore::new(&config.data_path);
    let participants = JsonParticipantStore::new(&config.data_path);
    let logistics = JsonLogisticsStore::new(&config.data_path);
    let service = AssociationService::new(events.clone(), participants, logistics);

    if let Some(path) = &config.seed_file {
        tracing::info!("Loading seed data from {}", path);
        let seed = SeedConfig::from_file(path)?;
        seed.validate()?;
        seed.apply(&events, &service).await?;
    }

    if let Some(filter) = config.cost_filter() {
        tracing::info!(
            "Recomputing costs for events of {} {} ({})",
            filter.first_name,
            filter.last_name,
            filter.role
        );
        let engine = CostEngine::new(events.clone());
        engine.recompute_costs(&filter).await?;

        for event in events
            .find_by_participant(&filter.last_name, &filter.first_name, filter.role)
            .await?
        {
            println!("💰 {} -> {:.2}", event.description, event.cost);
        }
    }

    if let Some((from, to)) = config.report_range() {
        match service.logistics_between(from, to).await? {
            Some(items) => {
                println!("📦 Logistics for events starting in {}..{}:", from, to);
                for item in items {
                    println!(
                        "  [{}] {} x{} @ {:.2}{}",
                        item.id,
                        item.description,
                        item.quantity,
                        item.unit_price,
                        if item.reserved { " (reserved)" } else { "" }
                    );
                }
            }
            None => println!("📦 No logistics for events starting in {}..{}", from, to),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting event-planner CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&config).await {
        Ok(()) => {
            tracing::info!("✅ event-planner run completed successfully!");
            println!("✅ Done");
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                event_planner::utils::error::ErrorSeverity::Low => 0,
                event_planner::utils::error::ErrorSeverity::Medium => 2,
                event_planner::utils::error::ErrorSeverity::High => 1,
                event_planner::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
