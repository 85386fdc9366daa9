use clap::Parser;
use section_normalizer::app::single::run_single;
use section_normalizer::core::ConfigProvider;
use section_normalizer::utils::{logger, validation::Validate};
use section_normalizer::{
    BatchPipeline, CliConfig, ManifestIndex, NormalizeEngine, Normalizer, NormalizerConfig,
    NormalizerError, RunMode,
};

fn main() {
    let cli = CliConfig::parse();

    // 設定檔在日誌初始化之前載入，錯誤直接寫到 stderr
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting section normalizer");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(&cli, config) {
        tracing::error!(
            "❌ Normalization failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}

// 先決定模式；輸入檔是否存在只在批次模式讀取時檢查
fn run(cli: &CliConfig, config: NormalizerConfig) -> Result<(), NormalizerError> {
    let mode = cli.mode(&config)?;
    config.validate()?;

    let index = ManifestIndex::load(config.manifest_path())?;
    let normalizer = Normalizer::new(index);

    match mode {
        RunMode::Single { section, row } => {
            println!("{}", run_single(&normalizer, &section, &row, cli.json)?);
        }
        RunMode::Batch => {
            let engine = NormalizeEngine::new(BatchPipeline::new(config, normalizer));
            let summary = engine.run()?;
            if let Some(report) = summary.grade {
                eprintln!("{}", report);
            }
        }
    }

    Ok(())
}
