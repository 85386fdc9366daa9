use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "section_normalizer=debug,info"
    } else {
        "section_normalizer=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// 初始化日誌；`RUST_LOG` 優先於 verbose 預設值
///
/// stdout 保留給 JSONL 輸出，日誌一律寫到 stderr。
/// `json` 為 true 時輸出機器可讀的 JSON 行，適合交給批次排程收集。
pub fn init_logger(verbose: bool, json: bool) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(default_filter(verbose));

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}
