use clap::Parser;
use quick_invoice::domain::model::format_amount;
use quick_invoice::utils::logger;
use quick_invoice::{CliConfig, InvoiceEngine};
use std::io;

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting quick-invoice CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    let stdin = io::stdin();
    let mut engine = InvoiceEngine::new(&config, stdin.lock(), io::stdout()).with_preview(cli.preview);

    match engine.run() {
        Ok(report) => {
            if let Some(preview) = &report.preview {
                println!("\n{}\n", preview);
            }
            if !report.warnings.is_empty() {
                println!("⚠️  {} valor(es) no válido(s) se reemplazaron por 0:", report.warnings.len());
                for warning in &report.warnings {
                    println!("   - {}", warning);
                }
            }
            println!(
                "✅ Factura generada: {} ({} productos, total {})",
                report.output_path.display(),
                report.item_count,
                format_amount(report.grand_total)
            );
        }
        Err(e) => {
            tracing::error!("Invoice generation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            let exit_code = if e.is_config_error() { 2 } else { 1 };
            std::process::exit(exit_code);
        }
    }
}
