use clap::Parser;
use syllabus_etl::config::cli::CommandGenerator;
use syllabus_etl::utils::{logger, validation::Validate};
use syllabus_etl::{CliConfig, FetchParams, SyllabusError, SyllabusPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("starting syllabus-etl");
    if config.verbose {
        tracing::debug!("config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {e}");
        eprintln!("{}: {e}", e.status());
        std::process::exit(1);
    }

    let params = FetchParams {
        department_code: config.department.clone(),
        year: config.year.clone(),
    };

    let mut pipeline = SyllabusPipeline::new(config.clone());
    if let Some(generator) = CommandGenerator::from_command(&config.generator) {
        pipeline = pipeline.with_generator(Box::new(generator));
    }

    match pipeline.fetch_subjects(&params).await {
        Ok(payload) => {
            tracing::info!(
                "resolved {} subjects for {}-{}",
                payload.subjects.len(),
                payload.meta.department,
                payload.meta.year
            );
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Err(e @ SyllabusError::Http(_)) => {
            // transport details stay in the log, not the user-facing line
            tracing::error!("network failure: {e}");
            eprintln!("502: failed to reach the syllabus service");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("resolution failed: {e}");
            eprintln!("{}: {e}", e.status());
            std::process::exit(1);
        }
    }
}
