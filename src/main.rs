use clap::Parser;

use learn_smart_analytics::{
    app_state::AppState, config::Config, errors::AppResult, models::dto::ReportRequest,
};

#[derive(Parser, Debug)]
#[command(name = "learn-smart-report")]
#[command(about = "Print the Learn-Smart class or student analytics report as JSON")]
#[command(version)]
struct Args {
    /// Restrict every statistic to one topic
    #[arg(short, long, value_name = "NAME")]
    topic: Option<String>,

    /// Report on one student instead of the whole class
    #[arg(short, long, value_name = "ID")]
    student: Option<String>,
}

impl From<Args> for ReportRequest {
    fn from(args: Args) -> Self {
        ReportRequest {
            topic: args.topic,
            student_id: args.student,
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();

    let config = Config::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.rust_log))
        .init();

    let request = ReportRequest::from(args);
    let state = AppState::new(config).await?;
    let report = state
        .analytics_service
        .report(&request)
        .await
        .inspect_err(|e| log::error!("Report failed [{}]: {}", e.error_code(), e))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
