use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tenki::data::{format_precip, format_probability, format_temp, DEFAULT_WINDOW_HOURS};
use tenki::table::Table;
use tenki::{Briefing, Pipeline, Settings};

#[derive(Parser)]
#[command(name = "tenki")]
#[command(about = "Short-range weather briefing with a regional comment")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Place name, landmark or lat,long pair
    #[arg(required = true)]
    query: Vec<String>,

    /// Output the briefing as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Seed for comment selection, for reproducible output
    #[arg(long, env = "TENKI_SEED")]
    seed: Option<u64>,

    /// Timeout for each network stage, in seconds
    #[arg(long, env = "TENKI_TIMEOUT", default_value_t = 15, value_name = "SECS")]
    timeout: u64,

    /// Language of geocoding results
    #[arg(long, env = "TENKI_LANGUAGE", default_value = "ja", value_name = "TAG")]
    language: String,

    /// Timezone forecast times are shown in
    #[arg(long, env = "TENKI_DISPLAY_TZ", default_value = "Asia/Tokyo", value_name = "TZ")]
    display_tz: String,

    /// Number of upcoming hours to show
    #[arg(long, env = "TENKI_HOURS", default_value_t = DEFAULT_WINDOW_HOURS, value_name = "N")]
    hours: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let display_tz: Tz = self
            .display_tz
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("unknown timezone '{}'", self.display_tz))?;
        let settings = Settings {
            language: self.language.clone(),
            display_tz,
            window_hours: self.hours,
            stage_timeout: Duration::from_secs(self.timeout),
            ..Settings::default()
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tenki=debug,warn" } else { "tenki=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Render a briefing for the terminal.
///
/// `updated` is shown in the footer converted to `display_tz`.
fn render_briefing(briefing: &Briefing, display_tz: Tz, updated: DateTime<Utc>) -> String {
    let Briefing::Success {
        display_name,
        window,
        comment,
        ..
    } = briefing
    else {
        return format!("{}\n", briefing.failure_message().unwrap_or_default());
    };

    let rows = window.rows();
    let table = Table::new()
        .column(
            "時刻",
            rows.iter().map(|r| r.time.format("%H:%M").to_string()).collect(),
        )
        .column(
            "天気",
            rows.iter().map(|r| r.code.symbol(r.hour())).collect(),
        )
        .column("気温", rows.iter().map(|r| format_temp(r.temperature)).collect())
        .column(
            "降水確率",
            rows.iter()
                .map(|r| format_probability(r.precipitation_probability))
                .collect(),
        )
        .column(
            "降水量",
            rows.iter().map(|r| format_precip(r.precipitation)).collect(),
        );

    format!(
        "直近{}時間の天気 | {}\n{}\n{}\n\n更新: {} • Powered by Open-Meteo\n",
        window.len(),
        display_name,
        table.render(),
        comment,
        updated.with_timezone(&display_tz).format("%Y-%m-%d %H:%M %Z"),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = cli.settings()?;
    let pipeline = Pipeline::open_meteo(&settings).context("failed to set up HTTP client")?;
    let query = cli.query.join(" ");

    let briefing = match cli.seed {
        Some(seed) => {
            pipeline
                .run_with_rng(&query, &mut StdRng::seed_from_u64(seed))
                .await
        }
        None => pipeline.run(&query).await,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&briefing)?);
    } else {
        print!(
            "{}",
            render_briefing(&briefing, settings.display_tz, Utc::now())
        );
    }

    Ok(if briefing.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
