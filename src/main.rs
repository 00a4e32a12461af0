use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use powercast::config::PowercastConfig;
use powercast::forecast::{DailyInput, ForecastService, HourlyInput, MonthlyInput};
use powercast::models::{HeatingType, HomeSize};
use powercast::report::{self, OutputFormat};
use powercast::{PowercastError, calendar, logging, predictor, web};

#[derive(Debug, Parser)]
#[command(
    name = "powercast",
    about = "Household electricity usage forecasting from a trained point-estimate model",
    version
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Forecast the next hour from the previous hour's usage
    Hourly(HourlyArgs),

    /// Forecast a day from the usage one day and one week earlier
    Daily(DailyArgs),

    /// Forecast a month and apply household adjustments
    Monthly(MonthlyArgs),

    /// Serve the forecast forms over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct HourlyArgs {
    /// Hour of day (0-23)
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(0..=23))]
    hour: u32,

    /// Day of the week (0=Mon, 6=Sun)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=6))]
    day_of_week: u32,

    /// Month (1-12)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,

    /// Previous hour power usage (kW)
    #[arg(long, default_value_t = 1.0, value_parser = non_negative)]
    previous_usage: f64,
}

#[derive(Debug, Args)]
struct DailyArgs {
    /// Date to predict (YYYY-MM-DD), defaults to tomorrow
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Usage on the day before the target date (kW)
    #[arg(long, default_value_t = 1.0, value_parser = non_negative)]
    previous_day: f64,

    /// Usage one week before the target date (kW)
    #[arg(long, default_value_t = 1.0, value_parser = non_negative)]
    previous_week: f64,
}

#[derive(Debug, Args)]
struct MonthlyArgs {
    /// Year to predict
    #[arg(long, default_value_t = 2024)]
    year: i32,

    /// Month to predict (1-12)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,

    /// Total electricity used in the previous month (kWh)
    #[arg(long, default_value_t = 1000.0, value_parser = non_negative)]
    previous_month_usage: f64,

    /// Typical monthly electricity usage (kWh)
    #[arg(long, default_value_t = 1200.0, value_parser = non_negative)]
    average_monthly_usage: f64,

    /// Expected average temperature (°C)
    #[arg(long, default_value_t = 20, allow_negative_numbers = true,
          value_parser = clap::value_parser!(i32).range(-10..=40))]
    temperature: i32,

    /// Number of people in the household (1-8)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=8))]
    household_size: u8,

    /// Home size band: "Under 1000", 1000-1500, 1500-2000, 2000-2500, 2500-3000, "Over 3000"
    #[arg(long, default_value = "1500-2000")]
    home_size: String,

    /// Primary heating type: Electric, Gas, Oil, "Heat Pump", Other
    #[arg(long, default_value = "Electric")]
    heating: String,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Port to listen on (overrides server.port)
    #[arg(long)]
    port: Option<u16>,
}

fn non_negative(value: &str) -> std::result::Result<f64, String> {
    let parsed: f64 = value.parse().map_err(|_| format!("'{value}' is not a number"))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(format!("{value} must be zero or positive"));
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<PowercastError>() {
                Some(input_err) if input_err.is_input_error() => {
                    eprintln!("Error: {}", input_err.user_message());
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        verbose,
        format,
        command,
    } = cli;

    let config = PowercastConfig::load_from_path(config_path.clone())?;
    logging::init(&config.logging, verbose)?;

    let Some(command) = command else {
        print_overview(config_path, verbose, &config);
        return Ok(());
    };

    let predictor = predictor::load_predictor(&config.model).context("Failed to load model")?;
    let service = ForecastService::new(predictor, config.forecast.clone());
    tracing::debug!("Using {} predictor", service.predictor_name());

    let output = match command {
        Commands::Hourly(args) => {
            let forecast = service.hourly(HourlyInput {
                hour: args.hour,
                day_of_week: args.day_of_week,
                month: args.month,
                previous_hour_usage: args.previous_usage,
            })?;
            report::render(&forecast, format)?
        }
        Commands::Daily(args) => {
            let forecast = service.daily(DailyInput {
                date: args.date.unwrap_or_else(calendar::tomorrow),
                previous_day_usage: args.previous_day,
                previous_week_usage: args.previous_week,
            })?;
            report::render(&forecast, format)?
        }
        Commands::Monthly(args) => {
            let forecast = service.monthly(MonthlyInput {
                year: args.year,
                month: args.month,
                previous_month_usage: args.previous_month_usage,
                average_monthly_usage: args.average_monthly_usage,
                average_temperature_c: args.temperature,
                household_size: args.household_size,
                home_size: args.home_size.parse::<HomeSize>()?,
                heating_type: args.heating.parse::<HeatingType>()?,
            })?;
            report::render(&forecast, format)?
        }
        Commands::Serve(args) => {
            let mut server = config.server.clone();
            if let Some(port) = args.port {
                server.port = port;
            }
            return web::run(Arc::new(service), &server).await;
        }
    };

    println!("{output}");
    Ok(())
}

fn print_overview(config_path: Option<PathBuf>, verbose: bool, config: &PowercastConfig) {
    println!("⚡ Powercast v{}", powercast::VERSION);
    println!("Household electricity usage forecasting.");
    println!();
    println!("Commands: hourly, daily, monthly, serve (see --help)");

    match PowercastConfig::resolve_config_path(config_path) {
        Some(path) => println!("Using config from: {}", path.display()),
        None => println!("Using config from: built-in defaults"),
    }
    println!(
        "Model: {:?}{}",
        config.model.kind,
        config
            .model
            .path
            .as_deref()
            .map(|p| format!(" ({p})"))
            .unwrap_or_default()
    );

    if verbose {
        println!(
            "Forecast years: {}-{}",
            config.forecast.min_year, config.forecast.max_year
        );
        println!("Log level: {}", config.logging.level);
        println!("Server: {}:{}", config.server.host, config.server.port);
    }
}
