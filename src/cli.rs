use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::cost::{calculate_meeting_cost, convert_annual_to_hourly, format_currency, format_duration, CostResult};
use crate::http::{create_router, AppState};
use crate::report::{CostReport, FormattedCost};
use crate::timer::MeetingTimer;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "meeting-cost")]
#[command(about = "Calculate what a meeting costs, after the fact or live", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (extension optional)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Cost of a meeting between two times
    Calculate(CalculateArgs),
    /// Hourly rate for an annual salary
    Rate(RateArgs),
    /// Track the cost of a meeting as it happens
    Live(LiveArgs),
    /// Run the HTTP API
    Serve,
}

#[derive(ClapArgs, Debug)]
pub struct CalculateArgs {
    /// Start time (HH:MM today, or RFC 3339)
    #[arg(long, value_parser = parse_time)]
    pub start: DateTime<Utc>,

    /// End time (HH:MM today, or RFC 3339)
    #[arg(long, value_parser = parse_time)]
    pub end: DateTime<Utc>,

    /// Number of participants (default from config)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub participants: Option<u32>,

    /// Average hourly rate per participant
    #[arg(long, value_parser = parse_positive, conflicts_with = "annual_salary")]
    pub hourly_rate: Option<f64>,

    /// Average annual salary per participant (default from config)
    #[arg(short = 's', long, value_parser = parse_positive)]
    pub annual_salary: Option<f64>,

    /// Print JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug)]
pub struct RateArgs {
    /// Annual salary
    #[arg(value_parser = parse_positive)]
    pub annual_salary: f64,
}

#[derive(ClapArgs, Debug)]
pub struct LiveArgs {
    /// Number of participants (default from config)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub participants: Option<u32>,

    /// Average annual salary per participant (default from config)
    #[arg(short = 's', long, value_parser = parse_positive)]
    pub annual_salary: Option<f64>,

    /// Stop automatically after this many seconds
    #[arg(long = "for", value_name = "SECS")]
    pub for_secs: Option<u64>,

    /// Print one JSON object per update
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CostOutput {
    participants: u32,
    hourly_rate: f64,
    result: CostResult,
    formatted: FormattedCost,
}

/// Parse `HH:MM`, `HH:MM:SS` (local time today) or an RFC 3339 timestamp
pub fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .with_context(|| format!("Invalid time '{}': expected HH:MM or RFC 3339", value))?;

    match Local::now().date_naive().and_time(time).and_local_timezone(Local).earliest() {
        Some(local) => Ok(local.with_timezone(&Utc)),
        None => bail!("Time '{}' does not exist in the local timezone today", value),
    }
}

/// Parse a strictly positive, finite number
pub fn parse_positive(value: &str) -> Result<f64> {
    let number: f64 = value
        .parse()
        .with_context(|| format!("Invalid number '{}'", value))?;

    if !number.is_finite() || number <= 0.0 {
        bail!("Expected a positive number, got {}", value);
    }

    Ok(number)
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        CliCommand::Calculate(args) => calculate(args, &config),
        CliCommand::Rate(args) => {
            println!("{}/hour", format_currency(convert_annual_to_hourly(args.annual_salary)));
            Ok(())
        }
        CliCommand::Live(args) => live(args, &config).await,
        CliCommand::Serve => serve(&config).await,
    }
}

fn calculate(args: CalculateArgs, config: &Config) -> Result<()> {
    let participants = args.participants.unwrap_or(config.meeting.participants);
    let hourly_rate = match args.hourly_rate {
        Some(rate) => rate,
        None => convert_annual_to_hourly(args.annual_salary.unwrap_or(config.meeting.annual_salary)),
    };

    let result = calculate_meeting_cost(args.start, args.end, participants, hourly_rate);
    let report = CostReport::new(result, participants);

    if args.json {
        let output = CostOutput {
            participants,
            hourly_rate,
            result,
            formatted: report.formatted(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match report.render(false) {
        Some(text) => println!("{}", text),
        None => println!("No cost: the end time must be after the start time"),
    }

    Ok(())
}

async fn live(args: LiveArgs, config: &Config) -> Result<()> {
    let mut timer_config = config.timer_config();
    if let Some(participants) = args.participants {
        timer_config.participants = participants;
    }
    if let Some(salary) = args.annual_salary {
        timer_config.annual_salary = salary;
    }

    let participants = timer_config.participants;
    let hourly_rate = convert_annual_to_hourly(timer_config.annual_salary);
    let timer = MeetingTimer::new(timer_config);
    let mut updates = timer.subscribe();

    timer.start().await?;

    if !args.json {
        println!("Meeting started, press Ctrl-C to stop");
    }

    let deadline = async {
        match args.for_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let result = *updates.borrow_and_update();
                print_update(result, participants, hourly_rate, args.json)?;
            }
            _ = &mut ctrl_c => break,
            _ = &mut deadline => break,
        }
    }

    let stats = timer.stop().await?;

    if !args.json {
        println!("\n\n{}", CostReport::new(stats.result, stats.participants));
    }

    Ok(())
}

fn print_update(result: CostResult, participants: u32, hourly_rate: f64, json: bool) -> Result<()> {
    if json {
        let output = CostOutput {
            participants,
            hourly_rate,
            result,
            formatted: CostReport::new(result, participants).formatted(),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    write!(
        stdout,
        "\r{}  ({}, {}/min)        ",
        format_currency(result.total_cost),
        format_duration(result.duration_hours),
        format_currency(result.cost_per_minute)
    )?;
    stdout.flush()?;

    Ok(())
}

async fn serve(config: &Config) -> Result<()> {
    let addr = config.http_addr();
    let app = create_router(AppState::new(config.timer_config()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("{} listening on http://{}", config.service.name, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}
