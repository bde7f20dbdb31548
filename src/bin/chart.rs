use bazi_engine::domain::model::{BirthRequest, CalendarKind, Gender};
use bazi_engine::utils::logger;
use bazi_engine::{AstronomicalCalendar, PillarEngine};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CalendarArg {
    Solar,
    Lunar,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

/// 離線排盤，輸出命盤 JSON，不呼叫 LLM
#[derive(Debug, Parser)]
#[command(name = "chart")]
#[command(about = "Print a BaZi chart as JSON without interpretation")]
struct Args {
    /// 出生日期 YYYY-MM-DD
    #[arg(long)]
    date: String,

    #[arg(long, value_enum, default_value = "solar")]
    calendar: CalendarArg,

    /// 農曆閏月
    #[arg(long)]
    leap_month: bool,

    /// 時辰區間，例如 11-13
    #[arg(long, default_value = "23-01")]
    time: String,

    #[arg(long, value_enum, default_value = "male")]
    gender: GenderArg,

    #[arg(long)]
    city: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_tool_logger(args.verbose);

    let request = BirthRequest {
        birthdate: args.date,
        calendar: match args.calendar {
            CalendarArg::Solar => CalendarKind::Solar,
            CalendarArg::Lunar => CalendarKind::Lunar,
        },
        leap_month: args.leap_month,
        birth_time: args.time,
        gender: match args.gender {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        },
        city: args.city,
    };

    let engine = PillarEngine::new(AstronomicalCalendar::new());
    let chart = engine.calculate(&request)?;

    tracing::info!("✅ {} ({})", chart.pillars, chart.lunar);
    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}
