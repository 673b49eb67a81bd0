use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use clap::Subcommand;
use cron_period::{
    assemble_cron_period, inspect_cron_period, Category, EditorOptions, Field, RepeatSpec,
};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Command {
    #[command(about = "Validate an expression and print its period")]
    Parse {
        expression: String,
        #[arg(long, help = "Print the full report as JSON")]
        json: bool,
    },
    #[command(about = "Build an expression from a period and field values")]
    Assemble {
        #[arg(short, long)]
        category: Category,
        #[arg(long)]
        minute: Option<String>,
        #[arg(long)]
        hour: Option<String>,
        #[arg(long)]
        day_of_month: Option<String>,
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        day_of_week: Option<String>,
        #[arg(short, long, help = "Repeat every N periods")]
        repeat: Option<u32>,
        #[arg(long, help = "Field carrying the repeat step (defaults to the period's own)")]
        repeat_field: Option<Field>,
    },
    #[command(about = "Load editor options from a TOML file and print the editor state")]
    Editor {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Validate, classify and build period-shaped cron expressions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn init_tracing() {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_command(expression: &str, json: bool) -> anyhow::Result<ExitCode> {
    let report = inspect_cron_period(expression);
    debug!(expression, valid = report.valid, "cli:parse");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let (Some(category), Some(fields)) = (report.category, &report.fields) {
        println!("period: {category}");
        for (field, value) in fields {
            println!("{field}: {value}");
        }
        if let Some(repeat) = report.repeat {
            let field = repeat.field().map(|f| f.to_string()).unwrap_or_default();
            println!("repeat: every {} on {field}", repeat.step);
        }
    } else if let Some(message) = &report.message {
        eprintln!("{message}");
    }

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn assemble_command(
    category: Category,
    values: BTreeMap<Field, String>,
    repeat: Option<u32>,
    repeat_field: Option<Field>,
) -> anyhow::Result<ExitCode> {
    let repeat = match (repeat, repeat_field.or_else(|| category.repeat_field())) {
        (Some(step), Some(field)) => Some(RepeatSpec::new(step, field)),
        (Some(_), None) => bail!("a {category} period cannot repeat"),
        (None, _) => None,
    };

    println!("{}", assemble_cron_period(category, &values, repeat)?);
    Ok(ExitCode::SUCCESS)
}

fn editor_command(config: PathBuf) -> anyhow::Result<ExitCode> {
    let document = std::fs::read_to_string(&config)
        .with_context(|| format!("Failed to read {}", config.display()))?;
    let editor = EditorOptions::from_toml(&document)?.init()?;

    println!("value: {}", editor.value()?);
    let blocks: Vec<&str> = editor
        .visible_blocks()
        .iter()
        .map(|block| block.as_str())
        .collect();
    println!("blocks: {}", blocks.join(", "));
    if let Some(request) = editor.save_request()? {
        println!("save: POST {} {}", request.url, request.body);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { expression, json } => parse_command(&expression, json),
        Command::Assemble {
            category,
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
            repeat,
            repeat_field,
        } => {
            let values = [
                (Field::Minute, minute),
                (Field::Hour, hour),
                (Field::DayOfMonth, day_of_month),
                (Field::Month, month),
                (Field::DayOfWeek, day_of_week),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect();
            assemble_command(category, values, repeat, repeat_field)
        }
        Command::Editor { config } => editor_command(config),
    }
}
