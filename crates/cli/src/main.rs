use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::RunContext;
use server::{AppConfig, Mode, TripPlanner, init_tracing, prompt_parser};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use trip_model::{PlanningResult, PlanningState};

/// Ski Planner - multi-stage ski trip planning with Amazon Bedrock
#[derive(Parser)]
#[command(name = "ski-planner")]
#[command(about = "Plan ski trips with a four-stage LLM pipeline", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    /// Command to run; falls back to APP_MODE when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print only the final plan for a trip
    Plan {
        /// Where to ski
        #[arg(long)]
        location: String,

        /// beginner, intermediate or expert
        #[arg(long, default_value = "intermediate")]
        skill_level: String,
    },

    /// Print every section of the plan
    Detailed {
        /// Where to ski
        #[arg(long)]
        location: String,

        /// beginner, intermediate or expert
        #[arg(long, default_value = "intermediate")]
        skill_level: String,

        /// Also print the prompts and replies of each stage
        #[arg(long)]
        transcript: bool,
    },

    /// Show what the prompt parser extracts from free text (no model calls)
    Parse {
        /// Free-text request, e.g. "Plan a ski trip to Aspen for beginners"
        prompt: String,
    },

    /// Run the sample prompts through the planner
    Demo,

    /// Serve the HTTP interface
    Serve,

    /// Run concurrent planning requests and report latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "10")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "4")]
        concurrent: usize,
    },
}

impl Commands {
    /// Commands that call the model up front. `serve` starts without a key
    /// and reports the failure per request instead.
    fn needs_model(&self) -> bool {
        matches!(
            self,
            Commands::Plan { .. }
                | Commands::Detailed { .. }
                | Commands::Demo
                | Commands::Benchmark { .. }
        )
    }
}

const DEMO_PROMPTS: &[&str] = &[
    "Plan a ski trip to Aspen for beginners",
    "Expert skiing in Chamonix next week",
    "Family ski holiday to Park City, Utah",
];

const SAMPLE_TRIPS: &[(&str, &str)] = &[
    ("Aspen", "beginner"),
    ("Whistler", "intermediate"),
    ("Chamonix", "expert"),
    ("Niseko", "intermediate"),
    ("Zermatt", "expert"),
    ("Lake Tahoe", "beginner"),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.config.log_level);

    let command = cli.command.unwrap_or(match cli.config.mode {
        Mode::Demo => Commands::Demo,
        Mode::Server => Commands::Serve,
    });

    if command.needs_model() && !cli.config.has_credentials() {
        println!(
            "{} AWS_BEARER_TOKEN_BEDROCK is not set; skipping model calls.",
            "⚠".yellow()
        );
        println!("  Set it in the environment or a .env file and try again.");
        return Ok(());
    }

    // Dispatch to appropriate command handler
    match command {
        Commands::Parse { prompt } => handle_parse(&prompt),
        Commands::Serve => {
            let planner = TripPlanner::from_config(cli.config.bedrock_config())?;
            server::http::serve(&cli.config, planner).await?;
        }
        Commands::Plan {
            location,
            skill_level,
        } => {
            let planner = TripPlanner::from_config(cli.config.bedrock_config())?;
            handle_plan(&planner, &location, &skill_level).await;
        }
        Commands::Detailed {
            location,
            skill_level,
            transcript,
        } => {
            let planner = TripPlanner::from_config(cli.config.bedrock_config())?;
            handle_detailed(&planner, &location, &skill_level, transcript).await?;
        }
        Commands::Demo => {
            let planner = TripPlanner::from_config(cli.config.bedrock_config())?;
            handle_demo(&planner).await;
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let planner = TripPlanner::from_config(cli.config.bedrock_config())?;
            handle_benchmark(planner, requests, concurrent).await?;
        }
    }

    Ok(())
}

/// Handle the 'plan' command
async fn handle_plan(planner: &TripPlanner, location: &str, skill_level: &str) {
    let start = Instant::now();
    let plan = planner.plan_trip(location, skill_level).await;

    println!(
        "{}",
        format!("Ski plan for {} ({})", location, skill_level).bold().blue()
    );
    println!("{}", plan);
    println!("{} Finished in {:.1?}", "✓".green(), start.elapsed());
}

/// Handle the 'detailed' command
async fn handle_detailed(
    planner: &TripPlanner,
    location: &str,
    skill_level: &str,
    transcript: bool,
) -> Result<()> {
    let state = planner
        .run(location, skill_level, &RunContext::new("cli"))
        .await
        .context("Failed to generate ski plan")?;

    if transcript {
        print_transcript(&state);
    }
    print_result(&PlanningResult::from(state));
    Ok(())
}

/// Handle the 'parse' command
fn handle_parse(prompt: &str) {
    let request = prompt_parser::parse(prompt);
    println!("{}", "Parsed request:".bold().blue());
    println!("{}Location: {}", "• ".green(), request.location);
    println!("{}Skill level: {}", "• ".green(), request.skill_level);
}

/// Handle the 'demo' command
async fn handle_demo(planner: &TripPlanner) {
    for (i, prompt) in DEMO_PROMPTS.iter().enumerate() {
        println!(
            "\n{}",
            format!("[{}/{}] \"{}\"", i + 1, DEMO_PROMPTS.len(), prompt).bold()
        );
        let request = prompt_parser::parse(prompt);
        println!(
            "{}Parsed as {} / {}",
            "• ".cyan(),
            request.location,
            request.skill_level
        );

        match planner
            .get_detailed_plan_with_context(
                &request.location,
                request.skill_level.as_str(),
                &RunContext::new("demo"),
            )
            .await
        {
            Some(result) => print_result(&result),
            None => println!("{} {}", "✗".red(), server::FALLBACK_PLAN),
        }
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(planner: TripPlanner, requests: usize, concurrent: usize) -> Result<()> {
    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_start = Instant::now();

    // Use tokio::spawn to make concurrent requests
    let mut handles = vec![];
    for _ in 0..requests {
        let (location, skill_level) =
            SAMPLE_TRIPS[rand::random::<u32>() as usize % SAMPLE_TRIPS.len()];
        let planner = planner.clone();
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            let result = planner
                .get_detailed_plan_with_context(location, skill_level, &RunContext::new("benchmark"))
                .await;
            Ok::<_, anyhow::Error>((start.elapsed(), result.is_some()))
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    let mut failures = 0;
    for handle in handles {
        let (elapsed, ok) = handle.await??;
        if ok {
            timings.push(elapsed);
        } else {
            failures += 1;
        }
    }
    let wall_time = wall_start.elapsed();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} failed)", requests, failures);
    println!("Wall time: {:?}", wall_time);
    if timings.is_empty() {
        println!("{} No successful requests", "✗".red());
        return Ok(());
    }

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = timings.len() as f32 / wall_time.as_secs_f32();

    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} plans/second", throughput);

    Ok(())
}

/// Helper function to print every section of a plan
fn print_result(result: &PlanningResult) {
    println!(
        "{}",
        format!("Ski plan: {} ({})", result.location, result.skill_level)
            .bold()
            .blue()
    );
    let sections = [
        ("Weather", &result.weather_info),
        ("Resorts", &result.resort_recommendations),
        ("Gear", &result.gear_suggestions),
        ("Final plan", &result.final_plan),
    ];
    for (title, body) in sections {
        println!("\n{}", title.bold().green());
        println!("{}", body);
    }
}

fn print_transcript(state: &PlanningState) {
    println!("{}", "Transcript:".bold().blue());
    for entry in state.transcript() {
        println!("\n{}", format!("[{}]", entry.stage).cyan());
        println!("{} {}", "system:".dimmed(), entry.system_instruction);
        println!("{} {}", "user:".dimmed(), entry.user_instruction);
        println!("{} {}", "reply:".dimmed(), entry.response);
    }
}
