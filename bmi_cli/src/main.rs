use bmi_core::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "BMI health analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI and related metrics, and save the result to history
    Calc {
        /// Body weight
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Weight unit (kg, lb); defaults to the configured unit
        #[arg(long)]
        weight_unit: Option<String>,

        /// Height: a single value, or "FEET,INCHES" for ft_in
        #[arg(long, allow_hyphen_values = true)]
        height: String,

        /// Height unit (m, cm, in, ft_in); defaults to the configured unit
        #[arg(long)]
        height_unit: Option<String>,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// Sex used for BMR (male, female)
        #[arg(long)]
        sex: String,

        /// Name stored with the result
        #[arg(long, default_value = "User")]
        name: String,

        /// Do not save the result to history
        #[arg(long)]
        no_save: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also print diet and exercise suggestions
        #[arg(long)]
        suggest: bool,
    },

    /// Show the most recent saved results
    History {
        /// Number of entries to show; defaults to the configured limit
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show suggestions for a BMI value
    Suggest {
        #[arg(long, allow_negative_numbers = true)]
        bmi: f64,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        sex: Option<String>,
    },

    /// Show the health fact of the day
    Fact,

    /// List common questions, or answer one by number
    Faq {
        #[arg(long)]
        number: Option<usize>,
    },

    /// Export the full history as CSV
    Export {
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    bmi_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let history_path = Config::history_path(&data_dir);

    match cli.command {
        Commands::Calc {
            weight,
            weight_unit,
            height,
            height_unit,
            age,
            sex,
            name,
            no_save,
            json,
            suggest,
        } => {
            let request = CalcRequest {
                name,
                weight,
                weight_unit: weight_unit.unwrap_or_else(|| config.units.weight_unit.to_string()),
                height,
                height_unit: height_unit.unwrap_or_else(|| config.units.height_unit.to_string()),
                age,
                sex,
            };
            let history = (!no_save).then(|| JsonlHistory::new(&history_path));
            cmd_calc(request, history, json, suggest)
        }
        Commands::History { limit } => {
            cmd_history(&history_path, limit.unwrap_or(config.history.display_limit))
        }
        Commands::Suggest { bmi, age, sex } => cmd_suggest(bmi, age, sex),
        Commands::Fact => {
            println!("★ {}", health_fact_of_the_day(chrono::Local::now().date_naive()));
            Ok(())
        }
        Commands::Faq { number } => cmd_faq(&PremadeFaq, number),
        Commands::Export { output } => cmd_export(&history_path, &output),
    }
}

struct CalcRequest {
    name: String,
    weight: f64,
    weight_unit: String,
    height: String,
    height_unit: String,
    age: u32,
    sex: String,
}

fn cmd_calc(
    request: CalcRequest,
    history: Option<JsonlHistory>,
    json: bool,
    suggest: bool,
) -> Result<()> {
    let height: HeightInput = request.height.parse()?;
    let report = build_report(
        request.weight,
        &height,
        request.age,
        &request.sex,
        &request.weight_unit,
        &request.height_unit,
    )?;

    tracing::info!(
        bmi = report.bmi,
        category = %report.category,
        "Calculated BMI for {}",
        request.name
    );

    let sex: Sex = request.sex.parse()?;
    let suggestions = if suggest {
        Some(StaticSuggestions.suggest(
            report.bmi,
            report.category,
            Some(request.age),
            Some(sex),
        )?)
    } else {
        None
    };

    let saved = match history {
        Some(mut history) => {
            let record = ProfileRecord::new(
                request.name.clone(),
                request.age,
                sex,
                request.weight,
                request.weight_unit.parse()?,
                height,
                request.height_unit.parse()?,
                &report,
            );
            history.append(&record)?;
            true
        }
        None => false,
    };

    if json {
        let body = serde_json::json!({
            "name": request.name,
            "report": report,
            "suggestions": suggestions,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        display_report(&request.name, &report);
        if let Some(ref s) = suggestions {
            display_suggestions(report.category, s);
        }
        if saved {
            println!("\n(Result saved to history)");
        }
    }

    Ok(())
}

fn cmd_history(history_path: &std::path::Path, limit: usize) -> Result<()> {
    let profiles = read_profiles(history_path)?;
    if profiles.is_empty() {
        println!("No history found.");
        return Ok(());
    }

    println!("{:<15} {:<20} {:<10} {}", "Name", "Date", "BMI", "Category");
    println!("{}", "-".repeat(60));
    for p in recent_profiles(&profiles, limit) {
        println!(
            "{:<15} {:<20} {:<10} {}",
            p.name,
            p.saved_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            p.report.bmi,
            p.report.category
        );
    }
    println!("{}", "-".repeat(60));
    Ok(())
}

fn cmd_suggest(bmi: f64, age: Option<u32>, sex: Option<String>) -> Result<()> {
    if !bmi.is_finite() || bmi <= 0.0 {
        return Err(Error::InvalidMeasurement {
            field: "bmi",
            reason: format!("must be positive and non-zero, got {}", bmi),
        });
    }
    let sex = sex.map(|s| s.parse::<Sex>()).transpose()?;
    let category = classify_bmi(bmi);
    let suggestions = StaticSuggestions.suggest(bmi, category, age, sex)?;
    display_suggestions(category, &suggestions);
    Ok(())
}

fn cmd_faq(faq: &impl FaqProvider, number: Option<usize>) -> Result<()> {
    match number {
        Some(n) => {
            let answer = faq
                .answer(n)
                .ok_or_else(|| Error::Other(format!("No FAQ entry numbered {}", n)))?;
            println!("{}", answer);
        }
        None => {
            for (idx, question) in faq.questions() {
                println!("  {}. {}", idx, question);
            }
        }
    }
    Ok(())
}

fn cmd_export(history_path: &std::path::Path, output: &std::path::Path) -> Result<()> {
    let count = history_to_csv(history_path, output)?;
    if count == 0 {
        println!("No history found - nothing to export.");
    } else {
        println!("✓ Exported {} results to {}", count, output.display());
    }
    Ok(())
}

fn display_report(name: &str, report: &BmiReport) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  RESULT FOR: {}", name);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  BMI:          {:.2}", report.bmi);
    println!("  Category:     {}", report.category);
    println!("  Description:  {}", report.description);
    println!("  BMR:          {:.2} kcal/day", report.bmr);
    println!("  Water:        {:.2} liters/day", report.water_intake);
    println!(
        "  Healthy:      {:.2} - {:.2} kg",
        report.healthy_range.0, report.healthy_range.1
    );

    if report.kg_to_gain > 0.0 {
        println!("  → Gain ~{:.2} kg to reach the healthy range", report.kg_to_gain);
    }
    if report.kg_to_lose > 0.0 {
        println!("  → Lose ~{:.2} kg to reach the healthy range", report.kg_to_lose);
    }
}

fn display_suggestions(category: BmiCategory, suggestions: &Suggestions) {
    println!("\n*** HEALTH FACTS FOR {} ***", category.label().to_uppercase());
    for fact in &suggestions.health_facts {
        println!("  • {}", fact);
    }

    println!("\n*** EXERCISE PLAN ***");
    for exercise in &suggestions.exercise_plan {
        println!("  - {}", exercise);
    }

    println!("\n*** DIET TIPS ***");
    for tip in &suggestions.diet {
        println!("  - {}", tip);
    }

    if !suggestions.warnings.is_empty() {
        println!("\n*** WARNINGS ***");
        for warning in &suggestions.warnings {
            println!("  [!] {}", warning);
        }
    }
}
