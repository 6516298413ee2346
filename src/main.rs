use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{error, info};

mod advice;
mod categories;
mod config;
mod dataset;
mod error;
mod form;
mod grade;
mod logging;
mod metrics;
mod models;
mod predictor;
mod report;
mod usage;

use categories::{label_table, ParentalEducation, ParentalSupport, YesNo};
use config::Config;
use form::FormInput;
use models::{FeatureField, StudentAdvice};
use predictor::AppContext;

#[derive(Parser)]
#[command(name = "gpa-advisor")]
#[command(about = "Predict student GPA and suggest study habit changes", long_about = None)]
struct Cli {
    /// Model artifact (JSON). Falls back to GPA_MODEL_PATH.
    #[arg(long, global = true)]
    model: Option<PathBuf>,
    /// Log file. Falls back to GPA_LOG_FILE.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict a single student from flags
    Predict {
        #[command(flatten)]
        student: StudentArgs,
        /// Print the prediction and recommendations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill in students one field at a time
    Interactive,
    /// Predict every student in a CSV and write a markdown report
    Batch {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Score the model against a labelled CSV dataset
    Evaluate {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Count predictions recorded in the log
    Usage,
    /// List the codes accepted by categorical fields
    Labels,
}

/// Categorical fields accept either the numeric code or the label.
#[derive(Args)]
struct StudentArgs {
    #[arg(long)]
    age: String,
    #[arg(long)]
    parental_education: String,
    #[arg(long)]
    study_time_weekly: String,
    #[arg(long)]
    absences: String,
    #[arg(long)]
    tutoring: String,
    #[arg(long)]
    parental_support: String,
    #[arg(long)]
    extracurricular: String,
    #[arg(long)]
    sports: String,
    #[arg(long)]
    music: String,
    #[arg(long)]
    volunteering: String,
}

impl StudentArgs {
    fn to_form(&self) -> error::Result<FormInput> {
        let mut form = FormInput::new();
        for (field, raw) in [
            (FeatureField::Age, &self.age),
            (FeatureField::ParentalEducation, &self.parental_education),
            (FeatureField::StudyTimeWeekly, &self.study_time_weekly),
            (FeatureField::Absences, &self.absences),
            (FeatureField::Tutoring, &self.tutoring),
            (FeatureField::ParentalSupport, &self.parental_support),
            (FeatureField::Extracurricular, &self.extracurricular),
            (FeatureField::Sports, &self.sports),
            (FeatureField::Music, &self.music),
            (FeatureField::Volunteering, &self.volunteering),
        ] {
            form.set(field, raw)?;
        }
        Ok(form)
    }
}

fn load_context(config: &Config) -> anyhow::Result<AppContext> {
    AppContext::load(&config.model_path, config.log_path.clone()).with_context(|| {
        format!(
            "model {} could not be loaded; no predictions will be served",
            config.model_path.display()
        )
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.model, cli.log_file);

    logging::init(&config.log_path)
        .with_context(|| format!("failed to open log file {}", config.log_path.display()))?;
    info!("App started");

    match cli.command {
        Commands::Predict { student, json } => {
            let ctx = load_context(&config)?;
            let advice = student
                .to_form()
                .and_then(|form| form.finish())
                .and_then(|student| ctx.advise(&student));
            let advice = match advice {
                Ok(advice) => advice,
                Err(err) => {
                    error!("Prediction failed: {err:?}");
                    return Err(err).context("prediction failed");
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&advice)?);
            } else {
                print!("{}", report::format_advice(&advice));
            }
        }
        Commands::Interactive => {
            let ctx = load_context(&config)?;
            let stdin = std::io::stdin();
            let summary = form::run_session(&ctx, stdin.lock(), std::io::stdout())?;
            info!(
                "Session ended: {} served, {} failed",
                summary.served, summary.failed
            );
        }
        Commands::Batch { csv, out } => {
            let ctx = load_context(&config)?;
            let rows = dataset::read_path(&csv)
                .with_context(|| format!("failed to read {}", csv.display()))?;

            let mut students = Vec::with_capacity(rows.len());
            for row in rows {
                let label = row
                    .student_id
                    .clone()
                    .unwrap_or_else(|| format!("Row {}", row.row));
                match ctx.advise(&row.features) {
                    Ok(advice) => students.push(StudentAdvice { label, advice }),
                    Err(err) => error!("Prediction failed for {label}: {err:?}"),
                }
            }

            let report = report::build_report(
                &csv.display().to_string(),
                chrono::Local::now().naive_local(),
                &students,
            );
            std::fs::write(&out, report)?;
            println!(
                "Report for {} students written to {}.",
                students.len(),
                out.display()
            );
        }
        Commands::Evaluate { csv, json } => {
            let ctx = load_context(&config)?;
            let rows = dataset::read_path(&csv)
                .with_context(|| format!("failed to read {}", csv.display()))?;

            let mut predictions = Vec::with_capacity(rows.len());
            let mut targets = Vec::with_capacity(rows.len());
            for row in &rows {
                let target = row
                    .gpa
                    .with_context(|| format!("row {} has no GPA value", row.row))?;
                predictions.push(ctx.predict(&row.features)?.gpa);
                targets.push(target);
            }

            let scores = metrics::RegressionMetrics::compute(&predictions, &targets);
            info!("Evaluated {} rows from {}", scores.rows, csv.display());
            if json {
                println!("{}", serde_json::to_string_pretty(&scores)?);
            } else {
                println!("--- Linear regression on {} ---", csv.display());
                println!("Rows: {}", scores.rows);
                println!("MSE:  {:.4}", scores.mse);
                println!("MAE:  {:.4}", scores.mae);
                println!("RMSE: {:.4}", scores.rmse);
                println!("R²:   {:.4}", scores.r2);
            }
        }
        Commands::Usage => {
            let count = usage::count_predictions(&config.log_path);
            println!("Predictions made so far: {count}");
        }
        Commands::Labels => {
            let tables = [
                ("ParentalEducation", label_table::<ParentalEducation>()),
                ("ParentalSupport", label_table::<ParentalSupport>()),
                (
                    "Tutoring, Extracurricular, Sports, Music, Volunteering",
                    label_table::<YesNo>(),
                ),
            ];
            for (fields, table) in tables {
                println!("{fields}:");
                for (code, label) in table {
                    println!("  {code} = {label}");
                }
            }
        }
    }

    Ok(())
}
