use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fuzzy_priority::export::{write_curve_csv, ExportFormat};
use fuzzy_priority::scenario::{FallbackPolicy, PriorityLevel, ScenarioBatch, ScenarioConfig};
use fuzzy_priority::{DefuzzificationOp, MamdaniInference, PrioritySystem, Variables};

#[derive(Parser, Debug)]
#[command(name = "priority-sim", version, about = "Fuzzy disaster-response priority scoring")]
struct Args {
    /// JSON model definition replacing the standard variables
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Defuzzification method: centroid, cog, bisector, mom, lom, som
    #[arg(long, global = true, default_value = "centroid")]
    defuzz: DefuzzificationOp,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a batch of random scenarios and write them to a file
    Simulate {
        #[arg(long, default_value_t = 100)]
        samples: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file, defaults to simulation_results_<timestamp>.<format>
        #[arg(long)]
        output: Option<PathBuf>,

        /// csv or json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// Fail on scenarios where no rule fires instead of scoring them 0
        #[arg(long)]
        strict: bool,

        /// Evaluate on all cores (needs the `parallel` feature)
        #[arg(long)]
        parallel: bool,
    },
    /// Score a single scenario
    Infer {
        damage: f64,
        accessibility: f64,
        population: f64,
    },
    /// Print the rule base
    Rules,
    /// Write the sampled membership functions of every variable as CSV
    Curves {
        #[arg(long, default_value_t = 0.1)]
        step: f64,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let system = load_system(args.model.as_deref(), args.defuzz)?;

    match args.command {
        Command::Simulate {
            samples,
            seed,
            output,
            format,
            strict,
            parallel,
        } => {
            let config = ScenarioConfig::default()
                .with_samples(samples)
                .with_seed(seed)
                .with_parallel(parallel)
                .with_fallback(if strict { FallbackPolicy::Propagate } else { FallbackPolicy::Zero });

            simulate(&system, &config, output, format)
        },
        Command::Infer {
            damage,
            accessibility,
            population,
        } => {
            let inference = system.evaluate(fuzzy_priority::Inputs::new(damage, accessibility, population))?;
            let score = inference.score();

            println!("score: {score:.2}");
            println!("level: {}", PriorityLevel::from_score(score));
            println!("defuzzification: {}", system.engine().defuzzification());
            println!("rules fired: {}", inference.fired_rules());
            for (term, strength) in inference.strengths() {
                println!("  {term:<12} {strength:.3}");
            }

            Ok(())
        },
        Command::Rules => print_rules(&system, &mut io::stdout().lock()),
        Command::Curves { step, out_dir } => curves(system.variables(), step, &out_dir),
    }
}

fn load_system(model: Option<&Path>, defuzz: DefuzzificationOp) -> Result<PrioritySystem> {
    let system = match model {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading model {}", path.display()))?;
            let variables = Variables::from_json(&json).with_context(|| format!("loading model {}", path.display()))?;

            PrioritySystem::from_variables(variables)?
        },
        None => PrioritySystem::standard()?,
    };

    Ok(system.with_engine(MamdaniInference::default().with_defuzzification(defuzz)))
}

fn print_rules(system: &PrioritySystem, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<10} {:<10} {:<10} {:<10} -> Output", "Rule ID", "Damage", "Access", "Pop")?;
    writeln!(out, "{}", "-".repeat(60))?;

    for (i, rule) in system.rules().iter().enumerate() {
        let labels = rule
            .labels(system.variables())
            .with_context(|| format!("rule R{} does not match the model", i + 1))?;
        let id = format!("R{}", i + 1);

        writeln!(
            out,
            "{id:<10} {:<10} {:<10} {:<10} -> {}",
            labels.damage, labels.accessibility, labels.population, labels.consequence
        )?;
    }

    Ok(())
}

fn simulate(system: &PrioritySystem, config: &ScenarioConfig, output: Option<PathBuf>, format: ExportFormat) -> Result<()> {
    {
        let mut stdout = io::stdout().lock();
        print_rules(system, &mut stdout)?;
        writeln!(stdout, "\n{} samples being generated", config.samples)?;
    }

    // Not holding the stdout lock here, log lines may come from worker threads
    let report = ScenarioBatch::run(system, config)?;
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "\n--- First 10 Samples From Generated Data Set ---")?;
    writeln!(
        stdout,
        "{:>11} {:>15} {:>13} {:>19} {:>14} {:>14}",
        "Scenario_ID", "Damage_Severity", "Accessibility", "Population_Exposure", "Priority_Score", "Priority_Level"
    )?;
    for r in report.records.iter().take(10) {
        writeln!(
            stdout,
            "{:>11} {:>15.1} {:>13.1} {:>19.1} {:>14.2} {:>14}",
            r.scenario_id, r.damage, r.accessibility, r.population, r.score, r.level
        )?;
    }

    if let Some(summary) = report.summary() {
        writeln!(stdout, "\n--- Statistical Summary ---")?;
        write!(stdout, "{summary}")?;
    }
    if report.fallbacks > 0 {
        writeln!(stdout, "\n{} scenario(s) scored 0 because no rule fired", report.fallbacks)?;
    }

    let path = output.unwrap_or_else(|| {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("simulation_results_{stamp}.{}", format.extension()))
    });
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    format.write_records(BufWriter::new(file), &report.records)?;
    writeln!(stdout, "\nResults written to '{}'", path.display())?;

    Ok(())
}

fn curves(variables: &Variables, step: f64, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    for var in variables.all() {
        let curve = var.curve(step)?;
        let path = out_dir.join(format!("{}_mf.csv", var.name()));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

        write_curve_csv(BufWriter::new(file), &curve)?;
        tracing::info!(
            path = %path.display(),
            universe = ?var.range(),
            model_step = var.step(),
            points = curve.points.len(),
            "wrote membership curve"
        );
    }

    Ok(())
}
