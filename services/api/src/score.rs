use clap::Args;
use credit_scoring::config::AppConfig;
use credit_scoring::error::AppError;
use credit_scoring::{FactorBreakdown, ScoreRequest, ScoringEngine, ScoringResult};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file with the eight applicant fields (`-` reads stdin)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Print the per-factor point breakdown after the result
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = ScoringEngine::new(config.scoring);

    let raw = read_profile(&args.profile)?;
    let (result, breakdown) = score_document(&engine, &raw)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    if args.explain {
        render_breakdown(&breakdown);
    }

    Ok(())
}

fn read_profile(path: &Path) -> Result<String, AppError> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

pub(crate) fn score_document(
    engine: &ScoringEngine,
    raw: &str,
) -> Result<(ScoringResult, FactorBreakdown), AppError> {
    let request: ScoreRequest = serde_json::from_str(raw)?;
    let profile = request.validate()?;
    Ok((engine.score(&profile), engine.breakdown(&profile)))
}

fn render_breakdown(breakdown: &FactorBreakdown) {
    println!("\nFactor breakdown");
    println!("- base score: {:.1}", breakdown.base_score);
    for component in &breakdown.components {
        println!(
            "- {:?}: {:+} ({})",
            component.factor, component.points, component.notes
        );
    }
    println!("- raw total: {:.1}", breakdown.raw_score());
}
