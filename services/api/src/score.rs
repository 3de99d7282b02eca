use clap::Args;
use crs_portal::error::AppError;
use crs_portal::immigration::CrsResult;
use crs_portal::scoring::{explain, ApplicantProfile, FactorGroup, ScoreReport, MAX_SCORE};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file using the CRS form field names (camelCase)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Print the API response body instead of the factor table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.profile)?;
    let profile: ApplicantProfile = serde_json::from_str(&raw)?;
    let report = explain(&profile);

    if args.json {
        let body = CrsResult {
            score: report.breakdown.total,
            breakdown: report.breakdown,
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

pub(crate) fn render_report(report: &ScoreReport) -> String {
    let breakdown = &report.breakdown;
    let mut out = String::new();

    let sections = [
        (FactorGroup::Core, "Core human capital", breakdown.core_factors),
        (FactorGroup::Spouse, "Spouse / partner", breakdown.spouse_factors),
        (FactorGroup::Additional, "Additional points", breakdown.additional_points),
    ];

    for (group, title, subtotal) in sections {
        let _ = writeln!(out, "{title}: {subtotal} points");
        let mut listed = false;
        for component in report
            .components
            .iter()
            .filter(|component| component.factor.group() == group)
        {
            listed = true;
            let _ = writeln!(
                out,
                "- {}: {} ({})",
                component.factor.label(),
                component.points,
                component.notes
            );
        }
        if !listed {
            let _ = writeln!(out, "- none");
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "Total CRS score: {} / {} ({})",
        breakdown.total,
        MAX_SCORE,
        breakdown.category().label()
    );
    out
}
