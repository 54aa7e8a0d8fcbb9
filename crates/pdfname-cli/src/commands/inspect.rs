//! Inspect command - dry run of the extraction on the latest PDF.

use clap::Args;
use console::style;
use serde::Serialize;

use pdfname_core::{FieldMatch, FileSelector, NamingMode, RenamePlan, Renamer};

use super::rename::ModeArg;
use super::{Context, report_error, spinner};

/// Arguments for the inspect command.
#[derive(Args, Default)]
pub struct InspectArgs {
    /// Naming scheme used for the proposed name (default: from config)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also print the extracted text, line by line
    #[arg(long)]
    pub lines: bool,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    #[default]
    Text,
    /// JSON output
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    plan: &'a RenamePlan,
    /// Matching files in the directory.
    candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<&'a [String]>,
}

pub fn run(args: InspectArgs, ctx: &Context) -> anyhow::Result<()> {
    let mode = args.mode.map(NamingMode::from).unwrap_or(ctx.config.naming.mode);
    let renamer = Renamer::new(&ctx.dir, &ctx.config);

    let pb = spinner("Reading latest PDF...")?;
    let result = renamer.plan(mode);
    pb.finish_and_clear();

    let plan = match result {
        Ok(plan) => plan,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };

    let candidates = FileSelector::new(&ctx.config.selector.extension)
        .candidates(renamer.dir())
        .map(|c| c.len())
        .unwrap_or(1);

    match args.format {
        OutputFormat::Json => {
            let report = Report {
                plan: &plan,
                candidates,
                lines: args.lines.then(|| plan.text.lines()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_text(&plan, candidates, args.lines),
    }

    Ok(())
}

fn print_text(plan: &RenamePlan, candidates: usize, show_lines: bool) {
    println!(
        "{} File: {} (newest of {})",
        style("ℹ").blue(),
        plan.source.display(),
        candidates
    );

    if show_lines {
        println!();
        for (i, line) in plan.text.lines().iter().enumerate() {
            if !line.is_empty() {
                println!("{:2}: {}", i + 1, line);
            }
        }
        println!("{}", "=".repeat(50));
    }

    println!();
    print_field("Company name", plan.fields.company_name.as_ref());
    print_field("Registration number", plan.fields.registration_number.as_ref());

    println!();
    match &plan.proposed {
        Ok(name) => println!("{} Proposed name: {}", style("✓").green(), style(name).bold()),
        Err(e) => println!("{} No name can be composed: {}", style("✗").red(), e),
    }
}

fn print_field(label: &str, field: Option<&FieldMatch>) {
    match field {
        Some(m) => {
            let line = m
                .line
                .map(|l| format!(", line {}", l + 1))
                .unwrap_or_default();
            println!(
                "  {}: {} {}",
                label,
                style(&m.value).bold(),
                style(format!("({} tier, pattern {}{})", m.tier, m.pattern + 1, line)).dim()
            );
        }
        None => println!("  {}: {}", label, style("not found").yellow()),
    }
}
