//! Rename command - give the latest PDF a name derived from its contents.

use clap::Args;
use console::style;

use pdfname_core::{NamingMode, RenameError, RenameOutcome, Renamer};

use super::{Context, report_error, spinner};

/// Arguments for the rename command.
#[derive(Args, Default)]
pub struct RenameArgs {
    /// Naming scheme (default: from config)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Naming scheme selectable on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// First text line of the document
    FirstLine,
    /// {YYMMDD}_{company}_{registration number}.pdf
    Fields,
}

impl From<ModeArg> for NamingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FirstLine => NamingMode::FirstLine,
            ModeArg::Fields => NamingMode::Fields,
        }
    }
}

pub fn run(args: RenameArgs, ctx: &Context) -> anyhow::Result<()> {
    let mode = args.mode.map(NamingMode::from).unwrap_or(ctx.config.naming.mode);
    let renamer = Renamer::new(&ctx.dir, &ctx.config);

    println!(
        "{} Searching {}",
        style("ℹ").blue(),
        renamer.dir().display()
    );

    let pb = spinner("Reading latest PDF...")?;
    let result = renamer.run(mode);
    pb.finish_and_clear();

    match result {
        Ok(outcome) => report_outcome(&outcome),
        Err(e) => {
            report_error(&e);
            println!("\nThe file could not be renamed.");
        }
    }

    Ok(())
}

fn report_outcome(outcome: &RenameOutcome) {
    match outcome {
        RenameOutcome::Renamed { from, to } => {
            println!(
                "{} Renamed {} -> {}",
                style("✓").green(),
                file_name(from),
                style(file_name(to)).bold()
            );
        }
        RenameOutcome::AlreadyNamed(path) => {
            println!(
                "{} {} is already correctly named",
                style("ℹ").blue(),
                file_name(path)
            );
        }
        RenameOutcome::Skipped {
            path,
            suggested,
            reason,
        } => {
            println!("{} {}: {}", style("✗").red(), file_name(path), reason);
            if let RenameError::DestinationLocked(_) = reason {
                println!("  Close the file and try again.");
            }
            println!("  Suggested name: {}", style(suggested).bold());
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
