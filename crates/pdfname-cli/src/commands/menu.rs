//! Interactive menu shown when no subcommand is given.

use std::io::{self, BufRead};

use console::{Term, style};

use super::inspect::{self, InspectArgs};
use super::rename::{self, RenameArgs};
use super::Context;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let term = Term::stdout();

    term.write_line(&format!("{}", style("=== PDF auto rename ===").bold()))?;
    term.write_line(
        "Extracts the company name and registration number from the latest PDF \
         and renames it to yymmdd_company_registration.pdf.",
    )?;
    term.write_line("")?;
    term.write_line("1. Rename the latest PDF")?;
    term.write_line("2. Run the extraction test only")?;
    term.write_str("Select (1 or 2): ")?;

    // Term::read_line yields nothing when stdin is not a terminal.
    let mut choice = String::new();
    io::stdin().lock().read_line(&mut choice)?;

    if choice.trim() == "1" {
        rename::run(RenameArgs::default(), ctx)
    } else {
        inspect::run(InspectArgs::default(), ctx)
    }
}
