//! Dump command - print the text of the latest PDF page by page.

use clap::Args;
use console::style;

use pdfname_core::{FileSelector, PdfExtractor, PdfProcessor, PdfnameError};

use super::{Context, report_error};

/// Arguments for the dump command.
#[derive(Args)]
pub struct DumpArgs {
    /// Maximum number of pages to print (default or 0: all)
    #[arg(short, long)]
    pub pages: Option<u32>,
}

pub fn run(args: DumpArgs, ctx: &Context) -> anyhow::Result<()> {
    let selector = FileSelector::new(&ctx.config.selector.extension);

    let path = match selector.latest(&ctx.dir) {
        Ok(path) => path,
        Err(e) => {
            report_error(&PdfnameError::from(e));
            return Ok(());
        }
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("=== {} ===", style(&name).bold());

    let extractor = match PdfExtractor::open(&path) {
        Ok(extractor) => extractor,
        Err(e) => {
            report_error(&PdfnameError::from(e));
            return Ok(());
        }
    };

    let total = extractor.page_count();
    let limit = match args.pages {
        None | Some(0) => total,
        Some(pages) => pages.min(total),
    };
    println!("Total pages: {}", total);

    let pages = match extractor.pages(limit) {
        Ok(pages) => pages,
        Err(e) => {
            report_error(&PdfnameError::from(e));
            return Ok(());
        }
    };

    for page in &pages {
        if page.has_text() {
            println!("\n--- Page {} ---", page.number);
            println!("{}", page.text.trim());
            println!("{}", "-".repeat(50));
        } else {
            println!("\n--- Page {} {} ---", page.number, style("(no text)").yellow());
        }
    }

    if (pages.len() as u32) < total {
        println!("\n... (showing {} of {} pages)", pages.len(), total);
    }

    Ok(())
}
