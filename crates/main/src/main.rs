use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use tailwind_guide::tutorial::{self, DEFAULT_OUTPUT_FILE};
use tailwind_guide::{DocumentBuilder, PaperSize};

/// Renders the TailwindCSS setup guide to PDF.
///
/// A body font family must be available: either the Roboto files under `assets/fonts` of the
/// `tailwind_guide` crate (or the directory named by `TAILWIND_GUIDE_FONTS_DIR`), or one of the
/// common system families such as Liberation Sans or DejaVu Sans.
#[derive(Parser)]
#[command(author, version, about = "Renders the TailwindCSS setup guide to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the guide to a PDF file (the default command).
    Render {
        /// Destination file; an existing file is replaced.
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Paper size of the generated pages.
        #[arg(long, value_enum, default_value_t = Paper::A4)]
        paper: Paper,

        /// Add an outline entry for every section heading.
        #[arg(long)]
        bookmarks: bool,
    },

    /// Print the content blocks in layout order without rendering.
    #[command(aliases = ["ls", "blocks"])]
    Outline,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Paper {
    A4,
    Letter,
    Legal,
}

impl From<Paper> for PaperSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PaperSize::A4,
            Paper::Letter => PaperSize::Letter,
            Paper::Legal => PaperSize::Legal,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Render {
        output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        paper: Paper::A4,
        bookmarks: false,
    });

    let result = match command {
        Commands::Render {
            output,
            paper,
            bookmarks,
        } => render(output, paper, bookmarks),
        Commands::Outline => outline(),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn render(output: PathBuf, paper: Paper, bookmarks: bool) -> Result<(), Box<dyn Error>> {
    let mut guide = tutorial::tailwind_setup_guide()?.with_paper_size(PaperSize::from(paper));
    if bookmarks {
        guide = enable_bookmarks(guide)?;
    }

    debug!("Rendering {} blocks", guide.content().len());
    let summary = guide.render(&output)?;
    println!(
        "Generated {} ({} bytes, {} pages)",
        summary.path.display(),
        summary.bytes,
        summary.page_count
    );
    Ok(())
}

#[cfg(feature = "bookmarks")]
fn enable_bookmarks(guide: DocumentBuilder) -> Result<DocumentBuilder, Box<dyn Error>> {
    Ok(guide.with_bookmarks(true))
}

#[cfg(not(feature = "bookmarks"))]
fn enable_bookmarks(_guide: DocumentBuilder) -> Result<DocumentBuilder, Box<dyn Error>> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Enable the `bookmarks` feature to add bookmarks:\n    cargo run --features bookmarks -- render --bookmarks",
    )
    .into())
}

fn outline() -> Result<(), Box<dyn Error>> {
    let guide = tutorial::tailwind_setup_guide()?;
    println!("{}", guide.title());
    for (index, block) in guide.content().blocks().iter().enumerate() {
        println!("{:>3}  {}", index + 1, block);
    }
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
