//! Command-line interface for tamefiles.
//!
//! Each subcommand maps its arguments onto one library call and prints the
//! result in the requested format.

use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "streaming")]
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;
#[cfg(feature = "streaming")]
use tamefiles::FileRecordStream;
use tamefiles::{
    DEFAULT_TOP_N, ScanBuilder, ScanOptions, Strategy, TamefilesError, directory_data_with,
    find_duplicates_with, minimal_cover_with, output, top_n_largest_with,
};

/// tamefiles — read-only disk usage and duplicate finder
#[derive(Parser)]
#[command(name = "tamefiles", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pretty output (indented JSON)
    #[arg(short, long, global = true)]
    pretty: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// List the largest files
    Largest {
        #[command(flatten)]
        scan: ScanArgs,
        /// Number of files to show
        #[arg(short, default_value_t = DEFAULT_TOP_N)]
        n: usize,
    },
    /// List the fewest largest files that together reach a byte target
    Free {
        #[command(flatten)]
        scan: ScanArgs,
        /// Bytes to free
        #[arg(long, allow_negative_numbers = true)]
        target: i64,
    },
    /// Group duplicate files
    Dupes {
        #[command(flatten)]
        scan: ScanArgs,
        /// How duplicates are identified
        #[arg(long = "by", default_value = "content", value_parser = parse_strategy)]
        strategy: Strategy,
    },
    /// Print the directory tree with sizes
    Tree {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Emit flat hierarchy records for treemap rendering
    Data {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Stream every file record as one JSON line (needs the `streaming` feature)
    List {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Root directory (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Ignore patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Skip hidden files and directories
    #[arg(long)]
    skip_hidden: bool,

    /// Honor .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => output::OutputFormat::Text,
            OutputFormat::Markdown => output::OutputFormat::Markdown,
            OutputFormat::Json => output::OutputFormat::Json,
        }
    }
}

/// Parse string into Strategy enum.
fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: TamefilesError| e.to_string())
}

impl ScanArgs {
    fn into_options(self) -> ScanOptions {
        let builder = ScanBuilder::new(self.root)
            .include_hidden(!self.skip_hidden)
            .respect_gitignore(self.gitignore)
            .follow_links(self.follow_links)
            .ignore_patterns(self.ignore_patterns);
        let builder = if let Some(depth) = self.max_depth {
            builder.max_depth(depth)
        } else {
            builder.no_limit_depth()
        };
        builder.build()
    }
}

fn main() {
    let cli = Cli::parse();
    let format = cli.format.into();
    let pretty = cli.pretty;

    let rendered = match cli.command {
        Command::Largest { scan, n } => top_n_largest_with(&scan.into_options(), n)
            .and_then(|files| output::format_files(&files, format, pretty)),
        Command::Free { scan, target } => minimal_cover_with(&scan.into_options(), target)
            .and_then(|files| output::format_files(&files, format, pretty)),
        Command::Dupes { scan, strategy } => find_duplicates_with(&scan.into_options(), strategy)
            .and_then(|groups| output::format_duplicates(&groups, format, pretty)),
        Command::Tree { scan } => directory_data_with(&scan.into_options()).and_then(|records| {
            output::format_directory_data(&records, output::OutputFormat::Text, pretty)
        }),
        Command::Data { scan } => directory_data_with(&scan.into_options())
            .and_then(|records| output::format_directory_data(&records, format, pretty)),
        Command::List { scan } => {
            run_streaming(&scan.into_options());
            return;
        }
    };

    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = output::write_to_file(&rendered, &path) {
                eprintln!("Error: {}", e);
                exit(1);
            }
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
}

#[cfg(feature = "streaming")]
fn run_streaming(options: &ScanOptions) {
    let stream = match FileRecordStream::new(options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for record in stream {
        let json = serde_json::to_string(&record).unwrap_or_else(|e| {
            eprintln!("JSON serialization error: {}", e);
            exit(1);
        });

        if writeln!(handle, "{}", json).is_err() {
            eprintln!("Failed to write to stdout");
            exit(1);
        }
    }
}

#[cfg(not(feature = "streaming"))]
fn run_streaming(_options: &ScanOptions) {
    eprintln!("Error: tamefiles was built without the `streaming` feature");
    exit(1);
}
