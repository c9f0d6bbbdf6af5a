use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sarx::compression::{Lz77, factorise, refs};
use sarx::index::suffix_array::{
    Direction, Forward, Layout, Reverse, SuffixArrayConfig, SuffixArrayReader, SuffixIndex,
};
use sarx::index::{DuplicateScanner, ScanConfig, SuffixArray};
use sarx::output;
use sarx::search::{Coordinates, super_maximal_repeats_left, super_maximal_repeats_right};
use sarx::utils::{RollingHash, Spinner};
use sarx::SarxConfig;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "sarx")]
#[command(about = "Suffix arrays, duplicate substrings and repeat search over byte sequences")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Fold ASCII case in texts and patterns
    #[arg(short = 'i', long, global = true)]
    ignore_case: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a suffix array and save it to a directory
    Build {
        /// File to index
        file: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Build a reverse suffix array (keys count from the end)
        #[arg(short, long)]
        reverse: bool,
    },
    /// Find occurrences of a pattern
    Search {
        /// Pattern to look for
        pattern: String,

        /// File to search (indexed in memory)
        #[arg(required_unless_present = "index", conflicts_with = "index")]
        file: Option<PathBuf>,

        /// Directory written by `build`
        #[arg(long)]
        index: Option<PathBuf>,

        /// Report every occurrence instead of one
        #[arg(short, long)]
        all: bool,

        /// Bytes of context shown around each match
        #[arg(short = 'C', long, default_value_t = 16)]
        context: usize,
    },
    /// Print the sorted suffixes, one per row
    Dump {
        file: PathBuf,

        #[arg(short, long)]
        reverse: bool,
    },
    /// List duplicated substrings
    Duplicates {
        file: PathBuf,

        /// Shortest substring to report
        #[arg(short, long)]
        min_length: Option<usize>,

        /// Also save the occurrences as JSON
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Print the longest duplicate starting at each position instead
        #[arg(long)]
        series: bool,
    },
    /// Find super-maximal repeats
    Repeats {
        file: PathBuf,

        /// Scan from the left end to the right
        #[arg(long)]
        right: bool,

        /// Byte no repeat may contain
        #[arg(long, value_parser = parse_byte)]
        ignore: Option<u8>,

        /// Report positions as distances from the last byte
        #[arg(long, conflicts_with = "right")]
        from_end: bool,
    },
    /// LZ-factorise a file
    Factorise {
        file: PathBuf,

        /// Print only the (source, length) references
        #[arg(long)]
        refs_only: bool,

        /// Use windowed LZ77 with this window instead
        #[arg(long)]
        window: Option<usize>,
    },
    /// Rolling hash of every window of a file
    Hash {
        file: PathBuf,

        #[arg(short, long)]
        block_size: Option<usize>,

        #[arg(short, long)]
        range: Option<u64>,
    },
    /// Show statistics of a saved suffix array
    Stats {
        /// Directory written by `build`
        dir: PathBuf,
    },
}

fn parse_byte(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [byte] => Ok(*byte),
        _ => s
            .strip_prefix("0x")
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or_else(|| format!("expected one byte or 0xNN, got {:?}", s)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if data.is_empty() {
        bail!("{} is empty", path.display());
    }
    Ok(data)
}

fn build_index<L: Layout>(data: &[u8], config: &SuffixArrayConfig) -> Result<SuffixIndex<L>> {
    let start = Instant::now();
    let spinner = Spinner::start("Building suffix array...", data.len(), true);
    let index = SuffixIndex::<L>::with_config(data, config.clone())?;
    spinner.finish();
    info!(len = data.len(), elapsed = ?start.elapsed(), "built suffix array");
    Ok(index)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = SarxConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if cli.ignore_case {
        config.suffix_array.case_insensitive = true;
    }
    let color = !cli.no_color;

    match cli.command {
        Commands::Build { file, output, reverse } => {
            let data = read_input(&file)?;
            let saved = if reverse {
                build_index::<Reverse>(&data, &config.suffix_array)?.save(&output)
            } else {
                build_index::<Forward>(&data, &config.suffix_array)?.save(&output)
            };
            saved.with_context(|| format!("Failed to write suffix array to {}", output.display()))?;
            println!("Indexed {} bytes into {}", data.len(), output.display());
        }
        Commands::Search {
            pattern,
            file,
            index,
            all,
            context,
        } => {
            let pattern = pattern.as_bytes();
            let mut out = output::stdout(color);
            if let Some(dir) = index {
                let reader = SuffixArrayReader::open(&dir)?
                    .with_context(|| format!("No suffix array in {}", dir.display()))?;
                let mut positions = reader.search_positions(pattern);
                positions.sort_unstable();
                if !all {
                    positions.truncate(1);
                }
                output::print_search_hits(
                    &mut out,
                    reader.text(),
                    &positions,
                    pattern.len(),
                    context,
                )?;
            } else if let Some(file) = file {
                let data = read_input(&file)?;
                let sa: SuffixArray = build_index(&data, &config.suffix_array)?;
                let positions = if all {
                    let mut positions = sa.search_all(pattern);
                    positions.sort_unstable();
                    positions
                } else {
                    sa.search(pattern).into_iter().collect()
                };
                output::print_search_hits(
                    &mut out,
                    sa.text(),
                    &positions,
                    pattern.len(),
                    context,
                )?;
            }
        }
        Commands::Dump { file, reverse } => {
            let data = read_input(&file)?;
            let dump = if reverse {
                build_index::<Reverse>(&data, &config.suffix_array)?.dump()
            } else {
                build_index::<Forward>(&data, &config.suffix_array)?.dump()
            };
            io::stdout().write_all(dump.as_bytes())?;
        }
        Commands::Duplicates {
            file,
            min_length,
            store,
            series,
        } => {
            let data = read_input(&file)?;
            let sa: SuffixArray = build_index(&data, &config.suffix_array)?;
            let scan = ScanConfig {
                min_length: min_length.unwrap_or(config.scan.min_length),
            };

            let spinner = Spinner::start("Scanning for duplicates...", data.len(), true);
            let duplicates = DuplicateScanner::with_config(&sa, scan).scan();
            spinner.finish();
            info!(occurrences = duplicates.len(), "scanned for duplicates");

            if let Some(path) = store {
                duplicates
                    .save(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }

            let mut out = output::stdout(color);
            if series {
                output::print_length_series(&mut out, &duplicates.length_series(data.len()))?;
            } else {
                output::print_duplicates(&mut out, &duplicates)?;
            }
        }
        Commands::Repeats {
            file,
            right,
            ignore,
            from_end,
        } => {
            let data = read_input(&file)?;
            let mut options = config.repeats;
            if ignore.is_some() {
                options.ignore = ignore;
            }
            if from_end {
                options.coordinates = Coordinates::FromEnd;
            }

            let repeats = if right {
                super_maximal_repeats_right(&data, None, options.ignore)?
            } else {
                super_maximal_repeats_left(&data, None, options)?
            };

            // Repeated bytes can only be shown for start-relative positions
            let shown: &[u8] = if right || options.coordinates == Coordinates::FromStart {
                &data
            } else {
                &[]
            };
            output::print_repeats(&mut output::stdout(color), shown, &repeats)?;
        }
        Commands::Factorise {
            file,
            refs_only,
            window,
        } => {
            let data = read_input(&file)?;
            let mut out = output::stdout(color);
            if let Some(window) = window {
                let mut encoder = Lz77::new();
                for triple in encoder.encode(&data, window)? {
                    writeln!(
                        out,
                        "({}, {}) {}",
                        triple.distance,
                        triple.length,
                        [triple.next].escape_ascii()
                    )?;
                }
            } else if refs_only {
                for (source, len) in refs(&data)? {
                    writeln!(out, "({}, {})", source, len)?;
                }
            } else {
                output::print_factors(&mut out, &factorise(&data)?)?;
            }
        }
        Commands::Hash {
            file,
            block_size,
            range,
        } => {
            let data = read_input(&file)?;
            let mut hash_config = config.hash;
            if let Some(block_size) = block_size {
                hash_config.block_size = block_size;
            }
            if let Some(range) = range {
                hash_config.hash_range = range;
            }

            let mut hasher = RollingHash::new(hash_config)?;
            let mut out = io::BufWriter::new(io::stdout().lock());
            for (position, hash) in hasher.windows(&data)?.into_iter().enumerate() {
                writeln!(out, "{} {}", position, hash)?;
            }
            out.flush()?;
        }
        Commands::Stats { dir } => {
            let reader = SuffixArrayReader::open(&dir)?
                .with_context(|| format!("No suffix array in {}", dir.display()))?;
            let stats = reader.stats();
            let direction = match stats.direction {
                Direction::Forward => "forward",
                Direction::Reverse => "reverse",
            };

            println!("Suffix array: {}", dir.display());
            println!("  Direction: {}", direction);
            println!("  Text size: {} bytes", stats.text_size);
            println!("  Suffixes: {}", stats.suffix_count);
            println!("  Longest repeat: {} bytes", stats.max_lcp);
            println!(
                "  Case insensitive: {}",
                reader.meta().config.case_insensitive
            );
        }
    }

    Ok(())
}
