use std::error::Error;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dicecount::report::DiceReport;
use dicecount::{FaceValueSet, kmp, sqrt, triplets};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Die roll combination counter", long_about = None)]
#[command(after_help = concat!(
    "Example:\n",
    "  ./dicecount dice 10 --faces 1,2,3,4,5,6 --naive --table\n",
    "  ./dicecount sqrt 2\n",
    "  ./dicecount triplets 0\n",
    "  ./dicecount kmp aabaaab"
))]
struct Args {
    /// Log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Count the ways a die can be rolled to sum to a target
    Dice {
        /// Target sum
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        target: u64,

        /// Comma separated face values
        #[arg(
            short = 'f',
            long = "faces",
            default_value = "1,2,3,4,5,6",
            allow_hyphen_values = true
        )]
        faces: FaceValueSet,

        /// Also run the naive recursion (small targets only)
        #[arg(long)]
        naive: bool,

        /// Print the counts for every sum up to the target
        #[arg(long)]
        table: bool,

        /// Output file, stdout when missing
        #[arg(short = 'o', long = "out")]
        output_file: Option<String>,
    },

    /// Estimate a square root by bisection
    Sqrt {
        /// Number to take the root of
        #[arg(allow_negative_numbers = true)]
        number: f64,

        /// Width of the final bracket
        #[arg(short = 'a', long, default_value_t = sqrt::DEFAULT_ACCURACY)]
        accuracy: f64,
    },

    /// Look for three values in the sample arrays that sum to a target
    Triplets {
        /// Target sum
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        target: i64,
    },

    /// Print the KMP longest prefix-suffix table of a pattern
    Kmp {
        /// Pattern to preprocess
        #[arg(allow_hyphen_values = true)]
        pattern: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // Command line parsing
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Dice {
            target,
            faces,
            naive,
            table,
            output_file,
        } => run_dice(usize::try_from(target)?, &faces, naive, table, output_file)?,
        Command::Sqrt { number, accuracy } => run_sqrt(number, accuracy)?,
        Command::Triplets { target } => run_triplets(target),
        Command::Kmp { pattern } => print!("{}", kmp::format_lps(&pattern, &kmp::lps(&pattern))),
    }

    // Success return
    Ok(())
}

/// Logs go to stderr so they never mix with the report.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_dice(
    target: usize,
    faces: &FaceValueSet,
    naive: bool,
    table: bool,
    output_file: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let report = DiceReport::compute(faces, target, naive, table)?;

    match output_file {
        Some(path) => {
            report.write_file(&path)?;
            info!(path = %path, "report written");
            println!("Output written to {}.", path);
        }
        None => report.write_to(&mut std::io::stdout().lock())?,
    }

    // Counts that did fit are already printed; the failed ones still fail the command
    match report.failures() {
        0 => Ok(()),
        n => Err(format!("{} of the counters failed for target {}", n, target).into()),
    }
}

fn run_sqrt(number: f64, accuracy: f64) -> Result<(), Box<dyn Error>> {
    if !(accuracy > sqrt::FLOAT_EQUALS_DIFF) {
        return Err(format!(
            "Accuracy must be larger than {}, got {}",
            sqrt::FLOAT_EQUALS_DIFF,
            accuracy
        )
        .into());
    }

    println!(
        "Estimating square root of {} with minimum accuracy of {}",
        number, accuracy
    );
    match sqrt::estimate(number, accuracy) {
        Some(root) => println!("Calculated estimated square root:\n  {}", root),
        None => println!("Cannot calculate the square root of a negative number."),
    }
    Ok(())
}

fn run_triplets(target: i64) {
    for array in triplets::SAMPLE_ARRAYS {
        println!("Checking array for triplet summing to {}", target);
        println!("{:?}\n", array);
        println!(
            "{:<40}{}",
            "Hash-based search returned:",
            triplets::contains_triplet_hashed(array, target)
        );
        println!(
            "{:<40}{}",
            "Sort-based search returned:",
            triplets::contains_triplet_sorted(array, target)
        );
        println!();
    }
}
