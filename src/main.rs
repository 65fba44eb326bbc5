use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use phrasechk::cli::output::{self, OutputFormat};
use phrasechk::{pairs, Config, PhraseEngine};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phrasechk")]
#[command(version, about = "Compare a submitted phrase against a reference", long_about = None)]
struct Cli {
    /// The submitted (possibly flawed) phrase
    #[arg(value_name = "SUBMISSION")]
    submission: Option<String>,

    /// The reference phrase to compare against
    #[arg(value_name = "REFERENCE")]
    reference: Option<String>,

    /// Print the inline-styled markup rendition instead of terminal output
    #[arg(long)]
    markup: bool,

    /// Also print the legacy character-position accuracy metric
    #[arg(long)]
    accuracy: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if the phrase draws votes
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Run every flawed variant in a phrase-pair data file
    Pairs {
        /// JSON or TOML file of {reference, flawed} entries
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "phrasechk", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let engine = PhraseEngine::new(config.clone());

    if let Some(Commands::Pairs { file }) = cli.command {
        return run_pairs(&engine, &file, !cli.no_color);
    }

    let (submission, reference) = match (&cli.submission, &cli.reference) {
        (Some(s), Some(r)) => (s.as_str(), r.as_str()),
        _ => anyhow::bail!("Expected a submission and a reference phrase. See --help."),
    };

    let analysis = engine.analyze(submission, reference);

    if cli.markup {
        println!("{}", phrasechk::engine::render::to_markup(&analysis));
    } else {
        output::print_analysis(
            submission,
            reference,
            &analysis,
            &config,
            !cli.no_color,
            &cli.format,
        );
        if matches!(cli.format, OutputFormat::Text) {
            output::print_vote_summary(analysis.total_votes, !cli.no_color);
        }
    }

    if cli.accuracy {
        println!("accuracy: {}", engine.accuracy(submission, reference));
    }

    if analysis.total_votes > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn run_pairs(engine: &PhraseEngine, file: &PathBuf, colored: bool) -> Result<()> {
    let pairs = pairs::load_pairs(file)?;
    let mut flagged = 0;

    for (index, pair) in pairs.iter().enumerate() {
        let analysis = engine.analyze(&pair.flawed, &pair.reference);
        if !analysis.is_perfect() {
            flagged += 1;
        }
        output::print_pair_line(index, &pair.flawed, analysis.total_votes, colored);
    }

    output::print_pairs_summary(pairs.len(), flagged, colored);
    Ok(())
}
