use crate::{Analysis, Config, ErrorKind};
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    submission: &'a str,
    reference: &'a str,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

pub fn print_analysis(
    submission: &str,
    reference: &str,
    analysis: &Analysis,
    config: &Config,
    colored_output: bool,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => print_text_analysis(analysis, config, colored_output),
        OutputFormat::Json => print_json_analysis(submission, reference, analysis),
    }
}

fn print_text_analysis(analysis: &Analysis, config: &Config, colored_output: bool) {
    println!("{}", format_segments(analysis, colored_output));

    for error in &analysis.errors {
        let line = match error.kind {
            ErrorKind::Position => format!(
                "  {}: \"{}\" is out of place ({})",
                error.kind,
                error.submitted,
                vote_word(error.votes)
            ),
            _ => format!(
                "  {}: \"{}\" should be \"{}\" ({})",
                error.kind,
                error.submitted,
                error.correct,
                vote_word(error.votes)
            ),
        };
        if colored_output {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }

    for word in &analysis.missing_words {
        let line = format!(
            "  missing: \"{}\" ({})",
            word,
            vote_word(config.votes.missing)
        );
        if colored_output {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }

    for word in &analysis.extra_words {
        let line = format!("  extra: \"{}\" ({})", word, vote_word(config.votes.extra));
        if colored_output {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

fn print_json_analysis(submission: &str, reference: &str, analysis: &Analysis) {
    let output = JsonOutput {
        submission,
        reference,
        analysis,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

/// One-line terminal rendition of the diff, in submitted word order.
pub fn format_segments(analysis: &Analysis, colored_output: bool) -> String {
    let pieces: Vec<String> = analysis
        .display_segments
        .iter()
        .map(|segment| {
            if !colored_output {
                return match (&segment.kind, &segment.correction) {
                    (ErrorKind::Correct, _) => segment.text.clone(),
                    (ErrorKind::Punctuation, Some(correction)) => {
                        format!("{}[{}]", segment.text, correction)
                    }
                    (ErrorKind::Missing, _) => format!("[{}]", segment.text),
                    (ErrorKind::Extra, _) | (ErrorKind::Position, _) => {
                        format!("~{}~", segment.text)
                    }
                    (_, Some(correction)) => format!("~{}~ [{}]", segment.text, correction),
                    (_, None) => format!("~{}~", segment.text),
                };
            }

            match (&segment.kind, &segment.correction) {
                (ErrorKind::Correct, _) => segment.text.normal().to_string(),
                (ErrorKind::Missing, _) => segment.text.green().underline().to_string(),
                (ErrorKind::Extra, _) => segment.text.red().strikethrough().to_string(),
                (ErrorKind::Position, _) => segment.text.yellow().strikethrough().to_string(),
                (ErrorKind::Punctuation, Some(correction)) => format!(
                    "{}{}",
                    segment.text.yellow(),
                    format!("[{}]", correction).green()
                ),
                (_, Some(correction)) => format!(
                    "{} {}",
                    segment.text.red().strikethrough(),
                    correction.green().underline()
                ),
                (_, None) => segment.text.red().strikethrough().to_string(),
            }
        })
        .collect();

    pieces.join(" ")
}

pub fn print_vote_summary(total_votes: u32, colored_output: bool) {
    println!();
    if total_votes == 0 {
        if colored_output {
            println!("{}", "✓ No errors found!".green().bold());
        } else {
            println!("✓ No errors found!");
        }
    } else if colored_output {
        println!(
            "{} {} against this phrase",
            "✗".red().bold(),
            vote_word(total_votes).red().bold()
        );
    } else {
        println!("✗ {} against this phrase", vote_word(total_votes));
    }
}

pub fn print_pair_line(index: usize, flawed: &str, total_votes: u32, colored_output: bool) {
    let marker = if total_votes == 0 { "✓" } else { "✗" };
    if colored_output {
        let marker = if total_votes == 0 {
            marker.green().bold()
        } else {
            marker.red().bold()
        };
        println!(
            "  {} {} {} {}",
            format!("#{}", index + 1).blue().bold(),
            marker,
            flawed,
            format!("({})", vote_word(total_votes)).dimmed()
        );
    } else {
        println!(
            "  #{} {} {} ({})",
            index + 1,
            marker,
            flawed,
            vote_word(total_votes)
        );
    }
}

pub fn print_pairs_summary(pair_count: usize, flagged: usize, colored_output: bool) {
    println!();
    let pair_word = if pair_count == 1 { "pair" } else { "pairs" };
    if colored_output {
        println!(
            "{} {} of {} {} drew votes",
            "Σ".bold(),
            flagged.to_string().bold(),
            pair_count,
            pair_word
        );
    } else {
        println!("Σ {} of {} {} drew votes", flagged, pair_count, pair_word);
    }
}

fn vote_word(votes: u32) -> String {
    if votes == 1 {
        "1 vote".to_string()
    } else {
        format!("{} votes", votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhraseEngine;

    #[test]
    fn test_output_format_parsing() {
        assert!(matches!("text".parse(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse(), Ok(OutputFormat::Json)));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_plain_segments_mark_errors() {
        let analysis = PhraseEngine::default().analyze("Je suis là aussi", "Je suis là");
        let line = format_segments(&analysis, false);
        assert_eq!(line, "Je suis là ~aussi~");
    }

    #[test]
    fn test_plain_segments_show_corrections() {
        let analysis = PhraseEngine::default().analyze("Il est beau", "Il fait beau");
        let line = format_segments(&analysis, false);
        assert_eq!(line, "Il ~est~ [fait] beau");
    }

    #[test]
    fn test_plain_segments_missing_brackets() {
        let analysis = PhraseEngine::default().analyze("Je suis", "Je suis très heureux");
        let line = format_segments(&analysis, false);
        assert_eq!(line, "Je suis [très heureux]");
    }
}
