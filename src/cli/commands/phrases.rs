//! `phrases` command handler
//!
//! Prints the phrase catalog in human or JSON format.

use std::io::Write;

use crate::cli::args::{OutputFormat, PhrasesArgs};
use crate::error::TypeRushError;
use crate::game::PhraseSource;

/// Print the catalog that `play` would use with the same `--catalog`.
///
/// # Errors
///
/// Returns a catalog error if the file is missing or malformed, or if the
/// catalog is empty or holds a blank entry.
pub fn run(args: &PhrasesArgs) -> Result<(), TypeRushError> {
    let source = PhraseSource::load(args.catalog.as_deref(), None)?;
    let mut out = std::io::stdout().lock();
    write_catalog(&mut out, source.phrases(), args.format)
}

fn write_catalog(
    out: &mut impl Write,
    phrases: &[String],
    format: OutputFormat,
) -> Result<(), TypeRushError> {
    match format {
        OutputFormat::Human => {
            let width = phrases.len().to_string().len();
            for (i, phrase) in phrases.iter().enumerate() {
                writeln!(out, "{:>width$}  {phrase}", i + 1)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, phrases)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(phrases: &[&str], format: OutputFormat) -> String {
        let phrases: Vec<String> = phrases.iter().map(|&s| s.to_string()).collect();
        let mut buf = Vec::new();
        write_catalog(&mut buf, &phrases, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_human_listing_is_numbered() {
        let out = render(&["Bazinga!", "I'll be back"], OutputFormat::Human);
        assert_eq!(out, "1  Bazinga!\n2  I'll be back\n");
    }

    #[test]
    fn test_human_listing_aligns_numbers() {
        let phrases: Vec<&str> = std::iter::repeat_n("x", 10).collect();
        let out = render(&phrases, OutputFormat::Human);
        assert!(out.starts_with(" 1  x\n"));
        assert!(out.ends_with("10  x\n"));
    }

    #[test]
    fn test_json_listing_round_trips() {
        let out = render(&["¡Hadouken!", "Fus Ro Dah!"], OutputFormat::Json);
        let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, vec!["¡Hadouken!", "Fus Ro Dah!"]);
    }
}
