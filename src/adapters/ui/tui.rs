//! Terminal presentation. Inquire prompt for the term, colored rendering of the answer.
//!
//! Failures are always rendered with a distinct marker and color, never as blank output.

use crate::domain::{EnrichmentSource, LookupError, SearchAnswer};
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use inquire::Text;
use std::io::{Write, stdout};

/// Ask for a search term. `None` when the user cancels the prompt.
pub fn prompt_term() -> Option<String> {
    Text::new("What do you want to look up?")
        .with_placeholder("e.g. Inteligência Artificial, Maradona, Python")
        .prompt()
        .ok()
}

/// Plain-text rendering of a successful answer.
pub fn format_answer(answer: &SearchAnswer) -> String {
    let mut out = String::new();
    let heading = match answer.enriched.source {
        EnrichmentSource::Model => "Smart summary",
        EnrichmentSource::RawFallback => "Wikipedia information",
    };
    out.push_str(&format!(
        "{} ({}, {})\n\n",
        heading, answer.article.title, answer.article.resolution_method
    ));
    out.push_str(&answer.enriched.text);
    out.push('\n');
    if answer.enriched.is_model() {
        out.push_str(&format!("\nWikipedia text\n\n{}\n", answer.article.summary));
    }
    if let Some(note) = &answer.enriched.note {
        out.push_str(&format!("\nNote: AI summary unavailable: {}\n", note));
    }
    out
}

/// Plain-text rendering of a failed lookup.
pub fn format_error(err: &LookupError) -> String {
    match err {
        LookupError::NotResolved(f) if f.is_missing_term() => {
            "Please type a term to search for.".to_string()
        }
        LookupError::NotResolved(f) => format!("Nothing found for '{}': {}", f.term, f.reason),
        LookupError::Transport(t) => format!("Lookup server problem: {}", t),
    }
}

pub fn print_answer(answer: &SearchAnswer) {
    print_colored("[OK] ", Color::Green, &format_answer(answer));
}

pub fn print_error(err: &LookupError) {
    print_colored("[ERROR] ", Color::Red, &format_error(err));
}

fn print_colored(marker: &str, color: Color, body: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(marker));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(body));
    let _ = out.execute(Print("\n"));
    let _ = out.flush();
}
