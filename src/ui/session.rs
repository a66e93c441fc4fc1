//! Interactive terminal session
//!
//! Collects a customer query, shows the detected language, translation and
//! suggested reply, and records an optional accuracy rating.

use crate::pipeline::options::{BackendMode, ProcessOptions};
use crate::pipeline::{QueryOutcome, QueryProcessor};
use crate::storage::{EvaluationEntry, EvaluationStore};
use anyhow::Result;
use std::io::{self, BufRead, Write};

const QUIT_COMMAND: &str = "/quit";

pub struct Session<'a> {
    processor: &'a QueryProcessor,
    store: &'a EvaluationStore,
    options: ProcessOptions,
}

impl<'a> Session<'a> {
    pub fn new(
        processor: &'a QueryProcessor,
        store: &'a EvaluationStore,
        options: ProcessOptions,
    ) -> Self {
        Self {
            processor,
            store,
            options,
        }
    }

    /// Print the session settings
    pub fn print_banner<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "🌐 Real-Time Multilingual Query Handler")?;
        writeln!(
            output,
            "Translate incoming customer queries into {} and optionally generate suggested replies.",
            self.options.target_language
        )?;
        writeln!(output)?;
        match (self.options.backend, self.processor.backend_url()) {
            (BackendMode::Remote, Some(url)) => writeln!(output, "   Backend: remote ({})", url)?,
            (BackendMode::Remote, None) => writeln!(output, "   Backend: remote (not configured)")?,
            (BackendMode::Local, _) => writeln!(output, "   Backend: local")?,
        }
        writeln!(
            output,
            "   Translation backend: {:?}",
            self.options.translation_backend
        )?;
        writeln!(output, "   Response mode: {:?}", self.options.response_mode)?;
        writeln!(
            output,
            "   AI response temperature: {:.2}",
            self.options.temperature
        )?;
        if self.processor.has_openai() {
            writeln!(output, "✅ OpenAI key configured")?;
        } else {
            writeln!(output, "ℹ️  No OpenAI key found; OpenAI features disabled")?;
        }
        writeln!(output, "Type {} at the name prompt to exit.", QUIT_COMMAND)?;
        Ok(())
    }

    /// Run the prompt loop until end of input or the quit command
    pub async fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        self.print_banner(output)?;

        loop {
            write!(output, "\nCustomer name (optional): ")?;
            output.flush()?;
            let Some(name) = read_line(input)? else {
                break;
            };
            if name.trim() == QUIT_COMMAND {
                break;
            }

            writeln!(
                output,
                "Paste the customer's message (finish with an empty line):"
            )?;
            let message = read_block(input)?;

            let outcome = match self.processor.process(&message, &name, &self.options).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    writeln!(output, "⚠️  {}", e)?;
                    continue;
                }
            };

            self.render(&outcome, output)?;
            self.evaluate(&message, &outcome, input, output)?;
        }

        writeln!(output, "\nGoodbye.")?;
        Ok(())
    }

    fn render<W: Write>(&self, outcome: &QueryOutcome, output: &mut W) -> io::Result<()> {
        writeln!(output, "\n### Processing")?;
        writeln!(output, "Detected language code: {}", outcome.detected_language)?;

        if let Some(error) = &outcome.translate_error {
            writeln!(output, "❌ {}", error)?;
        }

        if outcome.translated.is_empty() {
            writeln!(output, "⚠️  No translation was produced.")?;
            return Ok(());
        }

        writeln!(output, "\n### Translated to {}", self.options.target_language)?;
        writeln!(output, "{}", outcome.translated)?;

        if !self.options.generate_reply {
            return Ok(());
        }
        if let Some(error) = &outcome.generation_error {
            writeln!(output, "❌ {}", error)?;
        }
        if outcome.suggested.is_empty() {
            writeln!(output, "⚠️  No suggested reply produced.")?;
        } else {
            writeln!(output, "\n### Suggested Reply")?;
            writeln!(output, "{}", outcome.suggested)?;
        }
        Ok(())
    }

    fn evaluate<R: BufRead, W: Write>(
        &self,
        message: &str,
        outcome: &QueryOutcome,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        writeln!(output, "\n### Quick Evaluation")?;
        write!(
            output,
            "Rate translation accuracy (1 = poor, 5 = perfect, blank to skip): "
        )?;
        output.flush()?;

        let Some(answer) = read_line(input)? else {
            return Ok(());
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(());
        }
        let rating = match answer.parse::<u8>() {
            Ok(rating) if (1..=5).contains(&rating) => rating,
            _ => {
                writeln!(output, "⚠️  Rating must be a number from 1 to 5; evaluation skipped.")?;
                return Ok(());
            }
        };

        write!(output, "Comments (optional): ")?;
        output.flush()?;
        let comments = read_line(input)?.unwrap_or_default();

        let entry = EvaluationEntry {
            input: message.to_string(),
            detected_language: outcome.detected_language.clone(),
            translated: outcome.translated.clone(),
            suggested: outcome.suggested.clone(),
            rating,
            comments: comments.trim().to_string(),
            recorded_at: None,
        };
        match self.store.save(entry) {
            Ok(()) => writeln!(output, "✅ Evaluation saved.")?,
            Err(e) => writeln!(output, "❌ Failed to save evaluation: {:#}", e)?,
        }
        Ok(())
    }
}

/// Read one line without its terminator; `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Read lines up to the first empty line or end of input
fn read_block<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut lines = Vec::new();
    while let Some(line) = read_line(input)? {
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
