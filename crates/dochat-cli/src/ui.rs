//! Read loop and output rendering for the interactive mode

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use colored::*;

use dochat_core::Result;
use dochat_rag::AnswerEngine;

/// Display the startup banner
pub fn display_banner() {
    println!();
    println!("{}", "┌─────────────────────────────────────────────┐".blue());
    println!(
        "{}",
        "│  dochat — chat with your documents          │".blue()
    );
    println!("{}", "└─────────────────────────────────────────────┘".blue());
    println!();
    println!(
        "{}",
        "💡 Ask a question about the indexed documents, or 'exit' to quit".dimmed()
    );
    println!();
}

/// Read one question from stdin.
///
/// Returns `None` on end of input (Ctrl-D or an exhausted pipe).
fn read_question() -> Result<Option<String>> {
    if io::stdin().is_terminal() {
        print!("{} ", "dochat>".green().bold());
        io::stdout().flush()?;
    }

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

fn print_answer(answer: &dochat_rag::Answer) {
    println!("{} {}", "Answer:".green().bold(), answer.answer);

    if !answer.sources.is_empty() {
        println!("{}", "Sources:".dimmed());
        for source in &answer.sources {
            println!("  {} {} ({:.2})", "•".dimmed(), source.source, source.score);
        }
    }

    if !answer.history.is_empty() {
        println!("{}", "History:".dimmed());
        for interaction in &answer.history {
            println!("  {} {}", "Q:".dimmed(), interaction.question.dimmed());
            println!("  {} {}", "A:".dimmed(), interaction.answer.dimmed());
        }
    }
    println!();
}

/// Run the interactive question loop until exit or end of input.
///
/// Per-request failures print a short diagnostic and the loop continues;
/// only an unreadable stdin terminates it with an error.
pub async fn run_loop(engine: Arc<AnswerEngine>) -> Result<()> {
    display_banner();

    loop {
        let question = match read_question()? {
            Some(question) => question,
            None => {
                println!("\n{}", "👋 Goodbye!".green());
                return Ok(());
            }
        };

        if question.is_empty() {
            continue;
        }

        let lowered = question.to_lowercase();
        if lowered == "exit" || lowered == "quit" {
            println!("{}", "👋 Goodbye!".green());
            return Ok(());
        }

        match engine.answer(&question).await {
            Ok(answer) => print_answer(&answer),
            Err(e) => {
                println!("{} {}", "❌".red(), e);
            }
        }
    }
}
