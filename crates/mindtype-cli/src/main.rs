use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use mindtype_core::narrative::ResultNarrative;
use mindtype_core::question::{Choice, Question};
use mindtype_core::scoring::TypeCode;
use mindtype_core::session::{QuizSession, SessionEvent, SessionPhase};
use mindtype_interaction::GeminiApiClient;

/// MindType - MBTI learning-style assessment driven by generative AI.
#[derive(Parser)]
#[command(name = "mindtype", version, about)]
struct Cli {
    /// Gemini model to use for both generation calls.
    #[arg(long)]
    model: Option<String>,
}

/// One line of user input, or the request to leave.
enum Input {
    Line(String),
    Quit,
}

/// The main entry point for the MindType terminal quiz.
///
/// Sets up logging and the Gemini client, then drives the session state
/// machine: each loop iteration renders the current phase and either awaits
/// its entry action (Loading, Analyzing) or reads one user event from the
/// readline prompt (Welcome, Testing, Result, Error).
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // The credential is the one fatal startup requirement.
    let mut client =
        GeminiApiClient::try_from_env().context("Gemini credential is not configured")?;
    if let Some(model) = cli.model {
        client = client.with_model(model);
    }

    let client = Arc::new(client);
    let mut session = QuizSession::new(client.clone(), client);

    let mut rl = DefaultEditor::new()?;

    println!("{}", "=== MindType ===".bright_magenta().bold());
    println!(
        "{}",
        "Find out how you learn best. Type 'quit' at any prompt to exit.".bright_black()
    );
    println!();

    loop {
        match session.phase().clone() {
            SessionPhase::Loading => {
                println!("{}", "Creating your questions...".bright_black());
                session.load().await;
            }

            SessionPhase::Welcome => {
                print_welcome(session.questions().len());
                match read_line(&mut rl, "Press Enter to start >> ")? {
                    Input::Quit => break,
                    Input::Line(_) => {
                        session.apply(SessionEvent::Start);
                    }
                }
            }

            SessionPhase::Testing { current, .. } => {
                let total = session.questions().len();
                let Some(question) = session.current_question() else {
                    eprintln!("{}", "Internal error: no current question".red());
                    break;
                };
                print_question(question, current + 1, total);

                loop {
                    match read_line(&mut rl, "Your choice (1 or 2) >> ")? {
                        Input::Quit => return Ok(()),
                        Input::Line(line) => match line.as_str() {
                            "1" => {
                                session.apply(SessionEvent::Answer(Choice::First));
                                break;
                            }
                            "2" => {
                                session.apply(SessionEvent::Answer(Choice::Second));
                                break;
                            }
                            _ => println!("{}", "Please answer 1 or 2.".yellow()),
                        },
                    }
                }
            }

            SessionPhase::Analyzing { .. } => {
                println!();
                println!("{}", "Analyzing your answers...".bright_black());
                session.analyze().await;
            }

            SessionPhase::Result {
                type_code,
                narrative,
            } => {
                print_result(&type_code, &narrative);
                println!();
                match read_line(&mut rl, "Type 'retry' to take the test again, or 'quit' to exit >> ")? {
                    Input::Quit => break,
                    Input::Line(line) => {
                        if line.eq_ignore_ascii_case("retry") {
                            session.apply(SessionEvent::Retry);
                        } else {
                            println!("{}", "Unknown command".bright_black());
                        }
                    }
                }
            }

            SessionPhase::Error { message } => {
                print_error(&message);
                match read_line(&mut rl, "Press Enter to try again >> ")? {
                    Input::Quit => break,
                    Input::Line(_) => {
                        session.apply(SessionEvent::Retry);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Reads one trimmed line, looping past interrupts; 'quit'/'exit' and
/// CTRL-D both resolve to [`Input::Quit`].
fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Input> {
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
                    println!("{}", "Goodbye!".bright_green());
                    return Ok(Input::Quit);
                }

                let _ = rl.add_history_entry(&line);
                return Ok(Input::Line(trimmed.to_string()));
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                return Ok(Input::Quit);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn print_welcome(total: usize) {
    println!(
        "{}",
        "Welcome to the MindType learning-style test!"
            .bright_magenta()
            .bold()
    );
    println!(
        "{}",
        format!("Answer {total} quick questions to discover how you learn best.").bright_blue()
    );
    println!(
        "{}",
        "There are no right or wrong answers - pick the option that feels most like you."
            .bright_blue()
    );
    println!();
}

fn print_question(question: &Question, number: usize, total: usize) {
    println!();
    println!("{}", format!("Question {number}/{total}").bright_black());
    println!("{}", question.prompt.bright_blue().bold());
    println!(
        "  {}",
        format!("1) {}", question.options[0].text).bright_blue()
    );
    println!(
        "  {}",
        format!("2) {}", question.options[1].text).bright_blue()
    );
}

fn print_result(type_code: &TypeCode, narrative: &ResultNarrative) {
    println!();
    println!(
        "{}",
        format!("Your learning type: {type_code}")
            .bright_magenta()
            .bold()
    );
    println!("{}", narrative.title.bright_magenta().bold());
    println!();
    println!("{}", narrative.description.bright_blue());

    print_list("Strengths", &narrative.strengths);
    print_list("Things to work on", &narrative.weaknesses);
    print_list("Recommended study methods", &narrative.recommendations);
    print_list("Reading strategies", &narrative.reading_strategies);
    print_list("Math strategies", &narrative.math_strategies);
    print_list("Science strategies", &narrative.science_strategies);
}

fn print_list(heading: &str, entries: &[String]) {
    println!();
    println!("{}", heading.bright_magenta());
    for entry in entries {
        println!("  {}", format!("- {entry}").bright_blue());
    }
}

fn print_error(message: &str) {
    println!();
    println!("{}", "Oops! Something went wrong".red().bold());
    println!("{}", message.red());
}
