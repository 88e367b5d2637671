mod command;

use mentor_agent::{Agent, Config, GRAPH_DIAGRAM};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead, IsTerminal};
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const RULE: &str = "============================================================";
const FAREWELL: &str = "Keep practicing! You've got this! 💪";

/// What the loop should do after a line.
enum Flow {
    Continue,
    Exit,
}

/// The tutor, if one is configured, and the runtime its requests run on.
struct Session {
    agent: Option<Agent>,
    runtime: Runtime,
}

impl Session {
    /// Handles one line of input.
    fn handle(&self, input: &str) -> Flow {
        let input = input.trim();
        match input.to_lowercase().as_str() {
            "" => return Flow::Continue,
            "exit" | "quit" => {
                println!("\n{}", FAREWELL);
                return Flow::Exit;
            },
            "graph" => {
                println!("{}", GRAPH_DIAGRAM);
                return Flow::Continue;
            },
            _ => (),
        }

        if input.starts_with('/') {
            command::run(input);
            return Flow::Continue;
        }

        let Some(agent) = &self.agent else {
            println!("\nThe tutor is offline (OPENAI_API_KEY is not set). Type /help for the commands that work offline.\n");
            return Flow::Continue;
        };

        match self.runtime.block_on(agent.reply(input)) {
            Ok(reply) => println!("\nMath Mentor: {}\n", reply),
            Err(err) => println!("\nOops! Something went wrong: {}\n", err),
        }
        Flow::Continue
    }
}

fn print_banner(offline: bool) {
    println!("{}", RULE);
    println!("  🎓 SOCRATIC MATH TUTOR - K-12");
    println!("{}", RULE);
    println!("\nHello! I'm your Math Mentor.");
    println!("I'll help you discover answers through questions,");
    println!("not just give you solutions. That's how we learn!\n");
    println!("Try asking me:");
    println!("  • 'Help me solve 2x + 5 = 13'");
    println!("  • 'I don't understand fractions'");
    println!("  • 'Can you help me with this word problem...'");
    println!("\nType 'graph' to see how I think, '/help' for calculator commands, or 'exit' to quit.");
    if offline {
        println!("\n(offline: set OPENAI_API_KEY to talk to the tutor)");
    }
    println!("{}", RULE);
    println!();
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    let agent = match Agent::new(&config) {
        Ok(agent) => Some(agent),
        Err(err) => {
            tracing::warn!("{}; running offline", err);
            None
        },
    };
    let session = Session { agent, runtime: Runtime::new()? };

    if !io::stdin().is_terminal() {
        // one request per line of piped input
        for line in io::stdin().lock().lines() {
            if let Flow::Exit = session.handle(&line?) {
                break;
            }
        }
        return Ok(());
    }

    print_banner(session.agent.is_none());
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, session: &Session) -> Result<Flow, ReadlineError> {
        let input = rl.readline("You: ")?;
        if input.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        rl.add_history_entry(&input)?;

        Ok(session.handle(&input))
    }

    loop {
        match process_line(&mut rl, &session) {
            Ok(Flow::Continue) => (),
            Ok(Flow::Exit) => break,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => {
                println!("\n\n{}", FAREWELL);
                break;
            },
            Err(err) => {
                eprintln!("{}", err);
                break;
            },
        }
    }

    Ok(())
}
