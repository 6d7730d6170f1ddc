//! Interactive terminal front end for step-by-step equation transformations.
//!
//! Start with an equation given on the command line, e.g. `chalk "2*x+3=7"`, or with one of the
//! starter equations. Every node of the equation has an id; commands select nodes by id, e.g.
//! `side 12` moves the term with id 12 across the equals sign. Type `help` for the list of
//! commands.
//!
//! Settings are read from `chalk.toml` in the working directory. The log filter is taken from
//! the `CHALK_LOG` environment variable, then from the `log` setting.

mod command;
mod config;
mod error;

use chalk_engine::{Equation, Kind, NodeId, Session};
use command::{Command, COMMANDS};
use config::Config;
use error::ReplError;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::ops::ControlFlow;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// The environment variable holding the log filter.
const LOG_ENV: &str = "CHALK_LOG";

/// Installs the log subscriber, writing to stderr.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config.log.as_deref().unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Prints a node and its descendants, one per line, with their ids.
fn print_tree(eq: &Equation, id: NodeId, depth: usize) {
    let label = match eq.kind(id) {
        Some(Kind::Custom(name)) => format!("{}()", name),
        _ => eq.symbol_text(id).unwrap_or_else(|| eq.render_node(id)),
    };
    println!("{}{}  #{}", "  ".repeat(depth), label, id);

    for &child in eq.children(id) {
        print_tree(eq, child, depth + 1);
    }
}

/// Prints the id of every node next to the text of its subtree.
fn print_ids(eq: &Equation) {
    for id in eq.ids() {
        if id != eq.root() {
            println!("{:>6}  {}", id, eq.render_node(id));
        }
    }
}

fn print_help() {
    for (name, usage, description) in COMMANDS {
        let synopsis = format!("{} {}", name, usage);
        println!("  {:<32}{}", synopsis, description);
    }
}

/// The state of the REPL.
struct Repl {
    session: Session,
    show_ids: bool,
}

impl Repl {
    fn new(config: &Config) -> Self {
        let session = match config.seed {
            Some(seed) => Session::with_seed(seed),
            None => Session::new(),
        };
        Self { session, show_ids: config.show_ids }
    }

    /// Prints the current equation, and the id table if enabled.
    fn show(&mut self, with_ids: bool) {
        let eq = self.session.current_equation();
        println!("{}", eq);
        if with_ids {
            print_ids(eq);
        }
    }

    /// Runs a transformation, printing the new equation if it succeeds.
    fn transform<F>(&mut self, op: F) -> Result<(), ReplError>
    where
        F: FnOnce(&mut Session) -> Result<&Equation, chalk_engine::Error>,
    {
        let rendered = self.session.current_equation().render();
        match op(&mut self.session).map(drop) {
            Ok(()) => {
                self.show(self.show_ids);
                Ok(())
            },
            Err(error) => Err(ReplError::Engine { rendered, error }),
        }
    }

    /// Runs a command.
    fn run(&mut self, command: Command) -> Result<ControlFlow<()>, ReplError> {
        debug!(?command, "running command");
        match command {
            Command::Show => self.show(true),
            Command::Tree => {
                let eq = self.session.current_equation();
                print_tree(eq, eq.root(), 0);
            },
            Command::New(text) => match self.session.load(&text).map(drop) {
                Ok(()) => self.show(self.show_ids),
                Err(error) => return Err(ReplError::Parse { text, error }),
            },
            Command::Samples => {
                for sample in self.session.sample_expressions() {
                    println!("  {}", sample);
                }
            },
            Command::Commute(node, direction) => {
                self.transform(|session| session.commute(node, direction))?
            },
            Command::Associate(start, end) => {
                self.transform(|session| session.associate(start, end))?
            },
            Command::Dissociate(node) => self.transform(|session| session.dissociate(node))?,
            Command::Operate(node) => self.transform(|session| session.operate(node))?,
            Command::Factor(terms) => {
                self.transform(|session| session.common_factor(&terms))?
            },
            Command::Side(node) => self.transform(|session| session.change_side(node))?,
            Command::Distribute(single, sum) => {
                self.transform(|session| session.distribute(single, sum))?
            },
            Command::History => {
                let history = self.session.history();
                if history.is_empty() {
                    println!("no transformations yet");
                }
                for (i, transformation) in history.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, transformation);
                }
            },
            Command::Help => print_help(),
            Command::Quit => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }
}

fn report(err: &ReplError) {
    if let Err(io) = err.report_to_stderr() {
        eprintln!("{}", io);
    }
}

fn main() {
    let config = Config::load();
    init_logging(&config);
    debug!(?config, "loaded configuration");

    let mut repl = Repl::new(&config);

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        repl.show(config.show_ids);
    } else if let Err(err) = repl.run(Command::New(text)) {
        report(&err);
        return;
    }

    // run the repl / interactive mode
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            return;
        },
    };

    fn process_line(rl: &mut DefaultEditor, repl: &mut Repl) -> Result<ControlFlow<()>, ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        rl.add_history_entry(&input)?;

        let flow = input
            .parse::<Command>()
            .map_err(ReplError::from)
            .and_then(|command| repl.run(command));
        match flow {
            Ok(flow) => Ok(flow),
            Err(err) => {
                report(&err);
                Ok(ControlFlow::Continue(()))
            },
        }
    }

    loop {
        match process_line(&mut rl, &mut repl) {
            Ok(ControlFlow::Continue(())) => (),
            Ok(ControlFlow::Break(())) => break,
            Err(err) => {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            },
        }
    }
}
