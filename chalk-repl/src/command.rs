//! Parsing of the commands typed at the prompt.

use chalk_engine::{Direction, NodeId};
use levenshtein::levenshtein;
use std::{fmt, str::FromStr};

/// The name of every command, with its arguments, and what it does.
pub const COMMANDS: [(&str, &str, &str); 14] = [
    ("show", "", "print the equation and its node ids"),
    ("tree", "", "print the equation as a tree"),
    ("new", "<equation>", "replace the equation"),
    ("samples", "", "list the starter equations"),
    ("commute", "<id> left|right", "swap a term with its neighbor"),
    ("associate", "<id> <id>", "group a run of terms"),
    ("dissociate", "<id>", "ungroup a nested sum or product"),
    ("operate", "<id>", "fold an operation of numbers"),
    ("factor", "<id> <id> [<id>...]", "extract a common factor"),
    ("side", "<id>", "move a term, or a whole side, across the equals sign"),
    ("distribute", "<id> <id>", "multiply a number into a sum"),
    ("history", "", "list the transformations applied so far"),
    ("help", "", "print this message"),
    ("quit", "", "leave"),
];

/// A command typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Tree,
    New(String),
    Samples,
    Commute(NodeId, Direction),
    Associate(NodeId, NodeId),
    Dissociate(NodeId),
    Operate(NodeId),
    Factor(Vec<NodeId>),
    Side(NodeId),
    Distribute(NodeId, NodeId),
    History,
    Help,
    Quit,
}

/// A line that is not a valid command.
#[derive(Debug, Clone, PartialEq)]
pub enum UsageError {
    /// No command has this name.
    Unknown {
        name: String,
        suggestions: Vec<&'static str>,
    },

    /// The command got the wrong number of arguments.
    Arguments { name: &'static str, usage: &'static str },

    /// An argument is not a node id.
    Id(String),

    /// An argument is not `left` or `right`.
    Direction(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { name, suggestions } => {
                write!(f, "unknown command `{}`", name)?;
                match suggestions.as_slice() {
                    [] => write!(f, "; type `help` for a list of commands"),
                    [one] => write!(f, "; did you mean `{}`?", one),
                    many => write!(f, "; did you mean one of: {}?", many.join(", ")),
                }
            },
            Self::Arguments { name, usage } => write!(f, "usage: {} {}", name, usage),
            Self::Id(arg) => write!(f, "`{}` is not a node id", arg),
            Self::Direction(arg) => write!(f, "`{}` is not a direction; use `left` or `right`", arg),
        }
    }
}

impl std::error::Error for UsageError {}

/// Returns the commands with a name similar to the given name.
pub fn similar_commands(name: &str) -> Vec<&'static str> {
    COMMANDS
        .iter()
        .map(|(command, _, _)| *command)
        .filter(|command| levenshtein(command, name) < 3)
        .collect()
}

fn id(arg: &str) -> Result<NodeId, UsageError> {
    arg.parse().map_err(|_| UsageError::Id(arg.to_string()))
}

/// Parses exactly `N` node ids.
fn ids<const N: usize>(name: &'static str, args: &[&str]) -> Result<[NodeId; N], UsageError> {
    let parsed = args.iter().map(|arg| id(arg)).collect::<Result<Vec<_>, _>>()?;
    parsed.try_into().map_err(|_| arguments(name))
}

fn arguments(name: &'static str) -> UsageError {
    let usage = COMMANDS
        .iter()
        .find(|(command, _, _)| *command == name)
        .map_or("", |(_, usage, _)| *usage);
    UsageError::Arguments { name, usage }
}

impl FromStr for Command {
    type Err = UsageError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args = rest.split_whitespace().collect::<Vec<_>>();

        let no_args = |command: Command, name: &'static str| {
            if args.is_empty() { Ok(command) } else { Err(arguments(name)) }
        };

        match name {
            "show" => no_args(Command::Show, "show"),
            "tree" => no_args(Command::Tree, "tree"),
            "samples" => no_args(Command::Samples, "samples"),
            "history" => no_args(Command::History, "history"),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => no_args(Command::Quit, "quit"),
            "new" if rest.is_empty() => Err(arguments("new")),
            "new" => Ok(Command::New(rest.to_string())),
            "commute" => match args.as_slice() {
                [node, direction] => {
                    let direction = direction
                        .parse::<Direction>()
                        .map_err(|_| UsageError::Direction(direction.to_string()))?;
                    Ok(Command::Commute(id(node)?, direction))
                },
                _ => Err(arguments("commute")),
            },
            "associate" => {
                let [start, end] = ids("associate", &args)?;
                Ok(Command::Associate(start, end))
            },
            "dissociate" => {
                let [node] = ids("dissociate", &args)?;
                Ok(Command::Dissociate(node))
            },
            "operate" => {
                let [node] = ids("operate", &args)?;
                Ok(Command::Operate(node))
            },
            "factor" if args.len() < 2 => Err(arguments("factor")),
            "factor" => Ok(Command::Factor(args.iter().map(|arg| id(arg)).collect::<Result<_, _>>()?)),
            "side" => {
                let [node] = ids("side", &args)?;
                Ok(Command::Side(node))
            },
            "distribute" => {
                let [single, sum] = ids("distribute", &args)?;
                Ok(Command::Distribute(single, sum))
            },
            _ => Err(UsageError::Unknown {
                name: name.to_string(),
                suggestions: similar_commands(name),
            }),
        }
    }
}
