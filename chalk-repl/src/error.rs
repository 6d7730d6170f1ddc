use ariadne::Source;
use chalk_engine::Rendered;
use crate::command::UsageError;
use std::io;

/// Utility enum to package any error that can occur while running a command.
#[derive(Debug)]
pub enum ReplError {
    /// The line is not a valid command.
    Usage(UsageError),

    /// The text given to `new` is not an equation.
    Parse {
        text: String,
        error: chalk_error::Error,
    },

    /// A transformation was rejected by the engine.
    Engine {
        rendered: Rendered,
        error: chalk_engine::Error,
    },
}

impl ReplError {
    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    ///
    /// [`Report`]: https://docs.rs/ariadne/latest/ariadne/struct.Report.html
    pub fn report_to_stderr(&self) -> io::Result<()> {
        match self {
            Self::Usage(err) => {
                eprintln!("{}", err);
                Ok(())
            },
            Self::Parse { text, error } => error
                .build_report("input")
                .eprint(("input", Source::from(text.as_str()))),
            Self::Engine { rendered, error } => error
                .build_report("equation", rendered)
                .eprint(("equation", Source::from(rendered.text.as_str()))),
        }
    }
}

impl From<UsageError> for ReplError {
    fn from(err: UsageError) -> Self {
        Self::Usage(err)
    }
}
