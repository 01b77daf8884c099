use core::fmt;
use std::io::{self, Write};
use std::process::{ExitCode, Termination};

use log::debug;

use crate::numeric::TokenFault;

/// The only thing a user ever sees on stderr when a run fails.
pub const GENERIC_ERROR_MARKER: &str = "ERROR";

#[derive(Debug)]
pub enum ReverbError {
    /// A line could not be read: end of input, stream failure, bad
    /// encoding or an over-long line.
    Input(String),
    /// More tokens on a sample line than a sample can hold.
    CapacityExceeded { capacity: usize },
    /// A token failed its grammar.
    InvalidNumber { token: String, fault: TokenFault },
    /// The amplitude sample has more tokens than the drum sample.
    SampleLengthMismatch { drum: usize, amplitude: usize },
    /// The histogram could not be written out.
    Output(String),
    /// The logging layer could not be installed.
    Logger(String),
}

impl ReverbError {
    pub fn invalid_number(token: &str, fault: TokenFault) -> Self {
        ReverbError::InvalidNumber {
            token: token.to_string(),
            fault,
        }
    }
}

impl fmt::Display for ReverbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReverbError::Input(msg) => write!(f, "input error: {}", msg),
            ReverbError::CapacityExceeded { capacity } => {
                write!(f, "sample holds at most {} values", capacity)
            }
            ReverbError::InvalidNumber { token, fault } => {
                write!(f, "invalid number {:?}: {}", token, fault)
            }
            ReverbError::SampleLengthMismatch { drum, amplitude } => write!(
                f,
                "amplitude sample has {} values but drum sample only {}",
                amplitude, drum
            ),
            ReverbError::Output(msg) => write!(f, "output error: {}", msg),
            ReverbError::Logger(msg) => write!(f, "logger setup failed: {}", msg),
        }
    }
}

impl std::error::Error for ReverbError {}

impl From<io::Error> for ReverbError {
    fn from(err: io::Error) -> Self {
        ReverbError::Input(err.to_string())
    }
}

impl From<log::SetLoggerError> for ReverbError {
    fn from(err: log::SetLoggerError) -> Self {
        ReverbError::Logger(err.to_string())
    }
}

pub type ReverbResult<T> = Result<T, ReverbError>;

pub struct TermResult(pub ReverbResult<()>);

impl Termination for TermResult {
    fn report(self) -> ExitCode {
        match self.0 {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                debug!("{}", err);
                let _ = writeln!(io::stderr(), "{}", GENERIC_ERROR_MARKER);
                ExitCode::FAILURE
            }
        }
    }
}
