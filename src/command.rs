//! Chat-command front-end
//!
//! Accepts whitespace-separated tokens of exactly 4 characters from
//! {'+','-'}, optionally prefixed by a literal `press` or `submit`
//! keyword. Each token selects a vertex by sign pattern. The whole
//! batch is parsed before anything is pressed, so one malformed token
//! discards the command without touching the module.

use hypercube_core::{BombHost, HypercubeModule, SignPattern};

/// Usage string surfaced to the command issuer
pub const HELP_TEXT: &str =
    "press ++-+ -+-+ +-+- [press the vertices at those sign positions; axis order is X, Y, Z, W]";

/// Where parsed presses go. The module implements this; tests can
/// substitute a recorder.
pub trait PressSink {
    /// Whether submission mode has begun
    fn submission_active(&self) -> bool;
    /// Queue the batch for pressing
    fn enqueue_presses(&mut self, vertices: Vec<usize>);
}

impl<H: BombHost> PressSink for HypercubeModule<H> {
    fn submission_active(&self) -> bool {
        self.in_submission()
    }

    fn enqueue_presses(&mut self, vertices: Vec<usize>) {
        self.queue_presses(vertices);
    }
}

/// Why a command was rejected. No state changes on any of these.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Submission mode has not yet begun
    NotYetSubmitting,
    /// No vertex tokens in the command
    Empty,
    /// A token has the wrong length or a character outside '+'/'-'
    MalformedToken(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NotYetSubmitting => {
                write!(f, "It is not yet time to submit! Command ignored.")
            }
            CommandError::Empty => write!(f, "No vertices given. Usage: {}", HELP_TEXT),
            CommandError::MalformedToken(token) => write!(
                f,
                "{:?} is not a vertex: expected exactly 4 characters from '+' and '-'",
                token
            ),
        }
    }
}

impl std::error::Error for CommandError {}

/// Handle one command line. On success the parsed presses are queued
/// and the number of queued vertices is returned.
pub fn handle_command(sink: &mut impl PressSink, input: &str) -> Result<usize, CommandError> {
    if !sink.submission_active() {
        return Err(CommandError::NotYetSubmitting);
    }
    let vertices = parse_tokens(input)?;
    let count = vertices.len();
    sink.enqueue_presses(vertices);
    Ok(count)
}

/// Parse a command line into vertex indices without side effects.
pub fn parse_tokens(input: &str) -> Result<Vec<usize>, CommandError> {
    let lower = input.to_lowercase();
    let mut tokens = lower.split_whitespace().peekable();

    // Optional leading keyword
    if let Some(&first) = tokens.peek() {
        if first == "press" || first == "submit" {
            tokens.next();
        }
    }

    let mut vertices = Vec::new();
    for token in tokens {
        match SignPattern::parse(token) {
            Some(pattern) => vertices.push(pattern.index()),
            None => return Err(CommandError::MalformedToken(token.to_string())),
        }
    }
    if vertices.is_empty() {
        return Err(CommandError::Empty);
    }
    Ok(vertices)
}
