use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid base {0}: must be 2 or 10")]
    InvalidBase(u32),
    #[error("could not parse {0:?} as a file size")]
    Parse(String),
}
