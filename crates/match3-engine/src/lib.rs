pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("tile generator exhausted")]
pub struct GeneratorExhaustedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cascade still unsettled after {passes} passes")]
pub struct CascadeLimitError {
    pub passes: usize,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum CascadeError {
    #[display("refill failed: {_0}")]
    Generator(GeneratorExhaustedError),
    #[display("{_0}")]
    Limit(CascadeLimitError),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum BoardError {
    #[display("invalid board dimensions {width}x{height}")]
    #[from(skip)]
    InvalidDimensions { width: usize, height: usize },
    #[display("initial fill failed: {_0}")]
    Generator(GeneratorExhaustedError),
    #[display("initial resolution failed: {_0}")]
    Cascade(CascadeError),
}
