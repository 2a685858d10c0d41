//! Shared types for jexp.
//!
//! This crate defines the decoded expression tree, source file handling,
//! and the errors raised while turning JSON program text into an [`Expr`].

mod decode;
mod error;
mod expr;
mod span;

pub use decode::{decode, parse_program};
pub use error::DecodeError;
pub use expr::Expr;
pub use span::{Position, SourceFile};

/// Result type used while decoding programs.
pub type Result<T> = std::result::Result<T, DecodeError>;
