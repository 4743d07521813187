//! Error taxonomy shared by every operation in the crate

use thiserror::Error;

/// Failure modes common to the mutable and immutable partition contracts.
///
/// The taxonomy is kept broader than what this crate's Rust surface can
/// actually raise: `NullArg` and `IteratorExhausted` are never constructed by
/// anything in this crate (the type system and `Iterator::next() -> Option`
/// already rule those cases out structurally), but the variants are kept so
/// the taxonomy reads as a complete contract rather than a subset tailored to
/// whichever language happens to enforce the rest for free.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// An operation was given an element that does not belong to any subset
    /// of the partition.
    #[error("element is not a member of this partition")]
    NotFound,

    /// An operation's arguments are individually valid but jointly
    /// contradictory (e.g. requesting a union with oneself is fine, but
    /// `move_to` onto a singleton's own subset is not).
    #[error("argument is invalid for this operation: {0}")]
    ArgInvalid(&'static str),

    /// The operation itself is not available on this implementation of the
    /// contract (e.g. every mutator on [`ImmutablePartition`](crate::immutable::ImmutablePartition)).
    #[error("operation is not supported for the given parameters: {0}")]
    Unsupported(&'static str),

    /// Reserved for parity with the taxonomy this crate's contract is drawn
    /// from; nothing in this crate constructs it, since `Option`/`Result`
    /// already make a null argument a type error rather than a runtime one.
    #[error("a required argument was null")]
    NullArg,

    /// Reserved for parity with the taxonomy this crate's contract is drawn
    /// from; nothing in this crate constructs it, since exhausted iterators
    /// are represented by `Iterator::next` returning `None`.
    #[error("iterator has no further elements")]
    IteratorExhausted,
}

/// Failure modes for parsing the canonical string format.
///
/// Grammar-level failures (unmatched brackets, empty blocks, duplicate
/// elements, stray trailing text) and contract-level failures (the parsed
/// blocks are individually well-formed but jointly invalid) are both
/// surfaced through [`PartitionError::ArgInvalid`], wrapped in `Grammar`;
/// `Element` propagates the caller's own deserialization error unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParsePartitionError<E> {
    /// The input did not match the grammar, or the grammar was well-formed
    /// but the resulting blocks violated the partition contract.
    #[error("malformed partition: {0}")]
    Grammar(#[from] PartitionError),

    /// An element's own token could not be parsed into `T`.
    #[error("element failed to parse: {0}")]
    Element(E),
}
