use crate::types::EntryId;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Native-syntax compile failure. Recovered locally by retrying the
    /// query through the plain compiler path, never surfaced as fatal.
    #[error("query is not a valid expression: {0}")]
    InvalidExpression(#[from] els_query_parser::CompileError),

    /// The entry has no extractable text. It is treated as non-matching
    /// and the rest of the batch continues.
    #[error("entry {0} has no extractable text")]
    MissingContent(EntryId),

    /// A highlight or cleanup operation targeted an entry whose content
    /// the host tore out mid-pass. Logged per entry, pass continues.
    #[error("entry {0} lost its content while markers were being rewritten")]
    MissingMarkerParent(EntryId),
}

pub type Result<T> = std::result::Result<T, Error>;
