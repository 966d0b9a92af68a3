mod direct;
mod provider;

#[cfg(test)]
pub mod fake;

pub use direct::DirectFs;
pub use provider::{
    DocumentProvider, DocumentRow, ProviderError, ProviderFs, SharedProvider, FLAG_SUPPORTS_DELETE,
    MIME_DIRECTORY,
};
