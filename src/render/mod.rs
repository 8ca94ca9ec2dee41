// ABOUTME: Manifest rendering pipeline: variables, template substitution, writing.
// ABOUTME: Everything here except the writer is pure and free of I/O.

mod template;
mod variables;
mod writer;

pub use template::{Template, render, substitute};
pub use variables::{ResolveError, VariableResolver, VariableSet};
pub use writer::{ManifestWriter, WriteError};
