//! Asciiscape (workspace facade crate).
//!
//! Re-exports the member crates under one name, so applications and the
//! integration tests can use `asciiscape::{core, engine, input, term, types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use asciiscape_core as core;
pub use asciiscape_engine as engine;
pub use asciiscape_input as input;
pub use asciiscape_term as term;
pub use asciiscape_types as types;
