//! PMF Compiler - graph construction for the portable model format
//!
//! This crate turns column-level contributions from pipeline stages into an
//! IR program:
//! - Collision-free name allocation
//! - Column type translation
//! - The graph context shared by all stages of one export run
//! - Assembly of the final model envelope

pub mod assembler;
pub mod context;
pub mod error;
pub mod naming;
pub mod translate;

// Re-export main types
pub use assembler::ModelAssembler;
pub use context::GraphContext;
pub use error::{CompileError, Result};
pub use naming::{NameAllocator, NamePool};
pub use translate::TypeTranslator;
