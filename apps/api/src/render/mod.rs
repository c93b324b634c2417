// Document production: sanitize model output, bind it to a LaTeX template, compile to PDF.

pub mod compiler;
pub mod sanitize;
pub mod templates;

pub use compiler::{CompileError, CompiledArtifact, LatexCompiler};
pub use sanitize::sanitize_value;
pub use templates::{RenderError, Templates};
