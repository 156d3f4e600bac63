pub mod content;
pub mod editing;
pub mod error;
pub mod markdown;
pub mod slash;

// Re-export key types for easier usage
pub use content::{MessageView, classify_message};
pub use editing::{Cmd, Editor, Patch, SlashCompletion};
pub use error::EngineError;
pub use markdown::{DocumentTree, markdown_to_structure, normalize_markdown, structure_to_markdown};
pub use slash::{CommandRegistry, SlashCommand};
