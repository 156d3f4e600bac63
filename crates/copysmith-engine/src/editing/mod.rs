/*!
 * # Editing Session
 *
 * A rich-text editing surface over one markdown value.
 *
 * ## Edit Loop
 *
 * - The document lives in a single **`xi_rope::Rope`** holding canonical markdown
 * - All edits are **Commands** (`Cmd` enum) compiled to a single-replacement **Delta**
 * - After each delta the buffer is rebuilt through the structure tree and
 *   serialized back, so the stored value is always canonical
 * - The caret is restored at the same linear character offset, clamped to the end
 * - Every command returns a **Patch** with the changed range and new selection
 *
 * ## Module Structure
 *
 * - **`editor`**: the `Editor` session and slash-menu completion
 * - **`commands`**: `Cmd` enum, list continuation on Enter, plain-text paste
 * - **`caret`**: byte/char offset conversion and changed-range diffing
 * - **`patch`**: edit result metadata
 *
 * ## Usage Pattern
 *
 * ```rust
 * use copysmith_engine::editing::*;
 *
 * let mut editor = Editor::new("1. first");
 * let end = editor.len();
 * let patch = editor.apply(Cmd::Enter { at: end, shift: false });
 *
 * assert_eq!(editor.text(), "1. first\n2. ");
 * assert_eq!(patch.new_selection, 12..12);
 * ```
 */

pub mod caret;
pub mod commands;
pub mod editor;
pub mod patch;

pub use commands::Cmd;
pub use editor::{Editor, SlashCompletion};
pub use patch::Patch;
