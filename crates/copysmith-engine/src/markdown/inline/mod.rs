//! # Inline Formatting
//!
//! Cursor-based inline parsing over one block's content span.
//!
//! Precedence at each position:
//! 1. Code spans (raw zone, nothing parsed inside)
//! 2. Bold (`**x**`, `__x__`)
//! 3. Italic (`*x*`, `_x_`), never opened by half of a bold delimiter;
//!    underscores only count at word boundaries
//! 4. Links (`[text](url)`); images and titled links stay literal
//!
//! Unclosed constructs become `InlineNode::Text`.

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::parse_inline;
