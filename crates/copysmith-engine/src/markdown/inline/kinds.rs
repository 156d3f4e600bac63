//! Inline delimiters. The parser and the serializer both read these; neither
//! hardcodes markup characters.

pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}

pub struct Strong;

impl Strong {
    /// Canonical delimiter, used when serializing.
    pub const STARS: &'static [u8; 2] = b"**";
    pub const UNDERSCORES: &'static [u8; 2] = b"__";
    pub const CANONICAL: &'static str = "**";
}

pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const CANONICAL: &'static str = "*";
}

pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const TEXT_CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const URL_CLOSE: u8 = b')';
    /// `![alt](src)` is an image; images pass through as text.
    pub const IMAGE_BANG: char = '!';
}
