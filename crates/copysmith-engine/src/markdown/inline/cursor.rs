/// A cursor for inline parsing over a single content span.
///
/// Delimiters are all ASCII, so the cursor compares bytes but always
/// advances by whole characters; every index it exposes is a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead of the current position.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// The character immediately before the cursor, if any.
    pub fn prev_char(&self) -> Option<char> {
        self.s[..self.i].chars().next_back()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    /// Remaining input from the cursor position.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    /// Advances past the current character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes. Caller must land on a char boundary.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}
