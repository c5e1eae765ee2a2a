use std::io::Write;

use crate::encoder::Word;
use crate::error::Result;

/// Extension point for different output formats
pub trait Backend {
    fn write_word(&self, word: Word, buf: &mut String);
}

/// Hack text format: 16 characters of '0'/'1', MSB first
pub struct HackBinary;

impl Backend for HackBinary {
    fn write_word(&self, word: Word, buf: &mut String) {
        let bits = word.bits();
        for i in (0..16).rev() {
            buf.push(if bits & (1 << i) != 0 { '1' } else { '0' });
        }
    }
}

/// Render words with `backend`, one newline-terminated line each.
pub fn render_with<B: Backend>(backend: &B, words: &[Word]) -> String {
    let mut out = String::with_capacity(words.len() * 17);
    for &word in words {
        backend.write_word(word, &mut out);
        out.push('\n');
    }
    out
}

pub fn render(words: &[Word]) -> String {
    render_with(&HackBinary, words)
}

pub fn write_words<W: Write>(words: &[Word], mut out: W) -> Result<()> {
    out.write_all(render(words).as_bytes())?;
    out.flush()?;
    Ok(())
}
