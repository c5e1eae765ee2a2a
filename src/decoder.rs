//! Field extraction for encoded words, the inverse of [`crate::encoder`].

use crate::encoder::{COMP_TABLE, DEST_TABLE, JUMP_TABLE, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Address(u16),
    Compute {
        prefix: u8,
        a: u8,
        comp: u8,
        dest: u8,
        jump: u8,
    },
}

pub fn decode(word: Word) -> Decoded {
    let bits = word.bits();
    if bits >> 15 == 0 {
        return Decoded::Address(bits & 0x7FFF);
    }
    Decoded::Compute {
        prefix: (bits >> 13) as u8,
        a: ((bits >> 12) & 0b1) as u8,
        comp: ((bits >> 6) & 0b11_1111) as u8,
        dest: ((bits >> 3) & 0b111) as u8,
        jump: (bits & 0b111) as u8,
    }
}

fn find<V: PartialEq>(table: &phf::Map<&'static str, V>, value: &V) -> Option<&'static str> {
    table
        .entries()
        .find(|(_, v)| *v == value)
        .map(|(&k, _)| k)
}

/// Rebuild canonical mnemonic text for a word.
///
/// Returns `None` when the prefix bits are not `111` or the comp bits are not a
/// known operation.
pub fn disassemble(word: Word) -> Option<String> {
    match decode(word) {
        Decoded::Address(value) => Some(format!("@{}", value)),
        Decoded::Compute {
            prefix,
            a,
            comp,
            dest,
            jump,
        } => {
            if prefix != 0b111 {
                return None;
            }
            let comp = find(&COMP_TABLE, &(a, comp))?;

            let mut text = String::new();
            if dest != 0 {
                text.push_str(find(&DEST_TABLE, &dest)?);
                text.push('=');
            }
            text.push_str(comp);
            if jump != 0 {
                text.push(';');
                text.push_str(find(&JUMP_TABLE, &jump)?);
            }
            Some(text)
        }
    }
}
