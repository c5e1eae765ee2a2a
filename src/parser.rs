use crate::error::{AsmError, Result};

/// Largest value an A-instruction can carry (15 bits).
pub const MAX_ADDRESS: u16 = 0x7FFF;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(u16),
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Address(Operand),
    Compute {
        dest: Option<String>,
        comp: String,
        jump: Option<String>,
    },
}

/// Instruction with every address operand turned into a number.
/// This type makes it impossible to have unresolved symbols at encoding time
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedInstruction {
    Address(u16),
    Compute {
        dest: Option<String>,
        comp: String,
        jump: Option<String>,
    },
}

impl Instruction {
    /// Resolve an instruction, using `addr` for a symbolic operand
    pub fn resolve(self, addr: u16) -> ResolvedInstruction {
        match self {
            Instruction::Address(Operand::Literal(v)) => ResolvedInstruction::Address(v),
            Instruction::Address(Operand::Symbol(_)) => ResolvedInstruction::Address(addr),
            Instruction::Compute { dest, comp, jump } => {
                ResolvedInstruction::Compute { dest, comp, jump }
            }
        }
    }
}

/// A value tagged with the 1-based source line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    pub line: usize,
    pub inner: T,
}

impl<T> Located<T> {
    pub fn new(line: usize, inner: T) -> Self {
        Self { line, inner }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Instruction(Instruction),
    Label(String),
}

/// Symbols are letters, digits, `_`, `.`, `$` and `:`, not starting with a digit.
pub fn is_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if !c.is_ascii_digit() && is_symbol_char(c) => chars.all(is_symbol_char),
        _ => false,
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}

/// Parse A-instruction (@value or @symbol)
fn parse_address(text: &str, line_num: usize) -> Result<Instruction> {
    let operand = &text[1..]; // Skip '@'

    if operand.starts_with(|c: char| c.is_ascii_digit()) {
        if !operand.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AsmError::InvalidSyntax {
                line: line_num,
                text: text.to_string(),
            });
        }
        return match operand.parse::<u16>() {
            Ok(value) if value <= MAX_ADDRESS => Ok(Instruction::Address(Operand::Literal(value))),
            _ => Err(AsmError::AddressOutOfRange {
                line: line_num,
                value: operand.to_string(),
            }),
        };
    }

    if !is_symbol(operand) {
        return Err(AsmError::InvalidSyntax {
            line: line_num,
            text: text.to_string(),
        });
    }
    Ok(Instruction::Address(Operand::Symbol(operand.to_string())))
}

/// Split C-instruction (dest=comp;jump) into its mnemonics
fn parse_compute(text: &str) -> Instruction {
    let (dest, rest) = match text.split_once('=') {
        Some((dest, rest)) => (Some(dest.to_string()), rest),
        None => (None, text),
    };

    let (comp, jump) = match rest.split_once(';') {
        Some((comp, jump)) => (comp, Some(jump.to_string())),
        None => (rest, None),
    };

    Instruction::Compute {
        dest,
        comp: comp.to_string(),
        jump,
    }
}

/// Parse one sanitized, non-empty line
pub fn parse_line(text: &str, line_num: usize) -> Result<Line> {
    // Label
    if let Some(inner) = text.strip_prefix('(') {
        return match inner.strip_suffix(')') {
            Some(label) if is_symbol(label) => Ok(Line::Label(label.to_string())),
            _ => Err(AsmError::InvalidSyntax {
                line: line_num,
                text: text.to_string(),
            }),
        };
    }

    // A-instruction
    if text.starts_with('@') {
        return Ok(Line::Instruction(parse_address(text, line_num)?));
    }

    // C-instruction
    Ok(Line::Instruction(parse_compute(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(dest: Option<&str>, comp: &str, jump: Option<&str>) -> Line {
        Line::Instruction(Instruction::Compute {
            dest: dest.map(str::to_string),
            comp: comp.to_string(),
            jump: jump.map(str::to_string),
        })
    }

    #[test]
    fn test_parse_a_value() {
        let inst = parse_line("@17", 1).unwrap();
        assert_eq!(inst, Line::Instruction(Instruction::Address(Operand::Literal(17))));
    }

    #[test]
    fn test_parse_a_symbol() {
        let inst = parse_line("@LOOP", 1).unwrap();
        assert_eq!(
            inst,
            Line::Instruction(Instruction::Address(Operand::Symbol("LOOP".to_string())))
        );

        let inst = parse_line("@Main.sub$ret:1", 1).unwrap();
        assert_eq!(
            inst,
            Line::Instruction(Instruction::Address(Operand::Symbol(
                "Main.sub$ret:1".to_string()
            )))
        );
    }

    #[test]
    fn test_parse_a_invalid() {
        assert!(matches!(
            parse_line("@", 4),
            Err(AsmError::InvalidSyntax { line: 4, .. })
        ));
        assert!(matches!(
            parse_line("@12ab", 5),
            Err(AsmError::InvalidSyntax { line: 5, .. })
        ));
        assert!(matches!(
            parse_line("@32768", 6),
            Err(AsmError::AddressOutOfRange { line: 6, .. })
        ));
        assert!(matches!(
            parse_line("@99999999", 7),
            Err(AsmError::AddressOutOfRange { line: 7, .. })
        ));
        assert!(parse_line("@32767", 8).is_ok());
    }

    #[test]
    fn test_parse_label() {
        let line = parse_line("(LOOP)", 1).unwrap();
        assert_eq!(line, Line::Label("LOOP".to_string()));

        assert!(parse_line("(LOOP", 2).is_err());
        assert!(parse_line("()", 3).is_err());
        assert!(parse_line("(1ST)", 4).is_err());
    }

    #[test]
    fn test_parse_c_instruction() {
        assert_eq!(parse_line("D=M+1", 1).unwrap(), compute(Some("D"), "M+1", None));
        assert_eq!(parse_line("D;JGT", 1).unwrap(), compute(None, "D", Some("JGT")));
        assert_eq!(
            parse_line("AMD=D|A;JNE", 1).unwrap(),
            compute(Some("AMD"), "D|A", Some("JNE"))
        );
        assert_eq!(parse_line("0", 1).unwrap(), compute(None, "0", None));
    }

    #[test]
    fn test_parse_c_empty_fields_kept() {
        assert_eq!(parse_line("=D", 1).unwrap(), compute(Some(""), "D", None));
        assert_eq!(parse_line("D;", 1).unwrap(), compute(None, "D", Some("")));
    }

    #[test]
    fn test_resolve() {
        let sym = Instruction::Address(Operand::Symbol("i".to_string()));
        assert_eq!(sym.resolve(16), ResolvedInstruction::Address(16));

        let lit = Instruction::Address(Operand::Literal(5));
        assert_eq!(lit.resolve(16), ResolvedInstruction::Address(5));
    }
}
