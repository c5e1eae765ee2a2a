use hack_asm::{assemble, assemble_file, assemble_reader};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join(name)
}

fn test_file(name: &str) {
    let asm_path = fixture(&format!("{}.asm", name));
    let hack_path = fixture(&format!("{}.hack", name));

    let expected = fs::read_to_string(&hack_path)
        .unwrap_or_else(|_| panic!("Failed to read {}", hack_path.display()));

    let result = assemble_file(&asm_path)
        .unwrap_or_else(|e| panic!("Failed to assemble {}: {}", name, e));

    assert!(
        result.is_clean(),
        "Unexpected diagnostics for {}: {:?}",
        name,
        result.diagnostics
    );
    assert_eq!(result.to_hack(), expected, "Output mismatch for {}", name);
}

#[test]
fn test_add() {
    test_file("Add");
}

#[test]
fn test_max() {
    test_file("Max");
}

#[test]
fn test_sum() {
    test_file("Sum");
}

#[test]
fn test_max_symbol_table() {
    let result = assemble_file(&fixture("Max.asm")).unwrap();
    assert_eq!(result.symbols.lookup("OUTPUT_FIRST"), Some(10));
    assert_eq!(result.symbols.lookup("OUTPUT_D"), Some(12));
    assert_eq!(result.symbols.lookup("INFINITE_LOOP"), Some(14));
}

#[test]
fn test_loop_example() {
    let result = assemble("(LOOP)\n@LOOP\n0;JMP\n");
    assert_eq!(result.symbols.lookup("LOOP"), Some(0));
    assert_eq!(result.to_hack(), "0000000000000000\n1110101010000111\n");
}

#[test]
fn test_file_and_memory_agree() {
    let source = fs::read_to_string(fixture("Sum.asm")).unwrap();
    let from_memory = assemble(&source);
    let from_reader = assemble_reader(source.as_bytes()).unwrap();
    assert_eq!(from_memory.words, from_reader.words);
}

#[test]
fn test_crlf_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "@counter\r\nM=0\r\n@counter\r\nD=M;JEQ\r\n").unwrap();

    let result = assemble_file(file.path()).unwrap();
    assert!(result.is_clean());
    assert_eq!(
        result.to_hack(),
        "0000000000010000\n1110101010001000\n0000000000010000\n1111110000010010\n"
    );
}

#[test]
fn test_unreadable_source() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Missing.asm");
    assert!(assemble_file(&missing).is_err());
}
