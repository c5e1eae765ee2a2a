/// Strip a trailing `//` comment and remove all whitespace.
///
/// Blank and comment-only lines come back empty.
pub fn sanitize(line: &str) -> String {
    let code = match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    };
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  @123  "), "@123");
        assert_eq!(sanitize("D=M // comment"), "D=M");
        assert_eq!(sanitize("D=M// no space"), "D=M");
        assert_eq!(sanitize("  D = D + 1 ; JGT"), "D=D+1;JGT");
        assert_eq!(sanitize("\t(LOOP)\r"), "(LOOP)");
    }

    #[test]
    fn test_sanitize_blank() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \t"), "");
        assert_eq!(sanitize("// only comment"), "");
        assert_eq!(sanitize("    // indented comment"), "");
    }
}
