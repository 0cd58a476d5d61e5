/// Printable preview of a cell value
pub(crate) fn format_cell_char(value: u8) -> String {
    match value {
        0 => String::new(),
        b'\n' => "'\\n'".to_string(),
        b'\t' => "'\\t'".to_string(),
        b' ' => "' '".to_string(),
        v if v.is_ascii_graphic() => format!("'{}'", v as char),
        v => format!("'\\x{:02x}'", v),
    }
}

/// Split output bytes into display lines
///
/// A trailing newline does not produce an empty last line.
pub(crate) fn output_lines(output: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(output);
    let mut lines: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
    if lines.last().is_some_and(|s| s.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cell_char() {
        assert_eq!(format_cell_char(0), "");
        assert_eq!(format_cell_char(b'H'), "'H'");
        assert_eq!(format_cell_char(b'\n'), "'\\n'");
        assert_eq!(format_cell_char(200), "'\\xc8'");
    }

    #[test]
    fn test_output_lines() {
        assert!(output_lines(b"").is_empty());
        assert_eq!(output_lines(b"Hello\n"), vec!["Hello"]);
        assert_eq!(output_lines(b"a\nb"), vec!["a", "b"]);
        assert_eq!(output_lines(b"a\n\nb\n"), vec!["a", "", "b"]);
    }
}
