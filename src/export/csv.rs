//! Minimal CSV encoding and decoding for progress reports.

use crate::error::{ExportError, ExportResult};

/// Quote a field when it contains a delimiter, quote, or line break.
pub fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join fields into one CSV line (without terminator).
pub fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse CSV text into rows of fields.
///
/// Accepts `\n`, `\r\n`, and bare `\r` line endings, quoted fields with
/// embedded delimiters and line breaks, and a leading byte-order mark.
/// Blank lines are dropped.
pub fn parse(text: &str) -> ExportResult<Vec<Vec<String>>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ExportError::Malformed {
            line: quote_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("Zapier, Twilio"), "\"Zapier, Twilio\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_join_row() {
        assert_eq!(join_row(&["a", "b,c", ""]), "a,\"b,c\",");
    }

    #[test]
    fn test_parse_simple() {
        let rows = parse("a,b\n1,2\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let rows = parse("name,note\n\"Missed call → auto-text \"\"How can we help?\"\"\",\"line one\nline two\"\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "Missed call → auto-text \"How can we help?\"");
        assert_eq!(rows[1][1], "line one\nline two");
    }

    #[test]
    fn test_parse_crlf_bom_and_blank_lines() {
        let rows = parse("\u{feff}a,b\r\n\r\n1,2\r\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_trailing_empty_field() {
        let rows = parse("a,b,\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b", ""]]);
    }

    #[test]
    fn test_parse_without_final_newline() {
        let rows = parse("a,b\n1,2").unwrap();
        assert_eq!(rows[1], vec!["1", "2"]);
    }

    #[test]
    fn test_parse_unterminated_quote() {
        let err = parse("a,b\n1,\"oops\n").unwrap_err();
        assert!(matches!(err, ExportError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_escape_then_parse() {
        let fields = ["Auto-tag \"high-ticket\" clients in CRM", "HubSpot, Zapier", "x\r\ny"];
        let rows = parse(&join_row(&fields)).unwrap();
        assert_eq!(rows, vec![fields.to_vec()]);
    }
}
