//! Line-oriented `key=value` settings file reading.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Parse settings text into raw `(key, value)` pairs in line order.
///
/// Blank lines and lines starting with `#` or `!` are skipped. The first
/// `=` or `:` splits key from value; a line without a separator becomes a
/// key with an empty value. Keys and values are trimmed of surrounding
/// whitespace; no further unescaping is applied.
pub fn parse(text: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        match line.find(['=', ':']) {
            Some(split) => {
                let key = line[..split].trim();
                let value = line[split + 1..].trim();
                entries.push((key.to_string(), value.to_string()));
            }
            None => entries.push((line.to_string(), String::new())),
        }
    }

    entries
}

/// Read a settings file as UTF-8 and parse it.
pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
    let text = fs::read_to_string(path)?;
    Ok(parse(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn skips_comments_and_blank_lines() {
        let entries = parse(
            "# a comment\n\
             ! another comment\n\
             \n\
             key1=value1\n",
        );

        assert_eq!(entries, vec![("key1".to_string(), "value1".to_string())]);
    }

    #[test]
    fn splits_on_first_separator_only() {
        let entries = parse("endpoint=https://api.example.org/xmlrpc\n");

        assert_eq!(
            entries,
            vec![(
                "endpoint".to_string(),
                "https://api.example.org/xmlrpc".to_string()
            )]
        );
    }

    #[test]
    fn colon_separates_too() {
        let entries = parse("key: value\n");

        assert_eq!(entries, vec![("key".to_string(), "value".to_string())]);
    }

    #[test]
    fn line_without_separator_becomes_empty_value() {
        let entries = parse("lonesome\n");

        assert_eq!(entries, vec![("lonesome".to_string(), String::new())]);
    }

    #[test]
    fn repeated_keys_stay_in_file_order() {
        let entries = parse("pool[1]=a\npool[2]=b\npool[3]=c\n");

        let values: Vec<&str> = entries.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# settings").unwrap();
        writeln!(file, "thestringkey1=value1").unwrap();
        writeln!(file, "thelistkey[1]=1").unwrap();
        writeln!(file, "thelistkey[3]=3").unwrap();

        let entries = load(file.path()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, "thestringkey1");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load(Path::new("/nonexistent/application.properties")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
