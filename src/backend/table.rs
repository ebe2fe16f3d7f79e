use std::fmt;

/// Possibly schema-qualified table name, validated once at startup and
/// always rendered quoted into SQL.
///
/// Bare segments follow PostgreSQL folding (lower-cased); double-quoted
/// segments are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    raw: String,
    segments: Vec<String>,
}

impl TableName {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("empty table name".to_string());
        }

        let mut segments = Vec::new();
        let mut chars = trimmed.chars().peekable();
        loop {
            let segment = match chars.peek() {
                Some(&'"') => {
                    chars.next();
                    let mut quoted = String::new();
                    loop {
                        match chars.next() {
                            Some('"') => break,
                            Some(c) => quoted.push(c),
                            None => return Err("unterminated quoted identifier".to_string()),
                        }
                    }
                    if quoted.is_empty() {
                        return Err("empty quoted identifier".to_string());
                    }
                    quoted
                }
                Some(&c) if c == '_' || c.is_ascii_alphabetic() => {
                    let mut bare = String::new();
                    while let Some(&c) = chars.peek() {
                        if c == '_' || c == '$' || c.is_ascii_alphanumeric() {
                            bare.push(c.to_ascii_lowercase());
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    bare
                }
                Some(c) => return Err(format!("unexpected character '{c}'")),
                None => return Err("trailing '.'".to_string()),
            };
            segments.push(segment);

            match chars.next() {
                None => break,
                Some('.') => continue,
                Some(c) => return Err(format!("unexpected character '{c}'")),
            }
        }

        if segments.len() > 2 {
            return Err("expected `table` or `schema.table`".to_string());
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// Name as written in configuration.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// SQL-safe rendering, e.g. `"georchestra"."notes"`.
    pub fn quoted(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_qualified_name_is_quoted_per_segment() {
        let table = TableName::parse("georchestra.notes").unwrap();
        assert_eq!(table.quoted(), r#""georchestra"."notes""#);
        assert_eq!(table.as_str(), "georchestra.notes");
    }

    #[test]
    fn bare_segments_fold_to_lower_case() {
        let table = TableName::parse("Public.Notes_2016").unwrap();
        assert_eq!(table.quoted(), r#""public"."notes_2016""#);
    }

    #[test]
    fn quoted_segments_keep_case_and_dots() {
        let table = TableName::parse(r#""My.Schema".notes"#).unwrap();
        assert_eq!(table.quoted(), r#""My.Schema"."notes""#);
    }

    #[test]
    fn injection_attempts_are_rejected() {
        assert!(TableName::parse("notes; DROP TABLE users").is_err());
        assert!(TableName::parse(r#"no"tes"#).is_err());
        assert!(TableName::parse(r#""unterminated"#).is_err());
        assert!(TableName::parse("a.b.c").is_err());
        assert!(TableName::parse("notes.").is_err());
        assert!(TableName::parse("1notes").is_err());
        assert!(TableName::parse("  ").is_err());
    }
}
