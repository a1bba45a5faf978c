/// Number of arguments a SQLite statement expects.
///
/// Bare `?` placeholders are counted in order; `?NNN` placeholders count up to their highest
/// index. Placeholders inside string literals, quoted identifiers and comments are ignored.
pub fn count_placeholders(sql: &str) -> usize {
    let mut sequential = 0usize;
    let mut highest = 0usize;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' | '`' => {
                // a doubled quote is an escape and reopens the literal, which this handles for free
                for d in chars.by_ref() {
                    if d == c {
                        break;
                    }
                }
            }
            '-' if chars.peek() == Some(&'-') => {
                for d in chars.by_ref() {
                    if d == '\n' {
                        break;
                    }
                }
            }
            '?' => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                match digits.parse::<usize>() {
                    Ok(n) => highest = highest.max(n),
                    Err(_) => {
                        sequential += 1;
                        highest = highest.max(sequential);
                    }
                }
            }
            _ => {}
        }
    }
    highest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_sequential() {
        assert_eq!(count_placeholders("SELECT * FROM form WHERE id = ? OR name = ?"), 2);
        assert_eq!(count_placeholders("SELECT * FROM form"), 0);
    }

    #[test]
    fn test_ignore_quoted() {
        assert_eq!(count_placeholders("SELECT * FROM form WHERE name = 'what?' AND id = ?"), 1);
        assert_eq!(count_placeholders("SELECT \"a?\" FROM form -- really?\nWHERE id = ?"), 1);
        assert_eq!(count_placeholders("SELECT 'it''s?' FROM form"), 0);
    }

    #[test]
    fn test_numbered() {
        assert_eq!(count_placeholders("SELECT * FROM form WHERE id = ?2 OR id = ?1"), 2);
        assert_eq!(count_placeholders("SELECT * FROM form WHERE id = ?1 OR name = ?1"), 1);
    }
}
