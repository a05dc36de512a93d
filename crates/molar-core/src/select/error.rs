use thiserror::Error;

/// Error raised while compiling a selection query.
///
/// Both variants carry the full query text and the byte offset of the
/// offending token; `Display` renders the query with a caret under it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Syntax error at column {}: {message}\n{}", .position + 1, render_marker(.query, .position))]
    Syntax {
        message: String,
        position: usize,
        query: String,
    },

    #[error("Unknown attribute '{name}' at column {}\n{}", .position + 1, render_marker(.query, .position))]
    UnknownAttribute {
        name: String,
        position: usize,
        query: String,
    },
}

impl SelectionError {
    pub fn syntax(message: impl Into<String>, position: usize, query: &str) -> Self {
        SelectionError::Syntax {
            message: message.into(),
            position,
            query: query.to_string(),
        }
    }

    pub fn unknown_attribute(name: &str, position: usize, query: &str) -> Self {
        SelectionError::UnknownAttribute {
            name: name.to_string(),
            position,
            query: query.to_string(),
        }
    }

    pub fn position(&self) -> usize {
        match self {
            SelectionError::Syntax { position, .. }
            | SelectionError::UnknownAttribute { position, .. } => *position,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            SelectionError::Syntax { query, .. } | SelectionError::UnknownAttribute { query, .. } => {
                query
            }
        }
    }
}

fn render_marker(query: &str, position: &usize) -> String {
    let column = query
        .get(..*position)
        .map_or(*position, |prefix| prefix.chars().count());
    format!("  {}\n  {}^", query, " ".repeat(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_points_at_the_offending_column() {
        let err = SelectionError::syntax("expected a value", 6, "resid ");
        let text = err.to_string();
        assert!(text.starts_with("Syntax error at column 7: expected a value"));
        assert!(text.ends_with("\n  resid \n        ^"));
    }

    #[test]
    fn unknown_attribute_mentions_the_name() {
        let err = SelectionError::unknown_attribute("resi", 0, "resi 5");
        assert_eq!(err.position(), 0);
        assert_eq!(err.query(), "resi 5");
        assert!(err.to_string().contains("Unknown attribute 'resi' at column 1"));
    }
}
