// src/core/annotation.rs
use regex::Regex;
use std::sync::OnceLock;

use crate::core::types::AnnotationTuple;
use crate::error::AnnotationError;

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\S*)\s+([^%]+)%\s+([^\[]+)\s+(.*)$").expect("annotation pattern is valid")
    })
}

/// Corpus comments start with `%`.
pub fn is_comment(line: &str) -> bool {
    line.starts_with('%')
}

/// Drops comments and blank lines, trimming what is left.
pub fn clean_lines<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter(|l| !is_comment(l))
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits `LEX ROLE% SURFACE [REST` into its four fields.
pub fn parse_line(line: &str) -> Result<AnnotationTuple, AnnotationError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(AnnotationError::Empty);
    }
    let Some(caps) = line_pattern().captures(line) else {
        return Err(classify_failure(line));
    };
    Ok(AnnotationTuple {
        lexical_unit: caps[1].to_string(),
        role: caps[2].trim().to_string(),
        surface_form: caps[3].trim().to_string(),
        position_count: caps[4].to_string(),
    })
}

fn classify_failure(line: &str) -> AnnotationError {
    let line = line.to_string();
    match line.split_once('%') {
        None => AnnotationError::MissingRoleMarker { line },
        Some((_, rest)) if !rest.contains('[') => AnnotationError::MissingSurface { line },
        Some(_) => AnnotationError::Malformed { line },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_surface_and_rest() {
        let t = parse_line("run.v.01 Agent% running [0,1]").unwrap();
        assert_eq!(t.lexical_unit, "run.v.01");
        assert_eq!(t.role, "Agent");
        assert_eq!(t.surface_form, "running");
        assert_eq!(t.position_count, "[0,1]");
    }

    #[test]
    fn multi_word_surface_is_kept_whole() {
        let t = parse_line("city.n.01 Name \"new_york\"  % New York [8...16]").unwrap();
        assert_eq!(t.lexical_unit, "city.n.01");
        assert_eq!(t.role, "Name \"new_york\"");
        assert_eq!(t.surface_form, "New York");
        assert_eq!(t.position_count, "[8...16]");
    }

    #[test]
    fn failures_carry_a_reason() {
        assert_eq!(parse_line("   "), Err(AnnotationError::Empty));
        assert!(matches!(
            parse_line("NEGATION <1"),
            Err(AnnotationError::MissingRoleMarker { .. })
        ));
        assert!(matches!(
            parse_line("male.n.02 % He"),
            Err(AnnotationError::MissingSurface { .. })
        ));
        assert!(matches!(
            parse_line("male.n.02 %[0-2]"),
            Err(AnnotationError::Malformed { .. })
        ));
    }

    #[test]
    fn clean_lines_drops_comments_and_blanks() {
        let lines = clean_lines(["% bla", "", "male.n.02  % He [0-2]  "]);
        assert_eq!(lines, vec!["male.n.02  % He [0-2]".to_string()]);
    }
}
