use log::trace;
use thiserror::Error;

use super::Edge;
use super::ElementId;

/// The default prefix of element variables in instance files (`v12` refers to element 12).
pub const DEFAULT_VARIABLE_MARKER: char = 'v';

/// An element token on an otherwise valid covering constraint which could not be parsed as an
/// element identifier. The token is skipped; the remaining elements of the line still form an edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: skipping malformed element token `{token}`")]
pub struct MalformedInstanceLine {
    pub line: usize,
    pub token: String,
}

/// The outcome of parsing a single line of an instance file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// The line is a covering constraint `v_1 + ... + v_k >= 1`.
    Edge(Edge),
    /// The line is not part of the hypergraph (objective, bounds, other constraints, ...).
    Ignored,
}

/// Recognises the covering constraints of an LP file.
///
/// A line becomes an edge if it has the form `[label:] t_1 + t_2 + ... + t_k >= 1` where every
/// term `t_i` is either a variable token `v<id>` or the unit coefficient `1` followed by a variable
/// token. Every other line is ignored.
#[derive(Debug, Clone, Copy)]
pub struct InstanceParser {
    variable_marker: char,
}

impl Default for InstanceParser {
    fn default() -> Self {
        InstanceParser {
            variable_marker: DEFAULT_VARIABLE_MARKER,
        }
    }
}

enum Term<'a> {
    Element(ElementId),
    Malformed(&'a str),
}

impl InstanceParser {
    /// Creates a parser for which element variables are prefixed with `variable_marker`.
    pub fn with_marker(variable_marker: char) -> Self {
        InstanceParser { variable_marker }
    }

    pub fn variable_marker(&self) -> char {
        self.variable_marker
    }

    /// Parses line number `line_number` (1-based). Skipped element tokens are appended to
    /// `malformed`.
    pub fn parse_line(
        &self,
        line_number: usize,
        line: &str,
        malformed: &mut Vec<MalformedInstanceLine>,
    ) -> ParsedLine {
        let tokens: Vec<&str> = line.split_ascii_whitespace().collect();

        let Some(mut lhs) = Self::strip_unit_threshold(&tokens) else {
            return ParsedLine::Ignored;
        };
        if lhs.first().is_some_and(|token| token.ends_with(':')) {
            lhs = &lhs[1..];
        }

        let Some(terms) = self.parse_terms(lhs) else {
            trace!("Ignoring line {line_number}: not a unit covering constraint");
            return ParsedLine::Ignored;
        };

        let mut elements = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Term::Element(element) => elements.push(element),
                Term::Malformed(token) => malformed.push(MalformedInstanceLine {
                    line: line_number,
                    token: token.to_owned(),
                }),
            }
        }

        match Edge::new(elements) {
            Some(edge) => ParsedLine::Edge(edge),
            None => {
                trace!("Ignoring line {line_number}: no valid element remains");
                ParsedLine::Ignored
            }
        }
    }

    /// Returns the left-hand side of the constraint if the right-hand side is `>= 1`.
    fn strip_unit_threshold<'t, 'a>(tokens: &'t [&'a str]) -> Option<&'t [&'a str]> {
        match tokens {
            [lhs @ .., ">=", "1"] => Some(lhs),
            [lhs @ .., ">=1"] => Some(lhs),
            _ => None,
        }
    }

    /// Parses `t_1 + ... + t_k`; returns [`None`] if any term has a non-unit coefficient or the
    /// expression does not alternate between terms and `+`.
    fn parse_terms<'a>(&self, lhs: &[&'a str]) -> Option<Vec<Term<'a>>> {
        let mut terms = Vec::new();
        let mut tokens = lhs.iter().copied();
        let mut expect_term = true;

        while let Some(token) = tokens.next() {
            if !expect_term {
                if token != "+" {
                    return None;
                }
                expect_term = true;
                continue;
            }

            let variable = if token == "1" { tokens.next()? } else { token };
            terms.push(self.parse_variable(variable)?);
            expect_term = false;
        }

        if expect_term {
            // Either there were no terms at all or the expression ended with `+`
            return None;
        }
        Some(terms)
    }

    fn parse_variable<'a>(&self, token: &'a str) -> Option<Term<'a>> {
        let id = token.strip_prefix(self.variable_marker)?;
        match id.parse::<u32>() {
            Ok(id) => Some(Term::Element(ElementId::new(id))),
            Err(_) => Some(Term::Malformed(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> (ParsedLine, Vec<MalformedInstanceLine>) {
        let mut malformed = Vec::new();
        let parsed = InstanceParser::default().parse_line(1, line, &mut malformed);
        (parsed, malformed)
    }

    fn ids(parsed: &ParsedLine) -> Vec<u32> {
        match parsed {
            ParsedLine::Edge(edge) => edge.elements().iter().map(|element| element.id()).collect(),
            ParsedLine::Ignored => panic!("Expected an edge but the line was ignored"),
        }
    }

    #[test]
    fn labelled_covering_constraint() {
        let (parsed, malformed) = parse(" c12: v4 + v1 + v9 >= 1");
        assert_eq!(ids(&parsed), vec![1, 4, 9]);
        assert!(malformed.is_empty());
    }

    #[test]
    fn unlabelled_and_compact_threshold() {
        assert_eq!(ids(&parse("v3 + v2 >=1").0), vec![2, 3]);
        assert_eq!(ids(&parse("v7 >= 1").0), vec![7]);
    }

    #[test]
    fn explicit_unit_coefficients_are_accepted() {
        assert_eq!(ids(&parse("c0: 1 v3 + 1 v5 >= 1").0), vec![3, 5]);
    }

    #[test]
    fn other_thresholds_are_ignored() {
        assert_eq!(parse("c0: v1 + v2 >= 2").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: v1 + v2 <= 1").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: v1 + v2 = 1").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: v1 + v2 >= 10").0, ParsedLine::Ignored);
    }

    #[test]
    fn non_unit_coefficients_are_ignored() {
        assert_eq!(parse("c0: 2 v1 + v2 >= 1").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: v1 - v2 >= 1").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: -v1 + v2 >= 1").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: x1 + v2 >= 1").0, ParsedLine::Ignored);
    }

    #[test]
    fn structurally_broken_lines_are_ignored() {
        assert_eq!(parse(">= 1").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: >= 1").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: v1 + >= 1").0, ParsedLine::Ignored);
        assert_eq!(parse("c0: v1 v2 >= 1").0, ParsedLine::Ignored);
        assert_eq!(parse("").0, ParsedLine::Ignored);
    }

    #[test]
    fn malformed_element_token_is_skipped() {
        let (parsed, malformed) = parse("c3: v1 + vx + v2 >= 1");
        assert_eq!(ids(&parsed), vec![1, 2]);
        assert_eq!(
            malformed,
            vec![MalformedInstanceLine {
                line: 1,
                token: "vx".to_owned(),
            }]
        );
    }

    #[test]
    fn line_with_only_malformed_tokens_is_discarded() {
        let (parsed, malformed) = parse("c3: v + v99999999999 >= 1");
        assert_eq!(parsed, ParsedLine::Ignored);
        assert_eq!(malformed.len(), 2);
    }

    #[test]
    fn malformed_token_on_non_qualifying_line_is_not_reported() {
        let (parsed, malformed) = parse("c3: vx + 3 v2 >= 1");
        assert_eq!(parsed, ParsedLine::Ignored);
        assert!(malformed.is_empty());
    }

    #[test]
    fn duplicate_elements_collapse() {
        assert_eq!(ids(&parse("v2 + v2 + v1 >= 1").0), vec![1, 2]);
    }

    #[test]
    fn custom_marker() {
        let mut malformed = Vec::new();
        let parsed = InstanceParser::with_marker('x').parse_line(1, "x1 + x2 >= 1", &mut malformed);
        assert_eq!(ids(&parsed), vec![1, 2]);

        let parsed = InstanceParser::with_marker('x').parse_line(1, "v1 + v2 >= 1", &mut malformed);
        assert_eq!(parsed, ParsedLine::Ignored);
    }

    #[test]
    fn default_marker() {
        let parser = InstanceParser::default();
        assert_eq!(parser.variable_marker(), DEFAULT_VARIABLE_MARKER);
        assert_eq!(ids(&parse("v2 + v1 >= 1").0), vec![1, 2]);
    }
}
