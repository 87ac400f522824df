//! Assembly of tokens into generic directives.
//!
//! [`parse`] drives the [`Tokenizer`] through a two-state machine (reading a
//! name, then reading a value) and yields one [`Directive`] per directive in
//! the input. Like the tokenizer it is total: it tries its best to form
//! directives even from non RFC 9111 compliant inputs.
//!
//! Notably a directive like `directive1=value "with" space,directive2` will
//! parse the first directive with the value `value "with" space`.

use std::borrow::Cow;

use crate::token::{TokenKind, Tokenizer, tokenize};

/// A single Cache-Control directive with optional value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Name of the directive. May be empty only if `has_value` is true.
    pub name: Cow<'a, str>,

    /// Value of the directive, if any. May be empty. Check `has_value` to
    /// differentiate between an empty and no value.
    pub value: Cow<'a, str>,

    /// True if a value is set, i.e. the directive contained an `=`.
    pub has_value: bool,
}

/// Parses the given Cache-Control value into a lazy sequence of directives.
///
/// Empty segments between commas are skipped. Whitespace around names and
/// values is dropped, and internal whitespace runs collapse to a single
/// space. An `=` inside a value (as in `a==b`) is kept as data.
pub fn parse(input: &str) -> DirectiveParser<'_> {
    DirectiveParser {
        tokens: tokenize(input),
        done: false,
    }
}

/// Iterator over the directives of a Cache-Control value. Created by [`parse`].
#[derive(Debug, Clone)]
pub struct DirectiveParser<'a> {
    tokens: Tokenizer<'a>,
    done: bool,
}

impl<'a> Iterator for DirectiveParser<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Directive<'a>> {
        if self.done {
            return None;
        }

        let mut name: Cow<'a, str> = Cow::Borrowed("");
        let mut value: Cow<'a, str> = Cow::Borrowed("");
        let mut in_value = false;
        let mut pending_space = false;

        for token in self.tokens.by_ref() {
            match token.kind {
                TokenKind::Comma => {
                    if !in_value && name.is_empty() {
                        // Empty segment between commas.
                        pending_space = false;
                        continue;
                    }
                    return Some(Directive {
                        name,
                        value,
                        has_value: in_value,
                    });
                }
                TokenKind::Equals if !in_value => {
                    in_value = true;
                    pending_space = false;
                }
                TokenKind::Equals => {
                    append(&mut value, Cow::Borrowed("="), pending_space);
                    pending_space = false;
                }
                TokenKind::Space => pending_space = true,
                TokenKind::Text => {
                    let target = if in_value { &mut value } else { &mut name };
                    append(target, token.text, pending_space);
                    pending_space = false;
                }
            }
        }

        self.done = true;

        if !in_value && name.is_empty() {
            return None;
        }

        Some(Directive {
            name,
            value,
            has_value: in_value,
        })
    }
}

/// Appends `text` to the accumulator, inserting one space if the accumulator
/// is non-empty and the previous token was a whitespace run. The first
/// appended piece keeps its borrow; later pieces force an owned buffer.
fn append<'a>(target: &mut Cow<'a, str>, text: Cow<'a, str>, pending_space: bool) {
    if target.is_empty() {
        *target = text;
        return;
    }

    let target = target.to_mut();
    if pending_space {
        target.push(' ');
    }
    target.push_str(&text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<Directive<'_>> {
        parse(input).collect()
    }

    fn flag(name: &str) -> Directive<'_> {
        Directive {
            name: Cow::Borrowed(name),
            value: Cow::Borrowed(""),
            has_value: false,
        }
    }

    fn valued<'a>(name: &'a str, value: &'a str) -> Directive<'a> {
        Directive {
            name: Cow::Borrowed(name),
            value: Cow::Borrowed(value),
            has_value: true,
        }
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        assert!(collect("").is_empty());
        assert!(collect(",").is_empty());
        assert!(collect(",,").is_empty());
        assert!(collect("  ").is_empty());
    }

    #[test]
    fn lone_equals_yields_nameless_directive() {
        assert_eq!(collect("="), [valued("", "")]);
        assert_eq!(collect("=="), [valued("", "=")]);
    }

    #[test]
    fn single_directive() {
        assert_eq!(collect("private"), [flag("private")]);
    }

    #[test]
    fn quoted_directive_name() {
        assert_eq!(collect(r#""private""#), [flag("private")]);
    }

    #[test]
    fn broken_quoted_name_keeps_the_quote() {
        assert_eq!(collect(r#""private"#), [flag("\"private")]);
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert_eq!(collect("private,"), [flag("private")]);
        assert_eq!(collect(",private"), [flag("private")]);
        assert_eq!(collect(",private,"), [flag("private")]);
        assert_eq!(collect(",a,,b,"), [flag("a"), flag("b")]);
    }

    #[test]
    fn multiple_directives() {
        assert_eq!(
            collect("private, no-cache, no-store"),
            [flag("private"), flag("no-cache"), flag("no-store")]
        );
    }

    #[test]
    fn well_formed_values() {
        assert_eq!(
            collect("a=1, b=2, c"),
            [valued("a", "1"), valued("b", "2"), flag("c")]
        );
    }

    #[test]
    fn empty_value_is_distinct_from_no_value() {
        assert_eq!(
            collect("private, no-cache, no-store="),
            [flag("private"), flag("no-cache"), valued("no-store", "")]
        );
        assert_eq!(
            collect(r#"private, no-cache, no-store="""#),
            [flag("private"), flag("no-cache"), valued("no-store", "")]
        );
    }

    #[test]
    fn unquoted_value_with_spaces() {
        assert_eq!(
            collect("no-store=header1 header2 header3"),
            [valued("no-store", "header1 header2 header3")]
        );
    }

    #[test]
    fn quoted_value_with_spaces() {
        assert_eq!(
            collect(r#"no-store="header1 header2 header3""#),
            [valued("no-store", "header1 header2 header3")]
        );
    }

    #[test]
    fn broken_quoted_value_keeps_the_quote() {
        assert_eq!(
            collect(r#"no-store="header1 header2 header3"#),
            [valued("no-store", "\"header1 header2 header3")]
        );
    }

    #[test]
    fn spaces_around_directives_are_dropped() {
        assert_eq!(
            collect(r#" private , no-cache , no-store="header1 header2" "#),
            [
                flag("private"),
                flag("no-cache"),
                valued("no-store", "header1 header2"),
            ]
        );
    }

    #[test]
    fn broken_quoted_value_with_trailing_space() {
        assert_eq!(
            collect(r#"directive1, directive2="missing ending quote "#),
            [
                flag("directive1"),
                valued("directive2", "\"missing ending quote"),
            ]
        );
    }

    #[test]
    fn broken_quoted_value_does_not_swallow_later_directives() {
        assert_eq!(
            collect(r#"directive1, directive2="missing ending quote, directive3=value"#),
            [
                flag("directive1"),
                valued("directive2", "\"missing ending quote"),
                valued("directive3", "value"),
            ]
        );
    }

    #[test]
    fn internal_whitespace_collapses_to_one_space() {
        assert_eq!(collect("no store"), [flag("no store")]);
        assert_eq!(collect("no \t store"), [flag("no store")]);
        assert_eq!(collect("no store=header1"), [valued("no store", "header1")]);
    }

    #[test]
    fn equals_inside_value_is_data() {
        assert_eq!(collect("a==b"), [valued("a", "=b")]);
        assert_eq!(collect("a=b=c"), [valued("a", "b=c")]);
    }

    #[test]
    fn consumers_may_stop_early() {
        let mut directives = parse("a=1, b=2, c=3");
        assert_eq!(directives.next(), Some(valued("a", "1")));
        drop(directives);
    }
}
