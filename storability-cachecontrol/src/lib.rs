#![warn(missing_docs)]
//! # storability-cachecontrol
//!
//! Tokenization and parsing of `Cache-Control` header directives based on a
//! relaxed reading of RFC 9111, similar to the implementations in major web
//! browser engines.
//!
//! This crate is the grammar layer of the `storability` workspace: it knows
//! nothing about HTTP caching semantics. It turns a raw directive-list string
//! into a lazy sequence of tokens ([`tokenize`]) and assembles those tokens
//! into generic `(name, value, has_value)` directives ([`parse`]). Both
//! operations are total: malformed input (unterminated quoted strings, stray
//! delimiters, embedded control characters) degrades to best-effort output
//! rather than an error.
//!
//! ## Example
//!
//! ```
//! use storability_cachecontrol::parse;
//!
//! let directives: Vec<_> = parse(r#"private, no-store="Set-Cookie""#).collect();
//!
//! assert_eq!(directives[0].name, "private");
//! assert!(!directives[0].has_value);
//! assert_eq!(directives[1].name, "no-store");
//! assert_eq!(directives[1].value, "Set-Cookie");
//! ```

pub mod directive;
pub mod token;

pub use directive::{Directive, DirectiveParser, parse};
pub use token::{Token, TokenKind, Tokenizer, tokenize};
