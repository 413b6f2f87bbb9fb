//! # Lexer - tokenizing article markup
//!
//! Article bodies arrive as HTML fragments. This module breaks them into a flat
//! token stream using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input appears in exactly one token. Nothing is skipped,
//! so slicing the source by token spans and concatenating gives back the input:
//!
//! ```
//! use statex_content_engine::markup::lexer::lex;
//!
//! let input = "<h2 class=\"x\">Intro</h2>\n<p>a < b</p>";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Raw text
//!
//! `<script>` and friends contain text that must not be tokenized as markup.
//! The lexer cannot know that on its own, so [`Tokens::raw_text_until`] lets the
//! tree builder jump over such bodies and restart lexing after them.

use logos::{Lexer, Logos};
use std::ops::Range;

/// How a start tag was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEnd {
    /// `<div ...>`
    Open,
    /// `<br/>`
    SelfClosing,
    /// Input ended before the closing `>`.
    Unterminated,
}

/// Token kinds produced by the Logos lexer.
///
/// Tags are matched by their opening bytes; callbacks then consume the rest
/// of the tag so that quoted attribute values may contain `>`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name ...>` including attributes
    #[regex(r"<[A-Za-z][^\t\n\f\r />]*", start_tag)]
    StartTag(TagEnd),

    /// `</name>`
    #[regex(r"</[A-Za-z][^>]*>?")]
    EndTag,

    /// `<!-- ... -->`
    #[token("<!--", comment)]
    Comment,

    /// `<!DOCTYPE ...>`, `<![CDATA[...]>` and other bogus declarations
    #[token("<!", declaration)]
    Declaration,

    /// `<?xml ...?>`
    #[token("<?", declaration)]
    ProcessingInstruction,

    /// Character data between tags
    #[regex(r"[^<]+")]
    Text,

    /// A `<` that does not open any construct; treated as text
    #[token("<")]
    StrayLt,
}

impl TokenKind {
    /// Whether this token carries character data.
    pub fn is_text(self) -> bool {
        matches!(self, TokenKind::Text | TokenKind::StrayLt)
    }
}

fn start_tag(lex: &mut Lexer<'_, TokenKind>) -> TagEnd {
    let rest = lex.remainder();
    let mut quote: Option<char> = None;
    let mut after_equals = false;

    for (i, c) in rest.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' if after_equals => quote = Some(c),
            '>' => {
                let self_closing = rest[..i].ends_with('/');
                lex.bump(i + 1);
                return if self_closing {
                    TagEnd::SelfClosing
                } else {
                    TagEnd::Open
                };
            }
            _ => {}
        }
        if !c.is_ascii_whitespace() {
            after_equals = c == '=';
        }
    }

    lex.bump(rest.len());
    TagEnd::Unterminated
}

fn comment(lex: &mut Lexer<'_, TokenKind>) {
    let rest = lex.remainder();
    // `<!-->` and `<!--->` are complete (empty) comments
    let len = if rest.starts_with('>') {
        1
    } else if rest.starts_with("->") {
        2
    } else {
        rest.find("-->").map_or(rest.len(), |i| i + 3)
    };
    lex.bump(len);
}

fn declaration(lex: &mut Lexer<'_, TokenKind>) {
    let rest = lex.remainder();
    let len = rest.find('>').map_or(rest.len(), |i| i + 1);
    lex.bump(len);
}

/// A lexed token with its kind, text slice and byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

impl Token<'_> {
    /// Lowercased tag name for start and end tags, `None` otherwise.
    pub fn tag_name(&self) -> Option<String> {
        let name = match self.kind {
            TokenKind::StartTag(_) => &self.text[1..],
            TokenKind::EndTag => &self.text[2..],
            _ => return None,
        };
        let end = name
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .unwrap_or(name.len());
        Some(name[..end].to_ascii_lowercase())
    }
}

/// Streaming token source over a markup string.
///
/// Wraps a Logos lexer and tracks the byte offset of the current lexer so that
/// lexing can restart after a raw text body.
pub struct Tokens<'a> {
    source: &'a str,
    offset: usize,
    inner: Lexer<'a, TokenKind>,
}

impl<'a> Tokens<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            inner: TokenKind::lexer(source),
        }
    }

    /// Consume everything up to (not including) the `</tag` that closes a raw
    /// text element, returning the byte range of the raw body.
    ///
    /// Runs to end of input when no end tag exists.
    pub fn raw_text_until(&mut self, tag: &str) -> Range<usize> {
        let start = self.offset + self.inner.span().end;
        let end = find_end_tag(&self.source[start..], tag).map_or(self.source.len(), |i| start + i);
        self.offset = end;
        self.inner = TokenKind::lexer(&self.source[end..]);
        start..end
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let local = self.inner.span();
        let span = local.start + self.offset..local.end + self.offset;
        // Logos error means an unrecognized byte - treat as text
        let kind = result.unwrap_or(TokenKind::Text);
        Some(Token {
            kind,
            text: &self.source[span.clone()],
            span,
        })
    }
}

/// Case-insensitive search for the end tag `</tag` followed by a tag boundary.
fn find_end_tag(haystack: &str, tag: &str) -> Option<usize> {
    let name_end = tag.len() + 2;
    haystack.match_indices("</").map(|(i, _)| i).find(|&i| {
        haystack
            .get(i + 2..i + name_end)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            && haystack[i + name_end..]
                .chars()
                .next()
                .is_none_or(|c| c == '>' || c == '/' || c.is_ascii_whitespace())
    })
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    Tokens::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_element() {
        assert_eq!(
            kinds("<p>x</p>"),
            vec![
                TokenKind::StartTag(TagEnd::Open),
                TokenKind::Text,
                TokenKind::EndTag
            ]
        );
    }

    #[test]
    fn test_quoted_attribute_may_contain_gt() {
        let tokens = lex(r#"<a title="a > b" href='x'>link</a>"#);
        assert_eq!(tokens[0].text, r#"<a title="a > b" href='x'>"#);
        assert_eq!(tokens[1].text, "link");
    }

    #[test]
    fn test_apostrophe_in_unquoted_value_is_not_a_quote() {
        let tokens = lex("<p data-x=it's>y</p>");
        assert_eq!(tokens[0].text, "<p data-x=it's>");
        assert_eq!(tokens[1].text, "y");
    }

    #[rstest]
    #[case("<br/>", TagEnd::SelfClosing)]
    #[case("<img src=\"a.png\" />", TagEnd::SelfClosing)]
    #[case("<div>", TagEnd::Open)]
    #[case("<div class=\"unfinished", TagEnd::Unterminated)]
    fn test_start_tag_termination(#[case] input: &str, #[case] expected: TagEnd) {
        let tokens = lex(input);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::StartTag(expected));
    }

    #[rstest]
    #[case("<!-- note -->", TokenKind::Comment)]
    #[case("<!-->", TokenKind::Comment)]
    #[case("<!DOCTYPE html>", TokenKind::Declaration)]
    #[case("<?xml version=\"1.0\"?>", TokenKind::ProcessingInstruction)]
    fn test_non_element_constructs(#[case] input: &str, #[case] expected: TokenKind) {
        assert_eq!(kinds(input), vec![expected]);
    }

    #[test]
    fn test_comment_containing_gt() {
        let tokens = lex("<!-- a > b --><p>");
        assert_eq!(tokens[0].text, "<!-- a > b -->");
        assert_eq!(tokens[1].kind, TokenKind::StartTag(TagEnd::Open));
    }

    #[test]
    fn test_stray_lt_is_text() {
        let tokens = lex("a < b");
        assert!(tokens.iter().all(|t| t.kind.is_text()));
    }

    #[test]
    fn test_tag_names_are_lowercased() {
        let tokens = lex("<H2 id=x>T</H2>");
        assert_eq!(tokens[0].tag_name().as_deref(), Some("h2"));
        assert_eq!(tokens[2].tag_name().as_deref(), Some("h2"));
        assert_eq!(tokens[1].tag_name(), None);
    }

    #[test]
    fn test_raw_text_skips_markup_like_content() {
        let input = "<script>if (a<b && c=\">\") {}</script><p>after</p>";
        let mut tokens = Tokens::new(input);
        let open = tokens.next().unwrap();
        assert_eq!(open.tag_name().as_deref(), Some("script"));

        let body = tokens.raw_text_until("script");
        assert_eq!(&input[body], "if (a<b && c=\">\") {}");

        let rest: Vec<_> = tokens.map(|t| t.text).collect();
        assert_eq!(rest, vec!["</script>", "<p>", "after", "</p>"]);
    }

    #[test]
    fn test_raw_text_without_end_tag_runs_to_eof() {
        let input = "<style>p { color: red }";
        let mut tokens = Tokens::new(input);
        tokens.next();
        let body = tokens.raw_text_until("style");
        assert_eq!(&input[body], "p { color: red }");
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_lossless_spans() {
        let input = "<!doctype html><h2>A &amp; B</h2>\n<p>x<br>y</p><!-- c --></stray>";
        let tokens = lex(input);
        let mut pos = 0;
        for token in &tokens {
            assert_eq!(token.span.start, pos);
            assert_eq!(&input[token.span.clone()], token.text);
            pos = token.span.end;
        }
        assert_eq!(pos, input.len());
    }
}
