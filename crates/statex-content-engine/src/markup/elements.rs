//! Element classification tables used by the tree builder.

/// Elements that never have content or an end tag.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose body is raw text rather than markup.
const RAW_TEXT: &[&str] = &["script", "style", "textarea", "title"];

/// Start tags that close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "details",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

pub fn is_void(tag: &str) -> bool {
    VOID.contains(&tag)
}

pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT.contains(&tag)
}

/// `h1`..=`h6`, returning the numeric rank.
pub fn heading_rank(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h', n @ b'1'..=b'6'] => Some(n - b'0'),
        _ => None,
    }
}

/// Whether opening `new` implicitly ends the currently open `open` element.
pub fn closes_implicitly(open: &str, new: &str) -> bool {
    match open {
        "p" => CLOSES_PARAGRAPH.contains(&new),
        "li" => new == "li",
        "dt" | "dd" => matches!(new, "dt" | "dd"),
        "option" => matches!(new, "option" | "optgroup"),
        "tr" => new == "tr",
        "td" | "th" => matches!(new, "td" | "th" | "tr"),
        _ => heading_rank(open).is_some() && heading_rank(new).is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("h1", Some(1))]
    #[case("h6", Some(6))]
    #[case("h7", None)]
    #[case("hr", None)]
    #[case("header", None)]
    fn test_heading_rank(#[case] tag: &str, #[case] expected: Option<u8>) {
        assert_eq!(heading_rank(tag), expected);
    }

    #[rstest]
    #[case("p", "h2", true)]
    #[case("p", "div", true)]
    #[case("p", "span", false)]
    #[case("li", "li", true)]
    #[case("li", "ul", false)]
    #[case("td", "tr", true)]
    #[case("h2", "h3", true)]
    #[case("h2", "em", false)]
    #[case("div", "h2", false)]
    fn test_closes_implicitly(#[case] open: &str, #[case] new: &str, #[case] expected: bool) {
        assert_eq!(closes_implicitly(open, new), expected);
    }
}
