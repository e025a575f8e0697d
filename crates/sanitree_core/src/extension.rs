//! Named sets of whitelisted elements.

use serde::{Deserialize, Serialize};

/// A fixed, named set of elements accepted without attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    /// Text-level semantics and block structure of everyday markup.
    Basic,
    /// Less common phrasing elements, including ruby annotations.
    Extra,
}

impl Extension {
    /// Returns the extension's name as used in configuration files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Extension::Basic => "basic",
            Extension::Extra => "extra",
        }
    }

    /// Elements whose children are kept inside them, in registration order.
    pub const fn elements(&self) -> &'static [&'static str] {
        match self {
            Extension::Basic => &[
                "blockquote",
                "div",
                "p",
                "span",
                "h1",
                "h2",
                "h3",
                "h4",
                "h5",
                "h6",
                "ul",
                "ol",
                "li",
                "b",
                "strong",
                "i",
                "em",
                "u",
                "s",
                "del",
                "sub",
                "sup",
                "code",
                "pre",
            ],
            Extension::Extra => &[
                "abbr", "cite", "dfn", "kbd", "mark", "q", "ruby", "rp", "rt", "samp", "small",
                "time", "var",
            ],
        }
    }

    /// Elements without content, in registration order.
    pub const fn void_elements(&self) -> &'static [&'static str] {
        match self {
            Extension::Basic => &["br", "hr"],
            Extension::Extra => &["wbr"],
        }
    }
}
