//! Page URL and fragment handling

use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use url::Url;

use crate::Result;

/// The page URL. Fragments are compared in decoded form: `Url` stores them
/// percent-encoded while element ids and hrefs carry the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
    fragment: Option<String>,
}

impl Location {
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input)?;
        let fragment = decoded_fragment(&url);
        Ok(Self { url, fragment })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Current fragment without the leading `#`; `None` when empty.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The fragment as `location.hash` reports it: `#id` or an empty string.
    pub fn hash(&self) -> String {
        self.fragment()
            .map(|f| format!("#{f}"))
            .unwrap_or_default()
    }

    /// Point the URL at a new fragment. Returns false when nothing changed, in
    /// which case no fragment-change notification should follow.
    pub fn set_fragment(&mut self, fragment: &str) -> bool {
        let fragment = fragment.trim_start_matches('#');
        if self.fragment().unwrap_or_default() == fragment {
            return false;
        }

        let before = self.fragment.take();
        self.url
            .set_fragment(if fragment.is_empty() { None } else { Some(fragment) });
        self.fragment = decoded_fragment(&self.url);

        // `a%20b` and `a b` name the same fragment.
        before != self.fragment
    }
}

fn decoded_fragment(url: &Url) -> Option<String> {
    url.fragment()
        .filter(|f| !f.is_empty())
        .map(|f| percent_decode_str(f).decode_utf8_lossy().into_owned())
}

/// Decoded text after the first `#` of an href, relative or absolute.
pub fn fragment_of(href: &str) -> Option<Cow<'_, str>> {
    href.split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|f| !f.is_empty())
        .map(|f| percent_decode_str(f).decode_utf8_lossy())
}
