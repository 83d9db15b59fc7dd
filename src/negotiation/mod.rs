//! Content negotiation
//!
//! Picks one of the four [`Representation`]s from the client's ordered media
//! type preferences. Plain text is the guaranteed fallback.

use std::cmp::Ordering;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const JSON_TYPES: &[&str] = &["text/json", "application/json", "application/x-json"];
const XML_TYPES: &[&str] = &["text/xml", "application/xml", "application/x-xml"];
const HTML_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];
const TEXT_TYPES: &[&str] = &["text/plain"];

/// Output format of an exception response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Representation {
    Json,
    Xml,
    Html,
    Text,
}

impl Representation {
    /// Media types recognized as this representation
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Representation::Json => JSON_TYPES,
            Representation::Xml => XML_TYPES,
            Representation::Html => HTML_TYPES,
            Representation::Text => TEXT_TYPES,
        }
    }

    /// Recognize a single media type, `None` when it is not a known candidate
    pub fn recognize(media_type: &str) -> Option<Self> {
        let media_type = media_type.trim().to_ascii_lowercase();
        Representation::iter()
            .find(|representation| representation.candidates().contains(&media_type.as_str()))
    }
}

/// Outcome of negotiation: the representation and the media type to announce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    pub representation: Representation,
    pub media_type: String,
}

impl Negotiated {
    pub fn text() -> Self {
        Self {
            representation: Representation::Text,
            media_type: TEXT_TYPES[0].to_string(),
        }
    }

    /// Value for the `Content-Type` response header
    pub fn content_type(&self) -> String {
        format!("{}; charset=utf-8", self.media_type)
    }
}

/// Select a representation from preferences ordered most-preferred first.
///
/// The first preference that is a known candidate wins. Unknown types and
/// wildcard ranges never match, so an empty or unrecognized list yields text.
pub fn negotiate<S: AsRef<str>>(preferences: &[S]) -> Negotiated {
    preferences
        .iter()
        .find_map(|preference| {
            let media_type = preference.as_ref().trim().to_ascii_lowercase();
            Representation::recognize(&media_type).map(|representation| Negotiated {
                representation,
                media_type,
            })
        })
        .unwrap_or_else(Negotiated::text)
}

/// Parse an `Accept` header into media types ordered by preference.
///
/// Entries are sorted by their `q` weight (default 1), ties keep header order,
/// and `q=0` entries are dropped. Other parameters are ignored.
pub fn parse_accept(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let media_type = parts.next()?.trim().to_ascii_lowercase();
            if media_type.is_empty() {
                return None;
            }

            let quality = parts
                .filter_map(|param| {
                    let (key, value) = param.split_once('=')?;
                    (key.trim() == "q").then(|| value.trim().parse::<f32>().ok())?
                })
                .next()
                .unwrap_or(1.0);

            (quality > 0.0).then_some((media_type, quality))
        })
        .collect();

    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    weighted.into_iter().map(|(media_type, _)| media_type).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognizes_every_candidate() {
        for media_type in ["text/json", "application/json", "application/x-json"] {
            assert_eq!(negotiate(&[media_type]).representation, Representation::Json);
        }
        for media_type in ["text/xml", "application/xml", "application/x-xml"] {
            assert_eq!(negotiate(&[media_type]).representation, Representation::Xml);
        }
        for media_type in ["text/html", "application/xhtml+xml"] {
            assert_eq!(negotiate(&[media_type]).representation, Representation::Html);
        }
    }

    #[test]
    fn test_candidate_sets_are_disjoint() {
        for representation in Representation::iter() {
            for media_type in representation.candidates() {
                assert_eq!(Representation::recognize(media_type), Some(representation));
            }
        }
        assert_eq!(Representation::recognize(" Application/JSON "), Some(Representation::Json));
        assert_eq!(Representation::recognize("image/png"), None);
    }

    #[test]
    fn test_keeps_matched_media_type() {
        let negotiated = negotiate(&["text/xml"]);
        assert_eq!(negotiated.content_type(), "text/xml; charset=utf-8");
    }

    #[test]
    fn test_unknown_falls_back_to_text() {
        let negotiated = negotiate(&["text/unknown"]);
        assert_eq!(negotiated, Negotiated::text());
        assert_eq!(negotiated.content_type(), "text/plain; charset=utf-8");

        let empty: [&str; 0] = [];
        assert_eq!(negotiate(&empty), Negotiated::text());
        assert_eq!(negotiate(&["*/*"]), Negotiated::text());
    }

    #[test]
    fn test_first_known_preference_wins() {
        let negotiated = negotiate(&["image/png", "application/xml", "application/json"]);
        assert_eq!(negotiated.representation, Representation::Xml);

        let negotiated = negotiate(&["text/plain", "application/json"]);
        assert_eq!(negotiated.representation, Representation::Text);
    }

    #[test]
    fn test_parse_accept_orders_by_quality() {
        let preferences =
            parse_accept("text/html;q=0.8, application/json, application/xml;q=0.9, */*;q=0.1");
        assert_eq!(
            preferences,
            vec!["application/json", "application/xml", "text/html", "*/*"]
        );
    }

    #[test]
    fn test_parse_accept_drops_rejected_and_empty() {
        let preferences = parse_accept("Application/JSON;q=0, ,text/plain;charset=utf-8");
        assert_eq!(preferences, vec!["text/plain"]);
    }
}
