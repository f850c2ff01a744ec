// Page-embedded configuration.
//
// A page can carry its site key and endpoint as
// `<meta name="seriph-site-key" content="...">` and
// `<meta name="seriph-endpoint" content="...">`.

use scraper::{Html, Selector};

pub const SITE_KEY_META: &str = "seriph-site-key";
pub const ENDPOINT_META: &str = "seriph-endpoint";

/// Values discovered in an ambient source. Blank values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaConfig {
    pub site_key: Option<String>,
    pub endpoint: Option<String>,
}

impl MetaConfig {
    pub fn is_empty(&self) -> bool {
        self.site_key.is_none() && self.endpoint.is_none()
    }
}

/// Ambient configuration source consulted when explicit values are missing.
pub trait MetaConfigReader {
    /// `None` when the source is unavailable or carries nothing.
    fn read(&self) -> Option<MetaConfig>;
}

/// Reads Seriph `<meta>` tags from an HTML document.
#[derive(Debug, Clone)]
pub struct HtmlMetaReader {
    html: String,
}

impl HtmlMetaReader {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl MetaConfigReader for HtmlMetaReader {
    fn read(&self) -> Option<MetaConfig> {
        let document = Html::parse_document(&self.html);
        let selector = Selector::parse("meta[name][content]").ok()?;

        let mut meta = MetaConfig::default();
        for element in document.select(&selector) {
            let el = element.value();
            let (Some(name), Some(content)) = (el.attr("name"), el.attr("content")) else {
                continue;
            };
            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            // First occurrence wins.
            let slot = match name {
                SITE_KEY_META => &mut meta.site_key,
                ENDPOINT_META => &mut meta.endpoint,
                _ => continue,
            };
            slot.get_or_insert_with(|| content.to_owned());
        }

        (!meta.is_empty()).then_some(meta)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_both_tags_from_head() {
        let reader = HtmlMetaReader::new(
            r#"<!doctype html><html><head>
                <meta charset="utf-8">
                <meta name="seriph-site-key" content="  site_123 ">
                <meta name="seriph-endpoint" content="https://self.hosted">
            </head><body></body></html>"#,
        );
        assert_eq!(
            reader.read(),
            Some(MetaConfig {
                site_key: Some("site_123".into()),
                endpoint: Some("https://self.hosted".into()),
            })
        );
    }

    #[test]
    fn blank_or_missing_tags_yield_none() {
        let reader = HtmlMetaReader::new(
            r#"<html><head><meta name="seriph-site-key" content="   "></head></html>"#,
        );
        assert_eq!(reader.read(), None);
        assert_eq!(HtmlMetaReader::new("<p>hello</p>").read(), None);
    }

    #[test]
    fn first_tag_wins() {
        let reader = HtmlMetaReader::new(
            r#"<meta name="seriph-site-key" content="a"><meta name="seriph-site-key" content="b">"#,
        );
        assert_eq!(reader.read().and_then(|m| m.site_key), Some("a".into()));
    }
}
