//! Minimal feed document writer.
//!
//! Drives registered feed extensions the way a host feed pipeline does:
//! namespace callbacks once inside the root start tag, item callbacks once
//! per item inside `<item>`/`<entry>`.

use crate::extension::feed_registry::FeedExtensionRegistry;
use crate::feed::escape::escape_feed_text;
use crate::feed::FeedDialect;
use crate::model::content::ContentItem;
use log::debug;
use std::fmt::Write;

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RSS1_NAMESPACE: &str = "http://purl.org/rss/1.0/";

/// Channel-level metadata of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedChannel {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl FeedChannel {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: String::new(),
        }
    }
}

/// Writes a complete feed document for `items`.
pub fn write_feed(
    dialect: FeedDialect,
    channel: &FeedChannel,
    items: &[ContentItem],
    extensions: &FeedExtensionRegistry<'_>,
) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails.
    let _ = write_document(&mut out, dialect, channel, items, extensions);
    debug!(
        "event=feed_write module=feed status=ok dialect={dialect} items={} bytes={}",
        items.len(),
        out.len()
    );
    out
}

fn write_document(
    out: &mut String,
    dialect: FeedDialect,
    channel: &FeedChannel,
    items: &[ContentItem],
    extensions: &FeedExtensionRegistry<'_>,
) -> std::fmt::Result {
    let ns = extensions.namespace_fragment(dialect);
    let title = escape_feed_text(&channel.title);
    let link = escape_feed_text(&channel.link);
    let description = escape_feed_text(&channel.description);

    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    match dialect {
        FeedDialect::Rss | FeedDialect::Rss2 => {
            let version = if dialect == FeedDialect::Rss {
                "0.92"
            } else {
                "2.0"
            };
            writeln!(out, "<rss version=\"{version}\" {ns}>")?;
            writeln!(out, "<channel>")?;
            writeln!(out, "\t<title>{title}</title>")?;
            writeln!(out, "\t<link>{link}</link>")?;
            writeln!(out, "\t<description>{description}</description>")?;
            for item in items {
                writeln!(out, "\t<item>")?;
                writeln!(out, "\t<title>{}</title>", escape_feed_text(&item.title))?;
                if dialect == FeedDialect::Rss2 {
                    writeln!(out, "\t<guid isPermaLink=\"false\">urn:uuid:{}</guid>", item.id)?;
                }
                out.push_str(&extensions.item_fragment(dialect, item.id));
                writeln!(out, "\t</item>")?;
            }
            writeln!(out, "</channel>")?;
            writeln!(out, "</rss>")?;
        }
        FeedDialect::Atom => {
            writeln!(out, "<feed xmlns=\"{ATOM_NAMESPACE}\" {ns}>")?;
            writeln!(out, "\t<title>{title}</title>")?;
            writeln!(out, "\t<link href=\"{link}\" />")?;
            writeln!(out, "\t<id>{link}</id>")?;
            for item in items {
                writeln!(out, "\t<entry>")?;
                writeln!(out, "\t<title>{}</title>", escape_feed_text(&item.title))?;
                writeln!(out, "\t<id>urn:uuid:{}</id>", item.id)?;
                out.push_str(&extensions.item_fragment(dialect, item.id));
                writeln!(out, "\t</entry>")?;
            }
            writeln!(out, "</feed>")?;
        }
        FeedDialect::Rdf => {
            writeln!(
                out,
                "<rdf:RDF xmlns:rdf=\"{RDF_NAMESPACE}\" xmlns=\"{RSS1_NAMESPACE}\" {ns}>"
            )?;
            writeln!(out, "<channel rdf:about=\"{link}\">")?;
            writeln!(out, "\t<title>{title}</title>")?;
            writeln!(out, "\t<link>{link}</link>")?;
            writeln!(out, "\t<description>{description}</description>")?;
            writeln!(out, "</channel>")?;
            for item in items {
                writeln!(out, "<item rdf:about=\"urn:uuid:{}\">", item.id)?;
                writeln!(out, "\t<title>{}</title>", escape_feed_text(&item.title))?;
                out.push_str(&extensions.item_fragment(dialect, item.id));
                writeln!(out, "</item>")?;
            }
            writeln!(out, "</rdf:RDF>")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_feed, FeedChannel};
    use crate::extension::feed_registry::FeedExtensionRegistry;
    use crate::feed::FeedDialect;
    use crate::model::content::{ContentItem, ContentKind};

    #[test]
    fn empty_registry_writes_bare_feed() {
        let registry = FeedExtensionRegistry::new();
        let channel = FeedChannel::new("Field notes", "https://example.org/");
        let items = [ContentItem::new(ContentKind::Post, "Lake <Harriet>")];

        let xml = write_feed(FeedDialect::Rss2, &channel, &items, &registry);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\" >"));
        assert!(xml.contains("<title>Lake &#60;Harriet&#62;</title>"));
        assert!(!xml.contains("georss"));
    }

    #[test]
    fn each_dialect_uses_its_root_element() {
        let registry = FeedExtensionRegistry::new();
        let channel = FeedChannel::new("t", "https://example.org/");
        let roots = [
            (FeedDialect::Rss, "<rss version=\"0.92\""),
            (FeedDialect::Rss2, "<rss version=\"2.0\""),
            (FeedDialect::Atom, "<feed xmlns=\"http://www.w3.org/2005/Atom\""),
            (FeedDialect::Rdf, "<rdf:RDF "),
        ];
        for (dialect, root) in roots {
            let xml = write_feed(dialect, &channel, &[], &registry);
            assert!(xml.contains(root), "{dialect}: {xml}");
        }
    }
}
