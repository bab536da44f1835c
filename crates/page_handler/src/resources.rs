//! Sub-resources a page pulls in before styling: stylesheet text and the
//! document title.

use html::Document;
use log::{debug, warn};
use net::{Fetch, Url};

/// Every `<style>` body in document order, then each linked stylesheet.
///
/// Unreachable or unresolvable stylesheets are skipped. Blank chunks are
/// dropped before joining so rule numbering stays continuous.
pub fn collect_css(doc: &Document, base: &Url, fetcher: &dyn Fetch) -> String {
    let inline = doc
        .elements_by_tag("style")
        .map(|style| doc.text_content(style))
        .collect::<Vec<_>>()
        .join("\n");

    let mut chunks = vec![inline];
    for href in stylesheet_links(doc) {
        let css_url = match base.resolve(&href) {
            Ok(url) => url,
            Err(err) => {
                warn!("Skipping stylesheet {href}: {err}");
                continue;
            }
        };
        match fetcher.fetch(&css_url) {
            Ok(response) => chunks.push(response.text()),
            Err(err) => warn!("Skipping stylesheet {css_url}: {err}"),
        }
    }

    let css = chunks
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    debug!("Collected {} bytes of CSS", css.len());
    css
}

/// `href`s of `<link>` elements whose `rel` mentions `stylesheet`.
pub fn stylesheet_links(doc: &Document) -> Vec<String> {
    doc.elements_by_tag("link")
        .filter_map(|link| {
            let rel = doc.attr(link, "rel").unwrap_or_default().to_lowercase();
            let href = doc.attr(link, "href").unwrap_or_default().trim();
            (rel.contains("stylesheet") && !href.is_empty()).then(|| href.to_owned())
        })
        .collect()
}

/// Text of the first `<title>` with visible content, if any.
pub fn extract_title(doc: &Document) -> Option<String> {
    doc.elements_by_tag("title")
        .map(|title| doc.text_content(title).trim().to_owned())
        .find(|title| !title.is_empty())
}
