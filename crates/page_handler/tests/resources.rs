mod common;

use common::{MemoryFetcher, VIEWPORT, init_logs, png_bytes, tab_on};
use image::RgbaImage;
use layouter::FixedWidthMetrics;
use net::{HttpClient, Url};
use page_handler::{ImageCache, ImageDecoder, Tab, collect_css, decode_builtin, stylesheet_links};
use renderer::{DisplayItem, DisplayList, RecordingTarget};
use std::fs;
use std::rc::Rc;

fn text_colors(list: &DisplayList) -> Vec<(&str, [f32; 4])> {
    list.iter()
        .filter_map(|item| match item {
            DisplayItem::Text { text, color, .. } => Some((text.as_str(), *color)),
            DisplayItem::Rect { .. } | DisplayItem::Image { .. } => None,
        })
        .collect()
}

#[test]
fn css_is_collected_in_document_order() {
    init_logs();
    let fetcher = MemoryFetcher::new();
    fetcher.serve("http://site.test/css/site.css", "p { color: blue }");
    fetcher.serve("http://site.test/blank.css", "   \n");
    let doc = html::parse(concat!(
        "<style>p { color: red }</style>",
        r#"<link rel="Alternate Stylesheet" href="css/site.css">"#,
        r#"<link rel="stylesheet" href="/missing.css">"#,
        r#"<link rel="stylesheet" href="/blank.css">"#,
        r#"<link rel="icon" href="/favicon.css">"#,
        r#"<link rel="stylesheet" href="  ">"#,
        "<style>em { color: green }</style>",
    ));
    let base = Url::parse("http://site.test/index.html").unwrap();

    assert_eq!(
        stylesheet_links(&doc),
        ["css/site.css", "/missing.css", "/blank.css"]
    );
    assert_eq!(
        collect_css(&doc, &base, &*fetcher),
        "p { color: red }\nem { color: green }\n\np { color: blue }"
    );
    assert_eq!(fetcher.requests_for("http://site.test/missing.css"), 1);
    assert_eq!(fetcher.requests_for("http://site.test/favicon.css"), 0);
}

#[test]
fn linked_stylesheets_cascade_after_inline_blocks() {
    init_logs();
    let fetcher = MemoryFetcher::new();
    fetcher.serve(
        "http://site.test/",
        r#"<link rel="stylesheet" href="late.css"><style>p { color: red }</style><p>text</p>"#,
    );
    fetcher.serve("http://site.test/late.css", "p { color: #0000ff }");
    let mut tab = tab_on(&fetcher);
    tab.load("http://site.test/").unwrap();

    let list = tab.display_list().unwrap();
    assert_eq!(text_colors(list), [("text", [0.0, 0.0, 1.0, 1.0])]);
}

#[test]
fn images_are_cached_per_absolute_url() {
    init_logs();
    let fetcher = MemoryFetcher::new();
    fetcher.serve(
        "http://pics.test/gallery/",
        r#"<p><img src="a.png"><img src="/gallery/a.png"><img src="broken.gif"><img src="photo.jpg"></p>"#,
    );
    fetcher.serve("http://pics.test/gallery/a.png", png_bytes(3, 2));
    fetcher.serve("http://pics.test/gallery/broken.gif", "GIF89a but not really");
    fetcher.serve("http://pics.test/gallery/photo.jpg", "not a jpeg");
    let mut tab = tab_on(&fetcher);
    tab.load("http://pics.test/gallery/").unwrap();
    tab.reload().unwrap();

    assert_eq!(fetcher.requests_for("http://pics.test/gallery/a.png"), 1);
    assert_eq!(fetcher.requests_for("http://pics.test/gallery/broken.gif"), 1);
    assert_eq!(fetcher.requests_for("http://pics.test/gallery/photo.jpg"), 1);

    let cache = tab.image_cache();
    assert_eq!(cache.len(), 3);
    assert!(matches!(
        cache.get("http://pics.test/gallery/a.png"),
        Some(Some(handle)) if handle.width() == 3 && handle.height() == 2
    ));
    assert!(matches!(cache.get("http://pics.test/gallery/broken.gif"), Some(None)));
    assert!(matches!(cache.get("http://pics.test/gallery/photo.jpg"), Some(None)));

    let decoded: Vec<bool> = tab
        .display_list()
        .unwrap()
        .iter()
        .filter_map(|item| match item {
            DisplayItem::Image { image, .. } => Some(image.is_some()),
            DisplayItem::Rect { .. } | DisplayItem::Text { .. } => None,
        })
        .collect();
    assert_eq!(decoded, [true, true, false, false]);
}

#[test]
fn pluggable_decoder_handles_other_formats() {
    init_logs();
    let fetcher = MemoryFetcher::new();
    fetcher.serve("http://pics.test/x.raw", "raw pixels");
    fetcher.serve("http://pics.test/bad.png", b"\x89PNG\r\n\x1a\ntruncated".to_vec());
    let decoder: Rc<dyn ImageDecoder> =
        Rc::new(|bytes: &[u8]| (!bytes.is_empty()).then(|| RgbaImage::new(1, 1)));
    let mut cache = ImageCache::new().with_decoder(decoder);

    let raw = Url::parse("http://pics.test/x.raw").unwrap();
    let bad = Url::parse("http://pics.test/bad.png").unwrap();
    assert!(cache.load(&raw, &*fetcher).is_some());
    assert!(cache.load(&bad, &*fetcher).is_none(), "corrupt PNG never reaches the fallback");
    assert!(cache.load(&Url::parse("http://pics.test/gone").unwrap(), &*fetcher).is_none());
    assert_eq!(cache.len(), 3);
}

#[test]
fn builtin_decoder_checks_signatures() {
    assert!(decode_builtin(&png_bytes(1, 1)).is_some());
    assert!(decode_builtin(b"GIF87a").is_none());
    assert!(decode_builtin(b"\xff\xd8\xff\xe0 jpeg").is_none());
}

#[test]
fn file_pages_load_relative_stylesheets() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("index.html"),
        r#"<title>Local</title><link rel="stylesheet" href="style.css"><h1>Hi</h1><a href="other.html">next</a>"#,
    )
    .unwrap();
    fs::write(dir.path().join("style.css"), "h1 { color: rgb(255, 0, 0) }").unwrap();
    fs::write(dir.path().join("other.html"), "<title>Other</title>").unwrap();

    let mut tab = Tab::new(
        Rc::new(HttpClient::new()),
        Rc::new(FixedWidthMetrics::default()),
        VIEWPORT,
    );
    let index = format!("file://{}", dir.path().join("index.html").display());
    tab.load(&index).unwrap();

    assert_eq!(tab.title(), "Local");
    let list = tab.display_list().unwrap();
    assert_eq!(text_colors(list)[0], ("Hi", [1.0, 0.0, 0.0, 1.0]));

    let mut target = RecordingTarget::new(FixedWidthMetrics::default());
    tab.render(&mut target);
    let hit = tab.hit_boxes()[0].bounds;
    assert!(tab.click(hit.x1, hit.y1).unwrap());
    assert_eq!(tab.title(), "Other");
}
