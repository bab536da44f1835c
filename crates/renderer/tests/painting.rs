use css::parse_stylesheet;
use html::parse;
use image::RgbaImage;
use layouter::{LayoutEngine, Viewport};
use renderer::{
    BLACK, Bounds, DisplayItem, DisplayList, DrawCommand, ImageHandle, ImageProvider, LINK_BLUE,
    NoImages, Painter, RecordingTarget,
};
use style_engine::StyleEngine;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn twenty_per_char(text: &str, _size: i32) -> i32 {
    text.chars().count() as i32 * 20
}

fn paint_with(markup: &str, css_text: &str, images: &mut dyn ImageProvider) -> DisplayList {
    let doc = parse(markup);
    let sheet = parse_stylesheet(css_text);
    let styled = StyleEngine::new(&sheet).style(&doc);
    let layout = LayoutEngine::new(&doc, &twenty_per_char, Viewport::new(400, 300)).layout(&styled);
    Painter::new(&doc, images).paint(&layout)
}

fn paint(markup: &str, css_text: &str) -> DisplayList {
    paint_with(markup, css_text, &mut NoImages)
}

fn texts(list: &DisplayList) -> Vec<(&str, Option<&str>)> {
    list.iter()
        .filter_map(|item| match item {
            DisplayItem::Text { text, href, .. } => Some((text.as_str(), href.as_deref())),
            DisplayItem::Rect { .. } | DisplayItem::Image { .. } => None,
        })
        .collect()
}

#[test]
fn background_paints_beneath_text() {
    init_logs();
    let list = paint(r#"<div style="background-color: #ff0000">hi</div>"#, "");
    assert_eq!(
        list.items,
        [
            DisplayItem::Rect {
                x: 14,
                y: 14,
                width: 372,
                height: 22,
                fill: [1.0, 0.0, 0.0, 1.0],
            },
            DisplayItem::Text {
                x: 14,
                y: 14,
                text: "hi".into(),
                font_size: 16,
                color: BLACK,
                href: None,
            },
        ]
    );
}

#[test]
fn transparent_backgrounds_emit_nothing() {
    init_logs();
    let list = paint("<p>x</p>", "p {background-color: rgba(0,0,0,0)}");
    assert_eq!(list.len(), 1);
    assert_eq!(texts(&list), [("x", None)]);
}

#[test]
fn background_shorthand_is_a_fallback() {
    init_logs();
    let list = paint(r#"<div style="background: yellow">x</div>"#, "");
    assert!(matches!(
        list.items[0],
        DisplayItem::Rect { fill: [1.0, 1.0, 0.0, 1.0], .. }
    ));
}

#[test]
fn words_inside_anchors_carry_the_href() {
    init_logs();
    let list = paint(r#"<p>go <a href="/next">here <b>now</b></a></p>"#, "a {color: red}");
    assert_eq!(
        texts(&list),
        [("go", None), ("here", Some("/next")), ("now", Some("/next"))]
    );
    let Some(DisplayItem::Text { color, .. }) = list.items.get(1) else {
        panic!("expected text item");
    };
    assert_eq!(*color, [1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn unparsable_text_colour_falls_back_to_black() {
    init_logs();
    let list = paint(r#"<p style="color: blurple">x</p>"#, "");
    assert!(matches!(&list.items[0], DisplayItem::Text { color, .. } if *color == BLACK));
}

#[test]
fn images_are_requested_by_trimmed_src() {
    init_logs();
    let handle = ImageHandle::new(RgbaImage::new(2, 2));
    let mut requested = Vec::new();
    let mut provider = |src: &str| {
        requested.push(src.to_owned());
        Some(handle.clone())
    };
    let list = paint_with(
        r#"<a href="/x"><img src=" pic.png " width=10 height=10></a><img width=5>"#,
        "",
        &mut provider,
    );
    assert_eq!(requested, ["pic.png"]);

    let images: Vec<&DisplayItem> = list
        .iter()
        .filter(|item| matches!(item, DisplayItem::Image { .. }))
        .collect();
    assert_eq!(images.len(), 2);
    assert!(matches!(
        images[0],
        DisplayItem::Image { src, href: Some(href), image: Some(_), .. } if src == "pic.png" && href == "/x"
    ));
    assert!(matches!(
        images[1],
        DisplayItem::Image { href: None, image: None, .. }
    ));
}

#[test]
fn drawing_applies_scroll_and_styles_links() {
    init_logs();
    let list = paint(r#"<p><a href="/a">ab</a> cd</p>"#, "");
    let mut target = RecordingTarget::new(twenty_per_char);
    let bounds: Vec<Option<Bounds>> = list.iter().map(|item| item.draw(&mut target, 10)).collect();

    assert_eq!(
        bounds,
        [Some(Bounds::new(14, 14, 54, 36)), Some(Bounds::new(74, 14, 114, 36))]
    );
    assert_eq!(
        target.commands()[0],
        DrawCommand::Text {
            x: 14,
            y: 14,
            text: "ab".into(),
            font_size: 16,
            color: LINK_BLUE,
            underline: true,
        }
    );
    assert!(matches!(
        &target.commands()[1],
        DrawCommand::Text { underline: false, color, .. } if *color == BLACK
    ));
}

#[test]
fn display_list_serializes_without_image_data() {
    init_logs();
    let list = paint(r#"<div style="background:#000"><img src="a.png" width=4 height=4></div>"#, "");
    let json = serde_json::to_value(&list).expect("serializable");
    let items = json["items"].as_array().expect("items array");
    assert_eq!(items[0]["kind"], "rect");
    assert_eq!(items[1]["kind"], "image");
    assert_eq!(items[1]["src"], "a.png");
    assert!(items[1].get("image").is_none());
}
