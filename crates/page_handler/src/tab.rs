//! One navigable browsing context.
//!
//! A load runs the whole pipeline (fetch, parse, cascade, layout, paint) into
//! locals and only then replaces the tab's page, so a failed navigation
//! leaves the previous page, history and scroll position untouched.

use crate::history::History;
use crate::images::{ImageCache, ImageDecoder};
use crate::resources::{collect_css, extract_title};
use anyhow::{Context as _, Result};
use css::{Stylesheet, parse_stylesheet};
use html::Document;
use layouter::{LayoutEngine, TextMeasurer, Viewport};
use log::{debug, info, warn};
use net::{Fetch, Url};
use renderer::{
    DisplayList, HitBox, ImageHandle, ImageProvider, Painter, RenderTarget, Rgba,
};
use std::rc::Rc;
use style_engine::StyleEngine;

pub const NEW_TAB_TITLE: &str = "New Tab";

pub const SCROLLBAR_WIDTH: i32 = 10;
pub const SCROLLBAR_MARGIN: i32 = 4;
pub const MIN_THUMB_HEIGHT: i32 = 24;
/// `#efefef`
pub const SCROLLBAR_TRACK: Rgba = [239.0 / 255.0, 239.0 / 255.0, 239.0 / 255.0, 1.0];
/// `#bdbdbd`
pub const SCROLLBAR_THUMB: Rgba = [189.0 / 255.0, 189.0 / 255.0, 189.0 / 255.0, 1.0];

/// Everything produced by the last successful load.
struct Page {
    url: Url,
    title: String,
    document: Document,
    stylesheet: Stylesheet,
    display_list: DisplayList,
    doc_height: i32,
}

pub struct Tab {
    fetcher: Rc<dyn Fetch>,
    measurer: Rc<dyn TextMeasurer>,
    viewport: Viewport,
    history: History,
    images: ImageCache,
    page: Option<Page>,
    scroll_y: i32,
    hit_boxes: Vec<HitBox>,
}

impl Tab {
    pub fn new(fetcher: Rc<dyn Fetch>, measurer: Rc<dyn TextMeasurer>, viewport: Viewport) -> Self {
        Self {
            fetcher,
            measurer,
            viewport,
            history: History::new(),
            images: ImageCache::new(),
            page: None,
            scroll_y: 0,
            hit_boxes: Vec::new(),
        }
    }

    /// Decoder consulted for images that are neither PNG nor GIF.
    #[must_use]
    pub fn with_image_decoder(mut self, decoder: Rc<dyn ImageDecoder>) -> Self {
        self.images.set_decoder(Some(decoder));
        self
    }

    /// Navigate to `url`, recording it in history.
    ///
    /// # Errors
    /// Fails when `url` does not parse or the document cannot be fetched.
    /// The underlying [`net::NetError`] is kept as the error source.
    pub fn load(&mut self, url: &str) -> Result<()> {
        self.navigate(url, true)
    }

    /// Load the current URL again without touching history.
    ///
    /// # Errors
    /// As for [`Tab::load`].
    pub fn reload(&mut self) -> Result<()> {
        let Some(url) = self.current_url().map(Url::to_string) else {
            return Ok(());
        };
        self.navigate(&url, false)
    }

    /// Load the previous history entry. Returns whether there was one.
    ///
    /// # Errors
    /// As for [`Tab::load`]; the history position only moves on success.
    pub fn go_back(&mut self) -> Result<bool> {
        let Some(target) = self.history.back_entry().map(str::to_owned) else {
            return Ok(false);
        };
        self.navigate(&target, false)?;
        self.history.step(-1);
        Ok(true)
    }

    /// Load the next history entry. Returns whether there was one.
    ///
    /// # Errors
    /// As for [`Tab::go_back`].
    pub fn go_forward(&mut self) -> Result<bool> {
        let Some(target) = self.history.forward_entry().map(str::to_owned) else {
            return Ok(false);
        };
        self.navigate(&target, false)?;
        self.history.step(1);
        Ok(true)
    }

    fn navigate(&mut self, raw_url: &str, push_history: bool) -> Result<()> {
        let url = Url::parse(raw_url)?;
        info!("Loading {url}");
        let response = self
            .fetcher
            .fetch(&url)
            .with_context(|| format!("failed to load {url}"))?;
        let source = response.text();

        let document = html::parse(&source);
        let css = collect_css(&document, &url, &*self.fetcher);
        let stylesheet = parse_stylesheet(&css);
        let (display_list, doc_height) = self.paint_page(&url, &document, &stylesheet);
        let title = extract_title(&document).unwrap_or_else(|| url.host().to_owned());

        if push_history {
            self.history.push(url.to_string());
        }
        debug!(
            "Loaded {url} (status {}): {} display items, height {doc_height}",
            response.status,
            display_list.len()
        );
        self.page = Some(Page {
            url,
            title,
            document,
            stylesheet,
            display_list,
            doc_height,
        });
        self.scroll_y = 0;
        self.hit_boxes.clear();
        Ok(())
    }

    /// Cascade, layout and paint `document`, returning the display list and
    /// the document height.
    fn paint_page(&mut self, url: &Url, document: &Document, stylesheet: &Stylesheet) -> (DisplayList, i32) {
        let styled = StyleEngine::new(stylesheet).style(document);
        let layout = LayoutEngine::new(document, &*self.measurer, self.viewport).layout(&styled);
        let mut images = PageImages {
            cache: &mut self.images,
            fetcher: &*self.fetcher,
            base: url,
        };
        let display_list = Painter::new(document, &mut images).paint(&layout);
        (display_list, layout.rect.height)
    }

    /// Change the viewport and lay the current page out again.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.viewport = Viewport::new(width.max(1), height.max(1));
        if let Some(mut page) = self.page.take() {
            let (display_list, doc_height) =
                self.paint_page(&page.url, &page.document, &page.stylesheet);
            page.display_list = display_list;
            page.doc_height = doc_height;
            self.page = Some(page);
        }
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll());
        self.hit_boxes.clear();
    }

    pub fn max_scroll(&self) -> i32 {
        (self.doc_height() - self.viewport.height).max(0)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll_y = self.scroll_y.saturating_add(delta).clamp(0, self.max_scroll());
    }

    /// Follow the topmost link under `(x, y)` in viewport coordinates, as
    /// recorded by the last [`Tab::render`]. Returns whether a link was hit.
    ///
    /// # Errors
    /// Fails when the link does not resolve or its target cannot be loaded.
    pub fn click(&mut self, x: i32, y: i32) -> Result<bool> {
        let Some(href) = self
            .hit_boxes
            .iter()
            .rev()
            .find(|hit| hit.bounds.contains(x, y))
            .map(|hit| hit.href.clone())
        else {
            return Ok(false);
        };
        let Some(page) = &self.page else {
            return Ok(false);
        };
        let target = page.url.resolve(&href)?;
        info!("Following link to {target}");
        self.navigate(&target.to_string(), true)?;
        Ok(true)
    }

    /// Draw the page at the current scroll offset and rebuild the hit boxes
    /// from what the target reports.
    pub fn render(&mut self, target: &mut dyn RenderTarget) {
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll());
        self.hit_boxes.clear();
        let Some(page) = &self.page else {
            return;
        };
        for item in &page.display_list {
            let Some(bounds) = item.draw(target, self.scroll_y) else {
                continue;
            };
            if let Some(href) = item.href().filter(|href| !href.is_empty()) {
                self.hit_boxes.push(HitBox {
                    bounds,
                    href: href.to_owned(),
                });
            }
        }
        self.draw_scrollbar(target);
    }

    fn draw_scrollbar(&self, target: &mut dyn RenderTarget) {
        let max_scroll = self.max_scroll();
        let Viewport { width, height } = self.viewport;
        if max_scroll <= 0 || height <= 0 {
            return;
        }
        let doc_height = i64::from(self.doc_height().max(1));
        let x = width - SCROLLBAR_WIDTH - SCROLLBAR_MARGIN;
        let thumb_height = ((i64::from(height) * i64::from(height) / doc_height) as i32)
            .max(MIN_THUMB_HEIGHT)
            .min(height);
        let thumb_y = (i64::from(height - thumb_height) * i64::from(self.scroll_y)
            / i64::from(max_scroll)) as i32;

        target.fill_rect(x, 0, SCROLLBAR_WIDTH, height, SCROLLBAR_TRACK);
        target.fill_rect(x, thumb_y, SCROLLBAR_WIDTH, thumb_height, SCROLLBAR_THUMB);
    }

    pub fn current_url(&self) -> Option<&Url> {
        self.page.as_ref().map(|page| &page.url)
    }

    /// The loaded URL in normalized form, empty before the first load.
    pub fn current_url_string(&self) -> String {
        self.current_url().map(Url::to_string).unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.page
            .as_ref()
            .map_or(NEW_TAB_TITLE, |page| page.title.as_str())
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    pub fn document(&self) -> Option<&Document> {
        self.page.as_ref().map(|page| &page.document)
    }

    pub fn display_list(&self) -> Option<&DisplayList> {
        self.page.as_ref().map(|page| &page.display_list)
    }

    /// Link regions recorded by the last render, in draw order.
    pub fn hit_boxes(&self) -> &[HitBox] {
        &self.hit_boxes
    }

    pub const fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    /// Height of the laid-out document, `0` before the first load.
    pub fn doc_height(&self) -> i32 {
        self.page.as_ref().map_or(0, |page| page.doc_height)
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub const fn image_cache(&self) -> &ImageCache {
        &self.images
    }
}

/// Resolves `src` against the page and serves it through the tab's cache.
struct PageImages<'tab> {
    cache: &'tab mut ImageCache,
    fetcher: &'tab dyn Fetch,
    base: &'tab Url,
}

impl ImageProvider for PageImages<'_> {
    fn provide(&mut self, src: &str) -> Option<ImageHandle> {
        match self.base.resolve(src) {
            Ok(url) => self.cache.load(&url, self.fetcher),
            Err(err) => {
                warn!("Skipping image {src}: {err}");
                None
            }
        }
    }
}
