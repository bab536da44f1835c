use crate::config::BrowserConfig;
use crate::images::ImageDecoder;
use crate::tab::Tab;
use anyhow::Result;
use layouter::TextMeasurer;
use log::info;
use net::Fetch;
use std::rc::Rc;

/// An ordered set of tabs sharing one fetcher, measurer and configuration.
pub struct Session {
    config: BrowserConfig,
    fetcher: Rc<dyn Fetch>,
    measurer: Rc<dyn TextMeasurer>,
    decoder: Option<Rc<dyn ImageDecoder>>,
    tabs: Vec<Tab>,
    active: usize,
}

impl Session {
    pub fn new(config: BrowserConfig, fetcher: Rc<dyn Fetch>, measurer: Rc<dyn TextMeasurer>) -> Self {
        Self {
            config,
            fetcher,
            measurer,
            decoder: None,
            tabs: Vec::new(),
            active: 0,
        }
    }

    /// Decoder handed to every tab opened afterwards.
    #[must_use]
    pub fn with_image_decoder(mut self, decoder: Rc<dyn ImageDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Open a tab on `url` and make it active. Returns its index.
    ///
    /// # Errors
    /// When the first load fails no tab is added.
    pub fn new_tab(&mut self, url: &str) -> Result<usize> {
        let mut tab = Tab::new(
            Rc::clone(&self.fetcher),
            Rc::clone(&self.measurer),
            self.config.viewport(),
        );
        if let Some(decoder) = &self.decoder {
            tab = tab.with_image_decoder(Rc::clone(decoder));
        }
        tab.load(url)?;
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        info!("Opened tab {} on {url}", self.active);
        Ok(self.active)
    }

    /// Close the tab at `index`; out-of-range indices are ignored. Closing
    /// the last tab reopens the home page.
    ///
    /// # Errors
    /// Only when the home page has to be reopened and fails to load.
    pub fn close_tab(&mut self, index: usize) -> Result<()> {
        if index >= self.tabs.len() {
            return Ok(());
        }
        self.tabs.remove(index);
        if self.tabs.is_empty() {
            let home = self.config.home_url.clone();
            self.new_tab(&home)?;
            return Ok(());
        }
        if index < self.active {
            self.active -= 1;
        }
        self.active = self.active.min(self.tabs.len() - 1);
        Ok(())
    }

    /// Activate the tab at `index` if it exists.
    pub fn switch_tab(&mut self, index: usize) -> bool {
        let exists = index < self.tabs.len();
        if exists {
            self.active = index;
        }
        exists
    }

    /// Load the configured home page in the active tab.
    ///
    /// # Errors
    /// As for [`Tab::load`].
    pub fn go_home(&mut self) -> Result<()> {
        let home = self.config.home_url.clone();
        match self.tabs.get_mut(self.active) {
            Some(tab) => tab.load(&home),
            None => self.new_tab(&home).map(|_| ()),
        }
    }

    pub const fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }
}
