mod common;

use common::{MemoryFetcher, init_logs};
use core::time::Duration;
use layouter::FixedWidthMetrics;
use page_handler::{BrowserConfig, Session};
use std::collections::HashMap;
use std::rc::Rc;

fn session_on(fetcher: &Rc<MemoryFetcher>) -> Session {
    let config = BrowserConfig::new(400, 300, 8, 12, "http://home.test/");
    Session::new(config, Rc::<MemoryFetcher>::clone(fetcher), Rc::new(FixedWidthMetrics::default()))
}

fn serve_titled(fetcher: &MemoryFetcher, host: &str) {
    fetcher.serve(&format!("http://{host}/"), format!("<title>{host}</title>"));
}

#[test]
fn tabs_open_switch_and_close() {
    init_logs();
    let fetcher = MemoryFetcher::new();
    for host in ["home.test", "a.test", "b.test"] {
        serve_titled(&fetcher, host);
    }
    let mut session = session_on(&fetcher);
    assert!(session.active_tab().is_none());

    assert_eq!(session.new_tab("http://a.test/").unwrap(), 0);
    assert_eq!(session.new_tab("http://b.test/").unwrap(), 1);
    assert_eq!(session.active_tab().unwrap().title(), "b.test");
    assert_eq!(session.active_tab().unwrap().viewport().width, 400);

    assert!(!session.switch_tab(5));
    assert!(session.switch_tab(0));
    assert_eq!(session.active_tab().unwrap().title(), "a.test");

    session.switch_tab(1);
    session.close_tab(1).unwrap();
    assert_eq!(session.active_index(), 0);
    session.close_tab(7).unwrap();
    assert_eq!(session.len(), 1);

    session.close_tab(0).unwrap();
    assert_eq!(session.len(), 1);
    assert_eq!(
        session.active_tab().unwrap().current_url_string(),
        "http://home.test/"
    );
}

#[test]
fn closing_an_earlier_tab_keeps_the_active_one() {
    init_logs();
    let fetcher = MemoryFetcher::new();
    let hosts = ["a.test", "b.test", "c.test", "d.test"];
    for host in hosts {
        serve_titled(&fetcher, host);
    }
    let mut session = session_on(&fetcher);
    for host in hosts {
        session.new_tab(&format!("http://{host}/")).unwrap();
    }

    session.switch_tab(2);
    session.close_tab(0).unwrap();
    assert_eq!(session.active_index(), 1);
    assert_eq!(session.active_tab().unwrap().title(), "c.test");

    session.close_tab(2).unwrap();
    assert_eq!(session.active_tab().unwrap().title(), "c.test");
}

#[test]
fn failed_new_tab_adds_nothing() {
    init_logs();
    let fetcher = MemoryFetcher::new();
    serve_titled(&fetcher, "a.test");
    let mut session = session_on(&fetcher);
    session.new_tab("http://a.test/").unwrap();

    session.new_tab("http://nowhere.test/").unwrap_err();
    assert_eq!(session.len(), 1);
    assert_eq!(session.active_index(), 0);
}

#[test]
fn home_loads_in_active_tab() {
    init_logs();
    let fetcher = MemoryFetcher::new();
    serve_titled(&fetcher, "home.test");
    serve_titled(&fetcher, "a.test");
    let mut session = session_on(&fetcher);
    session.go_home().unwrap();
    assert_eq!(session.len(), 1);

    session.active_tab_mut().unwrap().load("http://a.test/").unwrap();
    session.go_home().unwrap();
    let tab = session.active_tab().unwrap();
    assert_eq!(tab.title(), "home.test");
    assert!(tab.can_go_back());
}

#[test]
fn config_reads_lumen_variables() {
    let vars: HashMap<&str, &str> = [
        ("LUMEN_VIEWPORT_WIDTH", "640"),
        ("LUMEN_VIEWPORT_HEIGHT", "oops"),
        ("LUMEN_MAX_REDIRECTS", "3"),
        ("LUMEN_TIMEOUT_SECS", "0"),
        ("LUMEN_HOME_URL", " http://start.test/ "),
    ]
    .into_iter()
    .collect();
    let config = BrowserConfig::from_lookup(|key| vars.get(key).map(|val| (*val).to_owned()));

    assert_eq!(config.viewport_width, 640);
    assert_eq!(config.viewport_height, 700);
    assert_eq!(config.max_redirects, 3);
    assert_eq!(config.timeout(), Duration::from_secs(1));
    assert_eq!(config.home_url, "http://start.test/");
    assert_eq!(config.http_client().max_redirects(), 3);
}

#[test]
fn config_defaults_without_variables() {
    let config = BrowserConfig::from_lookup(|_| None);
    assert_eq!(config, BrowserConfig::default());
    assert_eq!(config.viewport().width, 1000);
    assert_eq!(config.viewport().height, 700);
    assert_eq!(config.timeout(), Duration::from_secs(12));
    assert_eq!(config.home_url, "https://example.com");
}
