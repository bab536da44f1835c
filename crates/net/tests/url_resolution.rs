use net::{NetError, Url};

fn url(raw: &str) -> Url {
    Url::parse(raw).expect("valid url")
}

#[test]
fn parse_fills_in_defaults() {
    let parsed = url("Example.COM");
    assert_eq!(parsed.scheme(), "http");
    assert_eq!(parsed.host(), "example.com");
    assert_eq!(parsed.port(), 80);
    assert_eq!(parsed.path(), "/");

    let secure = url("HTTPS://example.com/a/./b/../c?q=1#frag");
    assert_eq!(secure.scheme(), "https");
    assert_eq!(secure.port(), 443);
    assert_eq!(secure.path(), "/a/c?q=1");
}

#[test]
fn missing_host_is_rejected() {
    let err = Url::parse("http:///nohost").unwrap_err();
    assert!(matches!(err, NetError::InvalidUrl { .. }), "got {err:?}");
    Url::parse("http://host:notaport/").unwrap_err();
}

#[test]
fn file_urls_allow_empty_host() {
    let parsed = url("file:///tmp/page.html");
    assert_eq!(parsed.host(), "");
    assert_eq!(parsed.port(), 0);
    assert_eq!(parsed.path(), "/tmp/page.html");
    assert_eq!(parsed.to_string(), "file:///tmp/page.html");
}

#[test]
fn relative_links_resolve_against_directory() {
    let base = url("http://a.com/x/y");
    assert_eq!(base.resolve("../z").unwrap().to_string(), "http://a.com/z");
    assert_eq!(base.resolve("z").unwrap().to_string(), "http://a.com/x/z");
    assert_eq!(base.resolve("../../../z").unwrap().to_string(), "http://a.com/z");
    assert_eq!(base.resolve("/root?k=v").unwrap().to_string(), "http://a.com/root?k=v");
}

#[test]
fn scheme_relative_links_inherit_scheme() {
    let base = url("https://a.com/x");
    let resolved = base.resolve("//other.com/p").unwrap();
    assert_eq!(resolved.scheme(), "https");
    assert_eq!(resolved.host(), "other.com");
    assert_eq!(resolved.to_string(), "https://other.com/p");
}

#[test]
fn fragments_are_stripped() {
    let base = url("http://a.com:8080/dir/page?x=1");
    assert_eq!(base.resolve("#top").unwrap(), base);
    assert_eq!(base.resolve("").unwrap(), base);
    assert_eq!(base.resolve("other#sec").unwrap().to_string(), "http://a.com:8080/dir/other");
}

#[test]
fn absolute_links_are_parsed_standalone() {
    let base = url("http://a.com/x");
    let resolved = base.resolve("https://b.org:8443/deep/../p").unwrap();
    assert_eq!(resolved.to_string(), "https://b.org:8443/p");
}

#[test]
fn default_port_is_omitted() {
    assert_eq!(url("http://a.com:80/").to_string(), "http://a.com/");
    assert_eq!(url("https://a.com:443/").to_string(), "https://a.com/");
    assert_eq!(url("http://a.com:443/").to_string(), "http://a.com:443/");
    assert_eq!(url("https://a.com:80/x").to_string(), "https://a.com:80/x");
}

#[test]
fn printing_and_reparsing_is_stable() {
    for raw in [
        "example.com",
        "http://a.com:81/a/b/../c?q=a/../b",
        "https://[::1]:9000/x",
        "https://user@host.net/p/",
        "file:///var/www/index.html",
        "http://a.com/?",
    ] {
        let first = url(raw);
        let second = url(&first.to_string());
        assert_eq!(first, second, "{raw} did not survive a round trip");
    }
}
