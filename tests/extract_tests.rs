use std::collections::HashSet;

use sms_hunter::crawl::extract::extract_links;
use url::Url;

fn base() -> Url {
    Url::parse("https://www.example.com/account/login").unwrap()
}

fn as_strings(links: HashSet<Url>) -> HashSet<String> {
    links.into_iter().map(|u| u.to_string()).collect()
}

#[test]
fn keeps_only_same_origin_http_links() {
    let html = r##"<html><body>
        <a href="https://www.example.com/verify">absolute</a>
        <a href="/signup">relative</a>
        <a href="//www.example.com/sms">protocol-relative</a>
        <a href="https://evil.example.net/">cross-origin</a>
        <a href="https://sub.example.com/">other subdomain</a>
        <a href="mailto:x@example.com">mail</a>
        <a href="javascript:void(0)">js</a>
        <a href="#top">fragment-only</a>
        <a href="ftp://www.example.com/file">ftp</a>
    </body></html>"##;

    let expected: HashSet<String> = [
        "https://www.example.com/verify",
        "https://www.example.com/signup",
        "https://www.example.com/sms",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    assert_eq!(as_strings(extract_links(html, &base())), expected);
}

#[test]
fn same_host_on_another_port_is_a_different_origin() {
    let base = Url::parse("http://127.0.0.1:3000/").unwrap();
    let html = r#"<html><body>
        <a href="http://127.0.0.1:9999/lure">other port</a>
        <a href="http://127.0.0.1:3000/ok">same port</a>
        <a href="/also-ok">relative</a>
    </body></html>"#;

    let expected: HashSet<String> = [
        "http://127.0.0.1:3000/ok",
        "http://127.0.0.1:3000/also-ok",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    assert_eq!(as_strings(extract_links(html, &base)), expected);
}

#[test]
fn scheme_hop_on_the_same_authority_stays_same_origin() {
    // Default ports are normalized away, so the http twin of an https page
    // shares its authority.
    let links = as_strings(extract_links(
        r#"<a href="http://www.example.com/plain">plain</a>"#,
        &base(),
    ));
    assert!(links.contains("http://www.example.com/plain"));
}

#[test]
fn resolves_relative_references_against_the_page_path() {
    let links = as_strings(extract_links(r#"<a href="next">next</a>"#, &base()));
    assert!(links.contains("https://www.example.com/account/next"));
}

#[test]
fn fragment_variants_collapse_to_one_url() {
    let html = r#"<a href="/page#a">a</a><a href="/page#b">b</a>"#;
    let links = extract_links(html, &base());
    assert_eq!(links.len(), 1);
    assert_eq!(
        links.iter().next().unwrap().as_str(),
        "https://www.example.com/page"
    );
}

#[test]
fn malformed_markup_degrades_instead_of_failing() {
    let links = extract_links("<a href= <div><<<>>junk", &base());
    assert!(links
        .iter()
        .all(|u| u.host_str() == Some("www.example.com")));

    assert!(extract_links("", &base()).is_empty());
}

#[test]
fn hostless_base_yields_no_links() {
    let base = Url::parse("mailto:x@example.com").unwrap();
    assert!(extract_links(r#"<a href="/x">x</a>"#, &base).is_empty());
}
