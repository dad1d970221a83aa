#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate dnslink;

fuzz_target!(|text: &str| {
    if let Some(Ok(path)) = dnslink::parse_entry(text) {
        assert!(path.starts_with('/'));
        if dnslink::is_redirect(path) {
            let (domain, rest) = dnslink::parse_link_domain(path).expect("validated by parse_entry");
            assert!(!domain.is_empty());
            assert!(rest.is_empty() || rest.starts_with('/'));
        }
    }
});
