#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate dnslink;

fuzz_target!(|data: &[u8]| {
    #[allow(unused_must_use)]
    {
        dnslink::Message::from_slice(data);
    }
});
