#![no_main]
use libfuzzer_sys::fuzz_target;

use json_decoder::{
    array, boolean, date, decode, dict, map, nil, number, option, record, set, string, union,
    DecodeOptions,
};

record! {
    struct Event {
        id: f64 = number(),
        kind: &'static str = union(("created", "deleted")),
        at: Option<chrono::DateTime<chrono::Utc>> = option(date()),
        tags: Vec<String> = set(string()),
        counts: std::collections::BTreeMap<String, f64> = map(string(), number()),
        flags: std::collections::BTreeMap<String, bool> = dict(boolean()),
        parent: Option<()> = option(nil()),
        children: Vec<(f64, String)> = array((number(), string())),
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(instance) = serde_json::from_slice(data) {
        let options = DecodeOptions::new().with_max_depth(64);
        let decoder = Event::decoder();

        // The decoder must never panic, and decoding must be deterministic.
        let first = decode(&decoder, &instance, &options).map(|_| ());
        let second = decode(&decoder, &instance, &options).map(|_| ());
        assert_eq!(first, second);
    }
});
