//! Replacement in both directions shows up in the logs

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use surrogate::{decode, encode, ComplexNumber, InstanceCache};

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    log.contents()
}

#[test]
fn complex_number_replacement_is_traced() {
    let output = capture(|| {
        let bytes = encode(&ComplexNumber::from_coordinates(1.0, 0.0)).unwrap();
        let _: ComplexNumber = decode(&bytes).unwrap();
    });

    assert!(output.contains("replacing value with proxy on serialization"));
    assert!(output.contains("replacing proxy with ComplexNumber on deserialization"));
    assert!(output.contains("ComplexNumber (1.00/0.00i; 1.00@0.00rad)"));
    assert!(output.contains("ComplexNumber.Proxy (1.00/0.00i)"));
}

#[test]
fn instance_cache_replacement_is_traced() {
    let output = capture(|| {
        let cache = InstanceCache::new();
        cache.put(0i32);
        let bytes = encode(&cache).unwrap();
        let _: InstanceCache = decode(&bytes).unwrap();
    });

    assert!(output.contains("InstanceCache.Proxy [1 items: i32 (4 bytes)]"));
    assert!(output.contains("replacing proxy with InstanceCache on deserialization"));
}
