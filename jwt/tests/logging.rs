//! Short-secret warnings are emitted when signing, never when verifying

use simple_jwt::{Header, Jwt, JwtResult, Payload};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::Level;

const SHORT_SECRET_WARNING: &str = "Secret is shorter than recommended";

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_log<T>(log: &CapturedLog, f: impl FnOnce() -> T) -> T {
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

#[test]
fn short_secret_warns_on_build_only() -> JwtResult<()> {
    let log = CapturedLog::default();
    let codec = Jwt::default();

    let wire = with_captured_log(&log, || {
        codec.build(Header::new(), Payload::new(), "secret", None)?.token()
    })?;
    assert!(log.text().contains(SHORT_SECRET_WARNING), "{}", log.text());

    log.clear();
    with_captured_log(&log, || {
        for _ in 0..3 {
            codec.decrypt(&wire, "secret", None)?;
        }
        JwtResult::Ok(())
    })?;
    assert!(!log.text().contains(SHORT_SECRET_WARNING), "{}", log.text());
    Ok(())
}

#[test]
fn recommended_length_secret_is_quiet() -> JwtResult<()> {
    let log = CapturedLog::default();
    let secret = "0123456789abcdef0123456789abcdef";

    with_captured_log(&log, || {
        let mut builder = Jwt::default().builder(secret)?;
        builder.claim("sub", "42");
        builder.finish().token()
    })?;
    assert!(log.text().is_empty(), "{}", log.text());
    Ok(())
}
