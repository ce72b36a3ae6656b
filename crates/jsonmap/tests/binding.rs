use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

use jsonmap::{BindingResult, ConfigurationError, Mapping, MappingBinder, Options, TargetShape, Value};

/// Shared buffer standing in for the host's log sink.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, sink.text())
}

/// Fails the test if the binder touches the body.
struct Untouchable;

impl Read for Untouchable {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        panic!("body must not be read");
    }
}

#[test]
fn binds_object_bodies() -> Result<(), Box<dyn std::error::Error>> {
    let binder = MappingBinder::default();
    let result = binder.bind(&br#"{"name": 1, "when": "2020-01-23T01:02:03Z"}"#[..], &TargetShape::of::<Mapping>())?;
    assert!(result.is_bound());
    let model = result.model().ok_or("no model")?;
    assert_eq!(model["name"], Value::Integer(1));
    assert!(model["when"].as_timestamp().is_some());
    Ok(())
}

#[test]
fn empty_body_binds_to_empty_mapping() -> Result<(), Box<dyn std::error::Error>> {
    let result = MappingBinder::default().bind(io::empty(), &TargetShape::of::<Mapping>())?;
    assert_eq!(result.into_model(), Some(Mapping::new()));
    Ok(())
}

#[test]
fn unsupported_shape_fails_before_reading() {
    let err = MappingBinder::default()
        .bind(Untouchable, &TargetShape::of::<Vec<String>>())
        .unwrap_err();
    let ConfigurationError::UnsupportedShape { binder, shape } = &err;
    assert_eq!(*binder, "MappingBinder");
    assert!(shape.contains("Vec<alloc::string::String>"));
    assert!(err.to_string().starts_with("the 'MappingBinder' binder should only be used on Mapping"));
}

#[test]
fn malformed_body_fails_and_logs_once() {
    let binder = MappingBinder::default();
    let (result, logs) = with_captured_logs(|| binder.bind(&b"{"[..], &TargetShape::of::<Mapping>()));
    assert!(matches!(result, Ok(BindingResult::Failed)));
    assert_eq!(logs.matches("failed to bind request body").count(), 1, "{}", logs);
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("unexpected end of input"));
}

#[test]
fn structural_mismatch_fails_without_error_value() {
    let binder = MappingBinder::default();
    let (result, logs) = with_captured_logs(|| binder.bind(&b"[1, 2]"[..], &TargetShape::of::<Mapping>()));
    assert_eq!(result.ok(), Some(BindingResult::Failed));
    assert!(logs.contains("start of object"));
}

#[test]
fn successful_binds_do_not_log_errors() {
    let binder = MappingBinder::default();
    let (result, logs) = with_captured_logs(|| binder.bind(&b"{}"[..], &TargetShape::of::<Mapping>()));
    assert!(result.map(|r| r.is_bound()).unwrap_or(false));
    assert!(!logs.contains("ERROR"));
}

#[test]
fn binder_options_are_honored() {
    let binder = MappingBinder::new(Options {
        max_depth: 1,
        ..Options::default()
    });
    assert_eq!(binder.options().max_depth, 1);
    let shape = TargetShape::of::<Mapping>();
    assert!(binder.bind(&br#"{"a":1}"#[..], &shape).unwrap().is_bound());
    assert_eq!(binder.bind(&br#"{"a":{}}"#[..], &shape).unwrap(), BindingResult::Failed);
}

#[test]
fn one_binder_serves_many_threads() {
    let binder = Arc::new(MappingBinder::default());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let binder = Arc::clone(&binder);
            std::thread::spawn(move || {
                let body = format!(r#"{{"worker": {}}}"#, i);
                let result = binder.bind(body.as_bytes(), &TargetShape::of::<Mapping>()).unwrap();
                result.into_model().unwrap()["worker"].clone()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), Value::Integer(i as i64));
    }
}
