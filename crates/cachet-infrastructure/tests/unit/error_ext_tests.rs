//! Error Extension Tests

use cachet_domain::error::{Error, Result};
use cachet_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_io_context() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_context() {
    let parse_error = "x".parse::<u32>().unwrap_err();

    let result: Result<u32> = Err(parse_error).config_context("bad pool size");

    assert!(matches!(result, Err(Error::Config { ref message, .. }) if message.starts_with("bad pool size")));
}

#[test]
fn test_lazy_context() {
    let io_error = io::Error::other("boom");
    let mut evaluated = false;

    let result: Result<()> = Err(io_error).with_context(|| {
        evaluated = true;
        "lazy context"
    });

    assert!(evaluated);
    match result {
        Err(Error::Infrastructure { message, .. }) => assert_eq!(message, "lazy context: boom"),
        other => panic!("Expected Infrastructure error, got {other:?}"),
    }
}

#[test]
fn test_ok_passes_through() {
    let result: std::result::Result<u8, io::Error> = Ok(7);
    assert_eq!(result.context("unused").unwrap(), 7);
}
