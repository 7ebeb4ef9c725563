//! State machine tests for ConcatReader.

use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::concat::{ConcatReader, Step};
use crate::context::Context;
use crate::io::{FnOpener, MemoryOpener, Resource};
use crate::tests::support::{BrokenClose, BrokenRead, WANT, drain_steps, sample_opener};

fn reader_over(opener: &MemoryOpener, paths: &[&str]) -> ConcatReader<MemoryOpener> {
    ConcatReader::new(Context::background(), opener.clone(), paths.iter().copied())
}

#[test]
fn concatenates_files_in_listed_order() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b", "c", "d"]);

    let mut got = String::new();
    reader.read_to_string(&mut got).unwrap();
    reader.close().unwrap();

    assert_eq!(got, WANT);
    assert_eq!(opener.opened(), ["a", "b", "c", "d"]);
    assert_eq!(opener.closed(), ["a", "b", "c", "d"]);
}

#[test]
fn order_follows_input_not_name() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["d", "a", "c"]);

    let mut got = String::new();
    reader.read_to_string(&mut got).unwrap();

    assert_eq!(got, "desmondaliceclara");
}

#[test]
fn empty_path_list_ends_without_opening() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &[]);

    let mut buf = [0u8; 16];
    assert_eq!(reader.read_step(&mut buf).unwrap(), Step::End);
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
    assert!(reader.is_exhausted());
    assert!(opener.opened().is_empty());
}

#[test]
fn end_of_data_is_idempotent() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b"]);

    let mut sink = Vec::new();
    reader.read_to_end(&mut sink).unwrap();

    let mut buf = [0u8; 16];
    for _ in 0..3 {
        assert_eq!(reader.read_step(&mut buf).unwrap(), Step::End);
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }
    assert_eq!(opener.opened(), ["a", "b"]);
    assert_eq!(opener.closed(), ["a", "b"]);
}

#[test]
fn boundary_is_reported_between_files_and_is_not_end() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b"]);

    let (data, steps, err) = drain_steps(&mut reader, 64);

    assert!(err.is_none());
    assert_eq!(data, b"alicebasil");
    assert_eq!(
        steps,
        [
            Step::Data(5),
            Step::Boundary,
            Step::Data(5),
            Step::Boundary,
            Step::End
        ]
    );
}

#[test]
fn small_buffers_span_file_boundaries() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b", "c", "d"]);

    let (data, steps, err) = drain_steps(&mut reader, 3);

    assert!(err.is_none());
    assert_eq!(String::from_utf8(data).unwrap(), WANT);
    assert_eq!(steps.iter().filter(|s| **s == Step::Boundary).count(), 4);
    assert!(steps.iter().all(|s| *s != Step::Data(0)));
}

#[test]
fn read_steps_over_boundaries() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "d"]);

    let mut buf = [0u8; 64];
    assert_eq!(reader.read(&mut buf).unwrap(), 5);
    assert_eq!(reader.current_path(), Some("a"));
    assert_eq!(reader.read(&mut buf).unwrap(), 7);
    assert_eq!(&buf[..7], b"desmond");
    assert_eq!(reader.current_path(), Some("d"));
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
    assert_eq!(reader.current_path(), None);
}

#[test]
fn opens_lazily_one_file_at_a_time() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b", "c"]);

    assert!(opener.opened().is_empty());
    assert_eq!(reader.pending(), 3);

    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).unwrap();
    assert_eq!(opener.opened(), ["a"]);
    assert_eq!(opener.open_count(), 1);
    assert_eq!(reader.pending(), 2);

    let mut rest = [0u8; 5];
    reader.read_exact(&mut rest).unwrap();
    assert_eq!(&rest, b"iceba");
    assert_eq!(opener.opened(), ["a", "b"]);
    assert_eq!(opener.closed(), ["a"]);
    assert_eq!(opener.open_count(), 1);
}

#[test]
fn close_with_pending_paths_discards_them() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b", "c"]);

    let mut buf = [0u8; 3];
    reader.read_exact(&mut buf).unwrap();
    reader.close().unwrap();

    assert!(reader.is_exhausted());
    assert_eq!(reader.pending(), 0);
    let mut big = [0u8; 16];
    assert_eq!(reader.read(&mut big).unwrap(), 0);
    assert_eq!(reader.read_step(&mut big).unwrap(), Step::End);
    assert_eq!(opener.opened(), ["a"]);
    assert_eq!(opener.closed(), ["a"]);
}

#[test]
fn close_twice_does_not_double_close() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b"]);

    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf).unwrap();
    reader.close().unwrap();
    reader.close().unwrap();
    drop(reader);

    assert_eq!(opener.closed(), ["a"]);
}

#[test]
fn close_before_first_read_opens_nothing() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b"]);

    reader.close().unwrap();

    let mut buf = [0u8; 8];
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
    assert!(opener.opened().is_empty());
}

#[test]
fn open_failure_is_reported_after_earlier_files() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b", "missing", "c"]);

    let (data, _, err) = drain_steps(&mut reader, 64);

    assert_eq!(data, b"alicebasil");
    let err = err.expect("open of missing path should fail");
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert_eq!(reader.current_path(), None);
    assert_eq!(reader.pending(), 1);
    assert_eq!(opener.opened(), ["a", "b", "missing"]);
}

#[test]
fn failed_path_is_not_retried() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["missing", "c"]);

    let mut buf = [0u8; 64];
    let err = reader.read(&mut buf).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);

    // A caller that insists on continuing moves on to the next path.
    assert_eq!(reader.read(&mut buf).unwrap(), 5);
    assert_eq!(&buf[..5], b"clara");
    assert_eq!(opener.opened(), ["missing", "c"]);
}

#[test]
fn read_to_end_stops_at_open_failure() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "nope", "b"]);

    let mut sink = Vec::new();
    let err = reader.read_to_end(&mut sink).unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert_eq!(sink, b"alice");
}

#[test]
fn read_error_propagates_and_leaves_file_open() {
    let closes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&closes);
    let opener = FnOpener::new(move |_ctx: &Context, _path: &str| {
        Ok(Box::new(BrokenRead::new("ab", Arc::clone(&counter))) as Box<dyn Resource>)
    });
    let mut reader = ConcatReader::new(Context::background(), opener, ["flaky", "other"]);

    let mut buf = [0u8; 8];
    assert_eq!(reader.read(&mut buf).unwrap(), 2);
    let err = reader.read(&mut buf).unwrap_err();

    assert_eq!(err.to_string(), "device went away");
    assert_eq!(reader.current_path(), Some("flaky"));
    assert_eq!(reader.pending(), 1);
    assert_eq!(closes.load(Ordering::SeqCst), 0);

    reader.close().unwrap();
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[test]
fn close_error_is_returned_and_state_is_reset() {
    let closes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&closes);
    let opener = FnOpener::new(move |_ctx: &Context, _path: &str| {
        Ok(Box::new(BrokenClose::new("payload", Arc::clone(&counter))) as Box<dyn Resource>)
    });
    let mut reader = ConcatReader::new(Context::background(), opener, ["x", "y"]);

    let mut buf = [0u8; 3];
    reader.read_exact(&mut buf).unwrap();

    let err = reader.close().unwrap_err();
    assert_eq!(err.to_string(), "flush on close failed");
    assert!(reader.is_exhausted());

    reader.close().unwrap();
    let mut big = [0u8; 16];
    assert_eq!(reader.read(&mut big).unwrap(), 0);
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[test]
fn close_error_at_end_of_file_does_not_stop_reading() {
    let closes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&closes);
    let opener = FnOpener::new(move |_ctx: &Context, path: &str| {
        Ok(Box::new(BrokenClose::new(path, Arc::clone(&counter))) as Box<dyn Resource>)
    });
    let mut reader = ConcatReader::new(Context::background(), opener, ["one", "two"]);

    let mut got = String::new();
    reader.read_to_string(&mut got).unwrap();

    assert_eq!(got, "onetwo");
    assert_eq!(closes.load(Ordering::SeqCst), 2);
}

#[test]
fn drop_closes_the_open_file() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a", "b"]);

    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf).unwrap();
    drop(reader);

    assert_eq!(opener.closed(), ["a"]);
    assert_eq!(opener.open_count(), 0);
}

#[test]
fn empty_buffer_does_not_advance() {
    let opener = sample_opener();
    let mut reader = reader_over(&opener, &["a"]);

    assert_eq!(reader.read_step(&mut []).unwrap(), Step::Data(0));
    assert_eq!(reader.read(&mut []).unwrap(), 0);
    assert!(opener.opened().is_empty());

    let mut sink = Vec::new();
    reader.read_to_end(&mut sink).unwrap();
    assert_eq!(reader.read_step(&mut []).unwrap(), Step::End);
}

#[test]
fn empty_files_produce_only_boundaries() {
    let opener = MemoryOpener::new()
        .with_file("empty", "")
        .with_file("a", "alice");
    let mut reader = reader_over(&opener, &["empty", "a", "empty"]);

    let (data, steps, err) = drain_steps(&mut reader, 16);

    assert!(err.is_none());
    assert_eq!(data, b"alice");
    assert_eq!(
        steps,
        [
            Step::Boundary,
            Step::Data(5),
            Step::Boundary,
            Step::Boundary,
            Step::End
        ]
    );
}

#[test]
fn context_reaches_the_opener() {
    let ctx = Context::background();
    let opener = FnOpener::new(|ctx: &Context, path: &str| {
        ctx.check()?;
        Ok(Box::new(crate::io::NopClose::new(io::Cursor::new(path.to_string()))) as Box<dyn Resource>)
    });
    let mut reader = ConcatReader::new(ctx.clone(), opener, ["first", "second"]);

    let mut buf = [0u8; 5];
    reader.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"first");

    ctx.cancel();
    let mut rest = Vec::new();
    let err = reader.read_to_end(&mut rest).unwrap_err();
    assert_eq!(err.to_string(), "context canceled");
    assert!(rest.is_empty());
}
