//! Worker-backed delivery of walker results.
//!
//! Each `iterate_*` call spawns one producer thread that drives a walker
//! and hands every result through a capacity-one channel: the producer
//! blocks until the consumer is ready, items arrive in order and exactly
//! once, and the sequence terminates with either normal completion or a
//! single terminal error.
//!
//! The producer checks a stop flag between items. Dropping the stream
//! raises the flag, closes the receiving side to unblock an in-flight
//! send, and joins the thread — at most one already-computed item is
//! discarded and no worker ever outlives its stream.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use bytes::Bytes;
use crossbeam_channel::{Receiver, Sender, bounded};

use crate::{
    error::Error,
    span::{KeyValue, Value},
    walk::{self, ArrayWalker, ObjectWalker},
};

struct StreamCore<T> {
    rx: Option<Receiver<T>>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl<T> StreamCore<T> {
    fn recv(&mut self) -> Option<T> {
        let item = self.rx.as_ref()?.recv().ok();
        if item.is_none() {
            // Producer finished on its own; reap it.
            self.shutdown();
        }
        item
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        self.rx = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl<T> Drop for StreamCore<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn<T, W>(buffer: Bytes, walk: W) -> StreamCore<T>
where
    T: Send + 'static,
    W: FnOnce(Bytes, Sender<T>, Arc<AtomicBool>) + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let (tx, rx) = bounded(1);
    let flag = Arc::clone(&stop);
    let worker = thread::spawn(move || walk(buffer, tx, flag));
    StreamCore {
        rx: Some(rx),
        stop,
        worker: Some(worker),
    }
}

/// Lazy, single-pass, non-restartable sequence of array elements. Ends
/// after the last element or after one terminal error.
pub struct ArrayStream {
    core: StreamCore<Result<Value, Error>>,
}

impl Iterator for ArrayStream {
    type Item = Result<Value, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.core.recv()
    }
}

/// Lazy, single-pass, non-restartable sequence of object members. Ends
/// after the last member or after one terminal error.
pub struct ObjectStream {
    core: StreamCore<Result<KeyValue, Error>>,
}

impl Iterator for ObjectStream {
    type Item = Result<KeyValue, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.core.recv()
    }
}

/// Iterate over the array at `path`, or over the document root when
/// `path` is empty. Elements are produced by a dedicated worker and
/// delivered lazily; dropping the stream early stops the worker.
#[must_use]
pub fn iterate_array<P: AsRef<str>>(buffer: Bytes, path: &[P]) -> ArrayStream {
    let path = owned_path(path);
    let core = spawn(buffer, move |buffer, tx, stop| {
        let target = match walk::find_target(&buffer, b'[', &path) {
            Ok(target) => target,
            Err(err) => {
                let _ = tx.send(Err(err));
                return;
            }
        };
        for item in ArrayWalker::new(&buffer, target) {
            if stop.load(Ordering::Acquire) {
                return;
            }
            let item = item.map(|(kind, span)| Value::new(&buffer, kind, span));
            let terminal = item.is_err();
            if tx.send(item).is_err() || terminal {
                return;
            }
        }
    });
    ArrayStream { core }
}

/// Iterate over the object at `path`, or over the document root when
/// `path` is empty. Members are produced by a dedicated worker and
/// delivered lazily; dropping the stream early stops the worker.
#[must_use]
pub fn iterate_object<P: AsRef<str>>(buffer: Bytes, path: &[P]) -> ObjectStream {
    let path = owned_path(path);
    let core = spawn(buffer, move |buffer, tx, stop| {
        let target = match walk::find_target(&buffer, b'{', &path) {
            Ok(target) => target,
            Err(err) => {
                let _ = tx.send(Err(err));
                return;
            }
        };
        for item in ObjectWalker::new(&buffer, target) {
            if stop.load(Ordering::Acquire) {
                return;
            }
            let item = item.map(|(key, kind, span)| {
                KeyValue::new(&buffer, key, Value::new(&buffer, kind, span))
            });
            let terminal = item.is_err();
            if tx.send(item).is_err() || terminal {
                return;
            }
        }
    });
    ObjectStream { core }
}

fn owned_path<P: AsRef<str>>(path: &[P]) -> Vec<String> {
    path.iter().map(|p| p.as_ref().to_owned()).collect()
}
