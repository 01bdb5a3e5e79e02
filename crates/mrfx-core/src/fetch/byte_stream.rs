//! Pull-side adapter over a curl transfer running on a background thread.

use std::io::{self, Read};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread;

use super::FetchOptions;

/// Chunks in flight between the transfer thread and the reader. Bounds memory:
/// the transfer blocks once the reader falls this far behind.
const CHANNEL_DEPTH: usize = 16;

/// Shared slot recording why the transfer died, if it did. Lets the caller
/// distinguish a transport abort from a malformed document after the fact.
#[derive(Clone)]
#[derive(Debug)]
pub struct FetchFailure(Arc<Mutex<Option<String>>>);

impl FetchFailure {
    fn new() -> Self {
        FetchFailure(Arc::new(Mutex::new(None)))
    }

    fn set(&self, msg: String) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(msg);
        }
    }

    /// Failure message, if the transfer ended in a transport error.
    pub fn get(&self) -> Option<String> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }
}

/// `Read` over the body of an HTTP GET performed on a background thread.
///
/// Dropping the stream closes the channel, which aborts the transfer; the
/// thread exits on its own. Restart is from scratch only (no seek).
#[derive(Debug)]
pub struct ByteStream {
    rx: Receiver<Vec<u8>>,
    buf: Vec<u8>,
    pos: usize,
    failure: FetchFailure,
}

impl ByteStream {
    /// Starts the transfer thread and returns the reader end.
    pub(super) fn spawn(url: String, opts: FetchOptions) -> Self {
        let (tx, rx) = sync_channel::<Vec<u8>>(CHANNEL_DEPTH);
        let failure = FetchFailure::new();
        let failure_tx = failure.clone();

        thread::spawn(move || {
            // Hold `tx` here so the channel only closes after the failure slot
            // is filled in; the reader must never see EOF before the verdict.
            if let Err(err) = perform_get(&url, &opts, tx.clone()) {
                failure_tx.set(format!("GET {} failed: {}", url, err));
                tracing::warn!("index fetch failed: {}", err);
            }
            drop(tx);
        });

        ByteStream {
            rx,
            buf: Vec::new(),
            pos: 0,
            failure,
        }
    }

    /// Handle for checking, after the stream is consumed (or moved into a
    /// decoder), whether it ended in a transport failure.
    pub fn failure_handle(&self) -> FetchFailure {
        self.failure.clone()
    }
}

impl Read for ByteStream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        loop {
            if self.pos < self.buf.len() {
                let n = (self.buf.len() - self.pos).min(out.len());
                out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
                self.pos += n;
                return Ok(n);
            }
            match self.rx.recv() {
                Ok(chunk) => {
                    self.buf = chunk;
                    self.pos = 0;
                }
                Err(_) => {
                    // Channel closed: either clean end of body or a dead transfer.
                    if let Some(msg) = self.failure.get() {
                        return Err(io::Error::new(io::ErrorKind::Other, msg));
                    }
                    return Ok(0);
                }
            }
        }
    }
}

fn perform_get(
    url: &str,
    opts: &FetchOptions,
    tx: SyncSender<Vec<u8>>,
) -> Result<(), curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.fail_on_error(true)?; // HTTP >= 400 fails the transfer
    easy.connect_timeout(opts.connect_timeout)?;
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(move |data| {
            if tx.send(data.to_vec()).is_err() {
                return Ok(0); // reader gone, abort transfer
            }
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick_opts() -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(2),
            ..FetchOptions::default()
        }
    }

    #[test]
    fn refused_connection_reports_transport_failure() {
        // Bind then drop to get a port nothing is listening on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mut stream = ByteStream::spawn(format!("http://127.0.0.1:{}/", port), quick_opts());
        let failure = stream.failure_handle();

        let mut body = Vec::new();
        let err = stream.read_to_end(&mut body).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(failure.get().is_some());
    }
}
