use std::{
  io,
  sync::{Arc, Mutex},
};

/// Shared in-memory sink for the log formatter.
#[derive(Clone, Debug, Default)]
pub(super) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
  pub(super) fn lines(&self) -> Vec<String> {
    String::from_utf8_lossy(&self.0.lock().unwrap()).lines().map(str::to_owned).collect()
  }
}

impl io::Write for LogBuffer {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().map_err(|_| io::Error::other("poisoned log buffer"))?.extend_from_slice(buf);

    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}
