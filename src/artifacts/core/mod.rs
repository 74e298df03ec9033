//! Terminal output helpers
//!
//! `log` can print a long history; when stdout is a terminal its output goes
//! through the `minus` pager instead of straight to stdout.

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable disabling the pager
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// Whether output should be paged: stdout is a terminal and `NO_PAGER` is unset
pub fn should_page() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_none() && io::stdout().is_terminal()
}

/// `Write` adapter feeding text into a `minus` pager
///
/// Writes may split a multi-byte character; the incomplete tail is held back
/// until the rest of it arrives.
pub struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    fn push_valid_prefix(&mut self) -> io::Result<()> {
        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            // error_len() is None only for a truncated sequence at the end
            Err(error) if error.error_len().is_none() => error.valid_up_to(),
            Err(error) => return Err(io::Error::new(io::ErrorKind::InvalidData, error)),
        };

        let rest = self.pending.split_off(valid_up_to);
        let text = String::from_utf8(std::mem::replace(&mut self.pending, rest))
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        if !text.is_empty() {
            self.pager.push_str(text).map_err(io::Error::other)?;
        }

        Ok(())
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.push_valid_prefix()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.push_valid_prefix()
    }
}
