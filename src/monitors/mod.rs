use std::io;

use futures::prelude::*;
use tokio_core::reactor::Handle;

use connectivity::Connectivity;

pub mod interface;
pub mod reach;

/// A source of network connectivity events.
pub trait Monitor {
    /// Start observing and emit the current connectivity followed by
    /// every change.
    fn listen(&mut self, handle: Handle) -> Box<Stream<Item = Connectivity, Error = io::Error>>;
}
