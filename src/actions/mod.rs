use std::io;

use futures::prelude::*;

pub mod command;
pub mod log;

/// Represents an action to be executed upon a connectivity transition.
pub trait Action {
    /// Asynchronously start executing the action when the watched
    /// connectivity comes up.
    fn up(&mut self) -> Box<Future<Item = (), Error = io::Error>>;

    /// Asynchronously stop executing the action when the watched
    /// connectivity goes down.
    fn down(&mut self) -> Box<Future<Item = (), Error = io::Error>>;
}
