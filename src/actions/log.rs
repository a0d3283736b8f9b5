use std::io;

use futures::future;
use futures::prelude::*;
use serde_yaml::Value;

use super::Action;

pub const ACTION_NAME: &'static str = "log";

/// An action that writes a log line on connectivity transitions.
#[derive(Debug)]
pub struct LogAction {
    up_message: String,
    down_message: String,
}

impl LogAction {
    pub fn new<U: Into<String>, D: Into<String>>(up_message: U, down_message: D) -> Self {
        LogAction {
            up_message: up_message.into(),
            down_message: down_message.into(),
        }
    }

    pub fn from_config(value: &Value) -> io::Result<Self> {
        match *value {
            Value::Null => Ok(Self::default()),
            Value::String(ref msg) => Ok(Self::new(msg.as_str(), Self::default().down_message)),
            Value::Mapping(ref mapping) => {
                let default = Self::default();
                let up = mapping.get(&Value::String("up".to_owned()))
                    .and_then(|v| v.as_str())
                    .unwrap_or(&default.up_message);
                let down = mapping.get(&Value::String("down".to_owned()))
                    .and_then(|v| v.as_str())
                    .unwrap_or(&default.down_message);

                Ok(Self::new(up, down))
            },
            _ => Err(io::Error::new(io::ErrorKind::InvalidData, "Unknown configuration format")),
        }
    }
}

impl Default for LogAction {
    fn default() -> Self {
        Self::new("Connectivity is up.", "Connectivity is down.")
    }
}

impl Action for LogAction {
    fn up(&mut self) -> Box<Future<Item = (), Error = io::Error>> {
        info!("{}", self.up_message);

        Box::new(future::ok(()))
    }

    fn down(&mut self) -> Box<Future<Item = (), Error = io::Error>> {
        info!("{}", self.down_message);

        Box::new(future::ok(()))
    }
}
