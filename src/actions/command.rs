use std::io;
use std::process::{Child, Command, Stdio};

use futures::future;
use futures::prelude::*;
use serde_yaml::Value;

use super::Action;

pub const ACTION_NAME: &'static str = "command";

/// An action that executes a shell command when connectivity comes up.
///
/// The launched process is killed when connectivity goes down or the
/// `CommandAction` is dropped.
#[derive(Debug)]
pub struct CommandAction {
    child: Option<Child>,
    up_command: Command,
    down_command: Option<Command>,
}

impl CommandAction {
    pub fn new(up_command: &str, down_command: Option<&str>) -> Self {
        CommandAction {
            child: None,
            up_command: Self::command_from_line(up_command),
            down_command: down_command.map(Self::command_from_line),
        }
    }

    pub fn from_config(value: &Value) -> io::Result<Self> {
        match *value {
            Value::String(ref cmd) => Ok(Self::new(cmd.as_ref(), None)),
            Value::Mapping(ref mapping) => {
                let up = mapping.get(&Value::String("up".to_owned()))
                    .and_then(|v| v.as_str())
                    .ok_or(io::Error::new(io::ErrorKind::InvalidData, "Missing up command key."))?;
                let down = mapping.get(&Value::String("down".to_owned()))
                    .and_then(|v| v.as_str());

                Ok(Self::new(up, down))
            },
            _ => Err(io::Error::new(io::ErrorKind::InvalidData, "Unknown configuration format"))
        }
    }

    fn command_from_line(line: &str) -> Command {
        let mut parts = line.trim()
            .split(" ")
            .filter(|part| part.len() > 0);
        let command_name = parts.next()
            .expect("Missing command name.");

        let mut command = Command::new(command_name);
        command.args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        command
    }

    fn up_impl(&mut self) -> io::Result<()> {
        self.child = Some(self.up_command.spawn()?);

        Ok(())
    }

    fn down_impl(&mut self) -> io::Result<()> {
        if let Some(mut child) = self.child.take() {
            child.kill()?;
        }
        if let Some(ref mut cmd) = self.down_command {
            cmd.spawn()?.wait()?;
        }

        Ok(())
    }
}

impl Action for CommandAction {
    fn up(&mut self) -> Box<Future<Item = (), Error = io::Error>> {
        Box::new(future::result(self.up_impl()))
    }

    fn down(&mut self) -> Box<Future<Item = (), Error = io::Error>> {
        Box::new(future::result(self.down_impl()))
    }
}

impl Drop for CommandAction {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
        }
    }
}
