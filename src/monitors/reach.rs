use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use futures::prelude::*;
use serde_yaml::Value;
use tokio_core::reactor::{Handle, Timeout};

use connectivity::{Connectivity, State, UNKNOWN_TYPE};
use super::Monitor;

pub const MONITOR_NAME: &'static str = "reach";

const DEFAULT_PORT: u16 = 80;
const DEFAULT_INTERVAL_MS: u64 = 5000;
const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// A monitor that checks whether a remote endpoint is reachable.
///
/// Interface state alone cannot tell whether traffic actually flows, so
/// this opens a TCP connection with a bounded timeout instead. The probe
/// cannot resolve a medium, so emitted events carry the unknown network
/// type.
#[derive(Debug)]
pub struct ReachMonitor {
    connect_timeout: Duration,
    host: String,
    interval: Duration,
    port: u16,
}

impl ReachMonitor {
    pub fn new<H: Into<String>>(host: H, port: u16) -> Self {
        ReachMonitor {
            connect_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            host: host.into(),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            port,
        }
    }

    pub fn from_config(cfg: &Value) -> io::Result<Self> {
        match *cfg {
            Value::String(ref endpoint) => {
                let (host, port) = parse_endpoint(endpoint)?;

                Ok(Self::new(host, port))
            },
            Value::Mapping(ref mapping) => {
                let host = mapping.get(&Value::String("host".to_owned()))
                    .and_then(|v| v.as_str())
                    .ok_or(io::Error::new(io::ErrorKind::InvalidData, "Missing host key."))?;
                let port = mapping.get(&Value::String("port".to_owned()))
                    .and_then(|v| v.as_i64())
                    .map(|p| p as u16)
                    .unwrap_or(DEFAULT_PORT);

                let mut monitor = Self::new(host, port);
                if let Some(ms) = mapping.get(&Value::String("interval_ms".to_owned())).and_then(|v| v.as_i64()) {
                    monitor.interval = Duration::from_millis(ms as u64);
                }
                if let Some(ms) = mapping.get(&Value::String("timeout_ms".to_owned())).and_then(|v| v.as_i64()) {
                    monitor.connect_timeout = Duration::from_millis(ms as u64);
                }

                Ok(monitor)
            },
            _ => Err(io::Error::new(io::ErrorKind::InvalidData, "Unknown configuration format")),
        }
    }
}

impl Monitor for ReachMonitor {
    fn listen(&mut self, handle: Handle) -> Box<Stream<Item = Connectivity, Error = io::Error>> {
        Box::new(ReachStream {
            connect_timeout: self.connect_timeout,
            host: self.host.clone(),
            interval: self.interval,
            last: None,
            port: self.port,
            timeout: Timeout::new(Duration::from_millis(0), &handle).unwrap(),
        })
    }
}

#[derive(Debug)]
struct ReachStream {
    connect_timeout: Duration,
    host: String,
    interval: Duration,
    last: Option<Connectivity>,
    port: u16,
    timeout: Timeout,
}

impl Stream for ReachStream {
    type Item = Connectivity;
    type Error = io::Error;

    fn poll(&mut self) -> Poll<Option<Self::Item>, Self::Error> {
        try_ready!(self.timeout.poll());
        self.timeout.reset(Instant::now() + self.interval);

        let current = probe(&self.host, self.port, self.connect_timeout);
        if self.last.as_ref() == Some(&current) {
            try_ready!(self.timeout.poll());

            return Ok(Async::NotReady);
        }

        self.last = Some(current.clone());
        Ok(Async::Ready(Some(current)))
    }
}

impl Drop for ReachStream {
    fn drop(&mut self) {
        debug!("Stopped probing '{}:{}'.", self.host, self.port);
    }
}

/// Checks whether the endpoint accepts a TCP connection.
///
/// Name resolution needs the network as well, so a resolution failure
/// reads as disconnected instead of as an error.
fn probe(host: &str, port: u16, connect_timeout: Duration) -> Connectivity {
    let addr = match (host, port).to_socket_addrs() {
        Ok(mut addrs) => addrs.next(),
        Err(_) => None,
    };

    match addr {
        Some(addr) if TcpStream::connect_timeout(&addr, connect_timeout).is_ok() => {
            Connectivity::new(State::Connected, UNKNOWN_TYPE)
        },
        _ => Connectivity::disconnected(),
    }
}

// TODO: bracketed IPv6 endpoints in the string form.
fn parse_endpoint(endpoint: &str) -> io::Result<(String, u16)> {
    let endpoint = endpoint.trim();

    match endpoint.rfind(':') {
        Some(idx) => {
            let port = endpoint[idx + 1..].parse()
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Invalid port number"))?;

            Ok((endpoint[..idx].to_owned(), port))
        },
        None => Ok((endpoint.to_owned(), DEFAULT_PORT)),
    }
}
