use std::io;
use std::time::{Duration, Instant};

use futures::prelude::*;
use serde_yaml::Value;
use tokio_core::reactor::{Handle, Timeout};

use connectivity::{self, Connectivity, State};
use super::Monitor;

pub const MONITOR_NAME: &'static str = "interface";

const DEFAULT_INTERVAL_MS: u64 = 5000;

/// A monitor that watches the operational state of one network interface.
#[derive(Debug)]
pub struct InterfaceMonitor {
    interval: Duration,
    name: String,
}

impl InterfaceMonitor {
    pub fn new<N: Into<String>>(name: N, interval: Duration) -> Self {
        InterfaceMonitor {
            interval,
            name: name.into(),
        }
    }

    pub fn from_config(cfg: &Value) -> io::Result<Self> {
        match *cfg {
            Value::String(ref name) => {
                Ok(Self::new(name.as_str(), Duration::from_millis(DEFAULT_INTERVAL_MS)))
            },
            Value::Mapping(ref mapping) => {
                let name = mapping.get(&Value::String("name".to_owned()))
                    .and_then(|v| v.as_str())
                    .ok_or(io::Error::new(io::ErrorKind::InvalidData, "Missing interface name key."))?;
                let interval = mapping.get(&Value::String("interval_ms".to_owned()))
                    .and_then(|v| v.as_i64())
                    .map(|ms| ms as u64)
                    .unwrap_or(DEFAULT_INTERVAL_MS);

                Ok(Self::new(name, Duration::from_millis(interval)))
            },
            _ => Err(io::Error::new(io::ErrorKind::InvalidData, "Unknown configuration format")),
        }
    }
}

impl Monitor for InterfaceMonitor {
    fn listen(&mut self, handle: Handle) -> Box<Stream<Item = Connectivity, Error = io::Error>> {
        Box::new(InterfaceStream::new(self.name.clone(), self.interval, handle))
    }
}

#[derive(Debug)]
struct InterfaceStream {
    interval: Duration,
    last: Option<Connectivity>,
    name: String,
    timeout: Timeout,
}

impl InterfaceStream {
    fn new(name: String, interval: Duration, handle: Handle) -> Self {
        InterfaceStream {
            interval,
            last: None,
            name,
            timeout: Timeout::new(Duration::from_millis(0), &handle).unwrap(),
        }
    }

    fn probe(&self) -> io::Result<Connectivity> {
        match read_operstate(&self.name) {
            Ok(operstate) => Ok(connectivity_from_operstate(&self.name, &operstate)),
            // An interface that is not present is simply offline.
            Err(ref err) if err.kind() == io::ErrorKind::NotFound => {
                Ok(Connectivity::disconnected())
            },
            Err(err) => Err(err),
        }
    }
}

impl Stream for InterfaceStream {
    type Item = Connectivity;
    type Error = io::Error;

    fn poll(&mut self) -> Poll<Option<Self::Item>, Self::Error> {
        try_ready!(self.timeout.poll());
        self.timeout.reset(Instant::now() + self.interval);

        let current = self.probe()?;
        if self.last.as_ref() == Some(&current) {
            try_ready!(self.timeout.poll());

            return Ok(Async::NotReady);
        }

        self.last = Some(current.clone());
        Ok(Async::Ready(Some(current)))
    }
}

impl Drop for InterfaceStream {
    fn drop(&mut self) {
        debug!("Stopped observing interface '{}'.", self.name);
    }
}

/// Maps an interface's operational state to a connectivity snapshot.
///
/// The medium collapses to unknown as soon as the interface is no
/// longer operational.
fn connectivity_from_operstate(name: &str, operstate: &str) -> Connectivity {
    match operstate.trim() {
        "up" => Connectivity::new(State::Connected, type_for_interface(name)),
        "dormant" => Connectivity::new(State::Connecting, type_for_interface(name)),
        "down" | "lowerlayerdown" | "notpresent" => Connectivity::disconnected(),
        _ => Connectivity::new(State::Unknown, connectivity::UNKNOWN_TYPE),
    }
}

/// Derives the network medium from the interface naming scheme.
fn type_for_interface(name: &str) -> i32 {
    if name.starts_with("wl") {
        connectivity::TYPE_WIFI
    } else if name.starts_with("en") || name.starts_with("eth") {
        connectivity::TYPE_ETHERNET
    } else if name.starts_with("ww") || name.starts_with("rmnet") {
        connectivity::TYPE_MOBILE
    } else if name.starts_with("tun") || name.starts_with("utun") || name.starts_with("wg") {
        connectivity::TYPE_VPN
    } else {
        connectivity::UNKNOWN_TYPE
    }
}

#[cfg(target_os = "linux")]
fn read_operstate(name: &str) -> io::Result<String> {
    use std::fs;

    fs::read_to_string(format!("/sys/class/net/{}/operstate", name))
}

#[cfg(not(target_os = "linux"))]
fn read_operstate(name: &str) -> io::Result<String> {
    use std::process::Command;
    use std::str;

    let output = Command::new("ifconfig")
        .arg(name)
        .output()?;
    if !output.status.success() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "Interface not present"));
    }

    let status = str::from_utf8(&output.stdout)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Got non-UTF-8 output from ifconfig"))?
        .lines()
        .map(|l| l.trim())
        .find(|l| l.starts_with("status: "));

    Ok(match status {
        Some("status: active") => "up",
        Some(_) => "down",
        None => "unknown",
    }.to_owned())
}

#[cfg(test)]
mod tests {
    use connectivity::{TYPE_ETHERNET, TYPE_MOBILE, TYPE_VPN, TYPE_WIFI, UNKNOWN_TYPE};
    use super::*;

    #[test]
    fn interface_naming_schemes() {
        assert_eq!(type_for_interface("wlan0"), TYPE_WIFI);
        assert_eq!(type_for_interface("wlp3s0"), TYPE_WIFI);
        assert_eq!(type_for_interface("eth0"), TYPE_ETHERNET);
        assert_eq!(type_for_interface("enp0s31f6"), TYPE_ETHERNET);
        assert_eq!(type_for_interface("wwan0"), TYPE_MOBILE);
        assert_eq!(type_for_interface("wg0"), TYPE_VPN);
        assert_eq!(type_for_interface("lo"), UNKNOWN_TYPE);
    }

    #[test]
    fn operstate_mapping() {
        assert_eq!(
            connectivity_from_operstate("wlan0", "up\n"),
            Connectivity::new(State::Connected, TYPE_WIFI)
        );
        assert_eq!(
            connectivity_from_operstate("wlan0", "dormant"),
            Connectivity::new(State::Connecting, TYPE_WIFI)
        );
        assert_eq!(connectivity_from_operstate("wlan0", "down"), Connectivity::disconnected());
        assert_eq!(
            connectivity_from_operstate("eth0", "testing"),
            Connectivity::new(State::Unknown, UNKNOWN_TYPE)
        );
    }

    #[test]
    fn disconnected_loses_the_medium() {
        let conn = connectivity_from_operstate("wlan0", "down");

        assert_eq!(conn.net_type, UNKNOWN_TYPE);
    }

    #[test]
    fn load_cfg() {
        let cfg = Value::String("wlan0".to_owned());
        let monitor = InterfaceMonitor::from_config(&cfg).unwrap();
        assert_eq!(monitor.interval, Duration::from_millis(DEFAULT_INTERVAL_MS));

        let cfg: Value = ::serde_yaml::from_str("name: eth0\ninterval_ms: 1000").unwrap();
        let monitor = InterfaceMonitor::from_config(&cfg).unwrap();
        assert_eq!(monitor.name, "eth0");
        assert_eq!(monitor.interval, Duration::from_millis(1000));
    }

    #[test]
    #[should_panic]
    fn load_cfg_fail() {
        let cfg = Value::Bool(true);
        InterfaceMonitor::from_config(&cfg).unwrap();
    }
}
