use std::fmt;

/// Network type reported when no concrete medium can be resolved.
///
/// A device that is disconnecting or fully offline usually cannot tell
/// which medium it was using anymore, so monitors fall back to this value.
pub const UNKNOWN_TYPE: i32 = -1;

/// A wireless LAN connection.
pub const TYPE_WIFI: i32 = 0;

/// A wired connection.
pub const TYPE_ETHERNET: i32 = 1;

/// A cellular data connection.
pub const TYPE_MOBILE: i32 = 2;

/// A tunnel interface (VPN, wireguard and friends).
pub const TYPE_VPN: i32 = 3;

/// Connection lifecycle state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Connecting,
    Connected,
    Suspended,
    Disconnecting,
    Disconnected,
    Unknown,
}

/// A snapshot of network connectivity at one point in time.
///
/// Values carry no identity beyond their fields. They are produced by
/// monitors and consumed immediately by filter predicates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Connectivity {
    /// The connection lifecycle state.
    pub state: State,

    /// The network medium, one of the `TYPE_*` constants or `UNKNOWN_TYPE`.
    pub net_type: i32,
}

impl Connectivity {
    pub fn new(state: State, net_type: i32) -> Self {
        Connectivity { state, net_type }
    }

    /// A disconnected snapshot. The medium is always unknown at that point.
    pub fn disconnected() -> Self {
        Connectivity::new(State::Disconnected, UNKNOWN_TYPE)
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}/{}", self.state, type_name(self.net_type))
    }
}

/// Resolves a medium name from configuration to its type identifier.
pub fn type_from_name(name: &str) -> Option<i32> {
    match name.trim() {
        "wifi" => Some(TYPE_WIFI),
        "ethernet" => Some(TYPE_ETHERNET),
        "mobile" => Some(TYPE_MOBILE),
        "vpn" => Some(TYPE_VPN),
        "unknown" => Some(UNKNOWN_TYPE),
        _ => None,
    }
}

/// The display name of a network type identifier.
pub fn type_name(net_type: i32) -> &'static str {
    match net_type {
        TYPE_WIFI => "wifi",
        TYPE_ETHERNET => "ethernet",
        TYPE_MOBILE => "mobile",
        TYPE_VPN => "vpn",
        _ => "unknown",
    }
}
