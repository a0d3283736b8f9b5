use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use serde_yaml;

use connectivity::{self, State};
use multi::Multi;

/// Configuration.
pub type Config = Multi<Profile>;

/// A watched connectivity profile.
///
/// A profile combines one or more connectivity monitors with filter
/// criteria and the actions to run when the filtered connectivity comes
/// up or goes down.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The actions to run on connectivity transitions.
    pub actions: HashMap<String, serde_yaml::Value>,

    /// The name of the profile, used in log output.
    #[serde(default)]
    pub name: String,

    /// Connectivity event sources.
    pub monitors: HashMap<String, serde_yaml::Value>,

    /// How matches from several monitors combine.
    #[serde(default)]
    pub monitor_behavior: MonitorBehavior,

    /// Connection states the profile matches on. Omitted means any state.
    #[serde(default)]
    pub states: Option<Multi<State>>,

    /// Network medium names the profile matches on. Omitted means any
    /// medium. The unknown medium always matches implicitly, so
    /// disconnections remain visible.
    #[serde(default)]
    pub types: Option<Multi<String>>,
}

/// Specifys whether _all_ monitors have to match the profile's criteria
/// or just one for the profile to be considered up.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorBehavior {
    /// All monitors have to match.
    ///
    /// This is the default.
    And,

    /// One matching monitor is enough.
    Or,
}

/// The ways a profile configuration can be invalid.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    MissingMonitors,
    MissingActions,
    UnknownNetworkType(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Multi::Single(ref profile) => profile.validate(),
            Multi::Multiple(ref profiles) => {
                for profile in profiles {
                    if let Err(err) = profile.validate() {
                        return Err(err);
                    }
                }

                Ok(())
            },
        }
    }
}

impl Profile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.monitors.len() == 0 {
            return Err(ValidationError::MissingMonitors);
        }

        if self.actions.len() == 0 {
            return Err(ValidationError::MissingActions);
        }

        match self.types {
            Some(Multi::Single(ref name)) => validate_type_name(name)?,
            Some(Multi::Multiple(ref names)) => {
                for name in names {
                    validate_type_name(name)?;
                }
            },
            None => {},
        }

        Ok(())
    }
}

fn validate_type_name(name: &str) -> Result<(), ValidationError> {
    match connectivity::type_from_name(name) {
        Some(_) => Ok(()),
        None => Err(ValidationError::UnknownNetworkType(name.to_owned())),
    }
}

impl Default for MonitorBehavior {
    fn default() -> Self {
        MonitorBehavior::And
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ValidationError::MissingActions => write!(f, "Missing actions to run"),
            ValidationError::MissingMonitors => write!(f, "Missing connectivity monitors"),
            ValidationError::UnknownNetworkType(ref name) => {
                write!(f, "Unknown network type '{}'", name)
            },
        }
    }
}

impl Error for ValidationError {}
