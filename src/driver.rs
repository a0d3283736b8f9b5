use std::io;

use futures::future;
use futures::prelude::*;
use futures_stream_select_all::select_all;
use serde_yaml::Value;
use tokio_core::reactor::Handle;

use actions::Action;
use actions::command::{ACTION_NAME as COMMAND_ACTION_NAME, CommandAction};
use actions::log::{ACTION_NAME as LOG_ACTION_NAME, LogAction};
use config::{MonitorBehavior, Profile};
use connectivity;
use monitors::Monitor;
use monitors::interface::{MONITOR_NAME as INTERFACE_MONITOR_NAME, InterfaceMonitor};
use monitors::reach::{MONITOR_NAME as REACH_MONITOR_NAME, ReachMonitor};
use predicate;

/// Drives the given profile, observing connectivity through its
/// monitors and running actions whenever the filtered connectivity
/// comes up or goes down.
pub fn drive(profile: Profile, handle: Handle) -> io::Result<Box<Future<Item = (), Error = ()>>> {
    let mut actions = profile.actions.iter()
        .map(|(key, config)| get_action(key, config))
        .collect::<io::Result<Vec<Box<Action>>>>()?;

    let monitor_count = profile.monitors.len();
    let h = handle.clone();
    let monitor_streams = profile.monitors.iter()
        .map(|(key, config)| get_monitor(key, config))
        .collect::<io::Result<Vec<Box<Monitor>>>>()?
        .into_iter()
        .enumerate()
        .map(move |(index, mut monitor)| {
            // Tag events with their source so per-monitor match state
            // survives the merge.
            monitor.listen(h.clone()).map(move |conn| (index, conn))
        });

    let state_filter = match profile.states {
        Some(states) => Some(predicate::has_state(&states.into_vec())),
        None => None,
    };
    let type_filter = match profile.types {
        Some(names) => {
            let types = names.into_vec()
                .iter()
                .map(|name| {
                    connectivity::type_from_name(name).ok_or(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("Unknown network type '{}'.", name),
                    ))
                })
                .collect::<io::Result<Vec<i32>>>()?;

            Some(predicate::has_type(&types))
        },
        None => None,
    };

    let name = profile.name;
    let behavior = profile.monitor_behavior;
    let mut matched = vec![false; monitor_count];
    let mut was_up = false;

    let driver = select_all(monitor_streams)
        .for_each(move |(index, conn)| {
            let passes = state_filter.as_ref().map(|f| f(&conn)).unwrap_or(true) &&
                type_filter.as_ref().map(|f| f(&conn)).unwrap_or(true);
            matched[index] = passes;

            let is_up = combine_matches(behavior, &matched);
            if is_up == was_up {
                return Box::new(future::ok(())) as Box<Future<Item = (), Error = io::Error>>;
            }
            was_up = is_up;

            info!(
                "Profile '{}' went {} on {}.",
                name,
                if is_up { "up" } else { "down" },
                conn,
            );

            let transition_all = actions.iter_mut()
                .map(|act| if is_up { act.up() } else { act.down() })
                .collect::<Vec<_>>();
            let fut = future::join_all(transition_all)
                .map(|_| ());

            Box::new(fut) as Box<Future<Item = (), Error = io::Error>>
        })
        .map_err(|err| error!("Experienced error while driving profile: {:?}.", err));

    Ok(Box::new(driver))
}

/// Combines per-monitor match results into a single up/down level.
fn combine_matches(behavior: MonitorBehavior, matched: &[bool]) -> bool {
    match behavior {
        MonitorBehavior::And => matched.iter().all(|m| *m),
        MonitorBehavior::Or => matched.iter().any(|m| *m),
    }
}

fn get_action(name: &str, config: &Value) -> io::Result<Box<Action>> {
    match name.trim() {
        COMMAND_ACTION_NAME => Ok(Box::new(CommandAction::from_config(config)?)),
        LOG_ACTION_NAME => Ok(Box::new(LogAction::from_config(config)?)),

        _ => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Unknown action name '{}'.", name),
        ))
    }
}

fn get_monitor(name: &str, config: &Value) -> io::Result<Box<Monitor>> {
    match name.trim() {
        INTERFACE_MONITOR_NAME => Ok(Box::new(InterfaceMonitor::from_config(config)?)),
        REACH_MONITOR_NAME => Ok(Box::new(ReachMonitor::from_config(config)?)),

        _ => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Unknown monitor name '{}'.", name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_needs_all_monitors() {
        assert!(combine_matches(MonitorBehavior::And, &[true, true]));
        assert!(!combine_matches(MonitorBehavior::And, &[true, false]));
        assert!(combine_matches(MonitorBehavior::And, &[]));
    }

    #[test]
    fn or_needs_one_monitor() {
        assert!(combine_matches(MonitorBehavior::Or, &[false, true]));
        assert!(!combine_matches(MonitorBehavior::Or, &[false, false]));
        assert!(!combine_matches(MonitorBehavior::Or, &[]));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(get_action("teleport", &Value::Null).is_err());
        assert!(get_monitor("carrier-pigeon", &Value::Null).is_err());
    }
}
