//! Predefined filters for streams of connectivity events.
//!
//! The constructors return plain closures, so they plug directly into
//! `Stream::filter` or can be called on single events. The returned
//! predicates are pure and hold nothing but their match criteria, making
//! them safe to evaluate repeatedly and from multiple places at once.

use connectivity::{Connectivity, State, UNKNOWN_TYPE};

/// Builds a filter that passes events whose state equals at least one of
/// the given states.
///
/// An empty state list yields a filter that rejects everything.
pub fn has_state(states: &[State]) -> impl Fn(&Connectivity) -> bool {
    let states = states.to_vec();

    move |conn| states.iter().any(|state| *state == conn.state)
}

/// Builds a filter that passes events whose network type equals at least
/// one of the given types.
///
/// The unknown network type always matches as well, so a transition to
/// "no network" stays visible to callers filtering on concrete mediums.
pub fn has_type(types: &[i32]) -> impl Fn(&Connectivity) -> bool {
    let extended_types = append_unknown_network_type_to_types(types);

    move |conn| extended_types.iter().any(|ty| *ty == conn.net_type)
}

/// Copies the given network types and appends the unknown type at the end.
///
/// A device being disconnected from a specific network usually cannot
/// resolve its concrete type anymore, so type filters have to account
/// for the unknown type as well.
pub fn append_unknown_network_type_to_types(types: &[i32]) -> Vec<i32> {
    let mut extended_types = Vec::with_capacity(types.len() + 1);
    extended_types.extend_from_slice(types);
    extended_types.push(UNKNOWN_TYPE);

    extended_types
}

#[cfg(test)]
mod tests {
    use std::io;

    use futures::prelude::*;
    use futures::stream;

    use connectivity::{TYPE_ETHERNET, TYPE_MOBILE, TYPE_WIFI};
    use super::*;

    #[test]
    fn state_matches_any_given_state() {
        let filter = has_state(&[State::Connected, State::Connecting]);

        assert!(filter(&Connectivity::new(State::Connected, TYPE_WIFI)));
        assert!(filter(&Connectivity::new(State::Connecting, TYPE_MOBILE)));
        assert!(!filter(&Connectivity::disconnected()));
        assert!(!filter(&Connectivity::new(State::Suspended, TYPE_WIFI)));
    }

    #[test]
    fn state_ignores_network_type() {
        let filter = has_state(&[State::Connected]);

        assert!(filter(&Connectivity::new(State::Connected, TYPE_WIFI)));
        assert!(filter(&Connectivity::new(State::Connected, UNKNOWN_TYPE)));
    }

    #[test]
    fn empty_states_reject_everything() {
        let filter = has_state(&[]);

        assert!(!filter(&Connectivity::new(State::Connected, TYPE_WIFI)));
        assert!(!filter(&Connectivity::new(State::Unknown, UNKNOWN_TYPE)));
        assert!(!filter(&Connectivity::disconnected()));
    }

    #[test]
    fn type_matches_any_given_type() {
        let filter = has_type(&[TYPE_WIFI, TYPE_MOBILE]);

        assert!(filter(&Connectivity::new(State::Connected, TYPE_WIFI)));
        assert!(filter(&Connectivity::new(State::Connected, TYPE_MOBILE)));
        assert!(!filter(&Connectivity::new(State::Connected, TYPE_ETHERNET)));
    }

    #[test]
    fn type_matches_disconnection_via_unknown() {
        let filter = has_type(&[TYPE_WIFI, TYPE_MOBILE]);

        assert!(filter(&Connectivity::disconnected()));
    }

    #[test]
    fn empty_types_match_only_unknown() {
        let filter = has_type(&[]);

        assert!(filter(&Connectivity::disconnected()));
        assert!(filter(&Connectivity::new(State::Connected, UNKNOWN_TYPE)));
        assert!(!filter(&Connectivity::new(State::Connected, TYPE_WIFI)));
    }

    #[test]
    fn appends_unknown_type_last() {
        let extended = append_unknown_network_type_to_types(&[TYPE_WIFI, TYPE_ETHERNET]);

        assert_eq!(extended, vec![TYPE_WIFI, TYPE_ETHERNET, UNKNOWN_TYPE]);
    }

    #[test]
    fn appended_length_is_input_length_plus_one() {
        for len in 0..5 {
            let types = vec![TYPE_MOBILE; len];
            assert_eq!(append_unknown_network_type_to_types(&types).len(), len + 1);
        }
    }

    #[test]
    fn appends_unknown_type_even_if_already_present() {
        let extended = append_unknown_network_type_to_types(&[UNKNOWN_TYPE]);

        assert_eq!(extended, vec![UNKNOWN_TYPE, UNKNOWN_TYPE]);
    }

    #[test]
    fn append_does_not_mutate_input() {
        let types = vec![TYPE_WIFI, TYPE_MOBILE];

        let first = append_unknown_network_type_to_types(&types);
        let second = append_unknown_network_type_to_types(&types);

        assert_eq!(types, vec![TYPE_WIFI, TYPE_MOBILE]);
        assert_eq!(first, second);
    }

    #[test]
    fn filters_an_event_stream() {
        let events = vec![
            Connectivity::new(State::Connected, TYPE_WIFI),
            Connectivity::new(State::Connected, TYPE_ETHERNET),
            Connectivity::disconnected(),
        ];

        let filtered = stream::iter_ok::<_, io::Error>(events)
            .filter(has_type(&[TYPE_WIFI]))
            .collect()
            .wait()
            .unwrap();

        assert_eq!(filtered, vec![
            Connectivity::new(State::Connected, TYPE_WIFI),
            Connectivity::disconnected(),
        ]);
    }

    #[test]
    fn chained_state_and_type_filters() {
        let events = vec![
            Connectivity::new(State::Connecting, TYPE_WIFI),
            Connectivity::new(State::Connected, TYPE_WIFI),
            Connectivity::new(State::Connected, TYPE_MOBILE),
            Connectivity::disconnected(),
        ];

        let filtered = stream::iter_ok::<_, io::Error>(events)
            .filter(has_state(&[State::Connected]))
            .filter(has_type(&[TYPE_WIFI]))
            .collect()
            .wait()
            .unwrap();

        assert_eq!(filtered, vec![Connectivity::new(State::Connected, TYPE_WIFI)]);
    }
}
