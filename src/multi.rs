//! A wrapper for configuration values that can be given either as a
//! single item or as a list of items.
//!
//! Profiles use this in several places so that the common case stays
//! short. A single watched state can be written directly:
//!
//! ```yaml
//! states: connected
//! ```
//!
//! while several states become a list:
//!
//! ```yaml
//! states:
//!  - connecting
//!  - connected
//! ```

/// A value that occurs either once or multiple times.
///
/// Serialized without a tag, so the single form is indistinguishable
/// from the plain value and the multiple form from a plain list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Multi<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> Multi<T> {
    pub fn is_multiple(&self) -> bool {
        match *self {
            Multi::Multiple(_) => true,
            Multi::Single(_) => false,
        }
    }

    pub fn is_single(&self) -> bool {
        !self.is_multiple()
    }

    /// The number of contained items. The single form always counts one.
    pub fn len(&self) -> usize {
        match *self {
            Multi::Multiple(ref items) => items.len(),
            Multi::Single(_) => 1,
        }
    }

    /// Normalizes into a plain vector, wrapping a single value.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Multi::Multiple(items) => items,
            Multi::Single(item) => vec![item],
        }
    }

    pub fn unwrap_multiple(self) -> Vec<T> {
        match self {
            Multi::Multiple(items) => items,
            _ => panic!("unwrap_multiple called on Multi with single value"),
        }
    }

    pub fn unwrap_single(self) -> T {
        match self {
            Multi::Single(item) => item,
            _ => panic!("unwrap_single called on Multi with multiple values"),
        }
    }
}

impl<T> IntoIterator for Multi<T> {
    type Item = T;
    type IntoIter = ::std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterate_multiple_values() {
        let multi = Multi::Multiple(vec![1, 2, 3]);

        assert_eq!(multi.len(), 3);
        assert_eq!(multi.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn iterate_single_value() {
        let multi = Multi::Single(1);

        assert_eq!(multi.len(), 1);
        assert_eq!(multi.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn normalizes_into_vec() {
        assert_eq!(Multi::Single("a").into_vec(), vec!["a"]);
        assert_eq!(Multi::Multiple(vec!["a", "b"]).into_vec(), vec!["a", "b"]);
        assert_eq!(Multi::Multiple(Vec::<i32>::new()).into_vec(), Vec::<i32>::new());
    }
}
