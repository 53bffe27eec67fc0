use thiserror::Error;

/// Errors returned by the mutating operations of [`WavlTreeMap`](crate::WavlTreeMap).
///
/// Neither error changes the map.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// [`insert`](crate::WavlTreeMap::insert) was given a key that is already present.
    #[error("key is already present in the map")]
    DuplicateKey,
    /// [`delete`](crate::WavlTreeMap::delete) was given a key that is not present.
    #[error("key is not present in the map")]
    KeyNotFound,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(Error::DuplicateKey.to_string(), "key is already present in the map");
        assert_eq!(Error::KeyNotFound.to_string(), "key is not present in the map");
    }
}
