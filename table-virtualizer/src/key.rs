use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// A map keyed by column key.
///
/// Uses `HashMap` with `std` and `BTreeMap` otherwise.
#[cfg(feature = "std")]
pub type KeyMap<V> = HashMap<String, V>;
#[cfg(not(feature = "std"))]
pub type KeyMap<V> = BTreeMap<String, V>;
