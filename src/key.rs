//! Canonical request keys for hit counting.
//!
//! Every distinct parameter combination is identified by a deterministic
//! string key of the form `name=value&name=value&…`, built from an ordered
//! list of `(name, value)` pairs. Two requests that stringify identically
//! produce byte-identical keys, regardless of the original value types, so
//! counts aggregate by canonical form rather than by type.
//!
//! The key for a sequence request uses the fixed field order
//! [`FIELD_NAMES`]: `int1`, `int2`, `limit`, `str1`, `str2`.
//!
//! # Examples
//!
//! ```rust
//! use ritornello::key::CounterKey;
//! use ritornello::sequence::SequenceSpec;
//!
//! let key = CounterKey::from_spec(&SequenceSpec::new(3, 5, 10, "fizz", "buzz"));
//! assert_eq!(key.as_str(), "int1=3&int2=5&limit=10&str1=fizz&str2=buzz");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::sequence::SequenceSpec;

/// Fixed field order for sequence-request keys.
///
/// Positional values beyond this list get the synthetic name `field{index}`;
/// see [`CounterKey::from_values`].
pub const FIELD_NAMES: [&str; 5] = ["int1", "int2", "limit", "str1", "str2"];

/// A scalar value that can appear in a counter key.
///
/// The canonical string form is the decimal representation for the integer
/// variants and the literal text for [`Text`](FieldValue::Text). Keys compare
/// by canonical form only: `Unsigned(5)` and `Text("5")` in the same position
/// produce the same key.
///
/// # Examples
///
/// ```rust
/// use ritornello::key::FieldValue;
///
/// assert_eq!(FieldValue::Unsigned(42).to_string(), "42");
/// assert_eq!(FieldValue::Signed(-7).to_string(), "-7");
/// assert_eq!(FieldValue::from("fizz").to_string(), "fizz");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// An unsigned integer value.
    Unsigned(u64),
    /// A signed integer value.
    Signed(i64),
    /// A literal text value.
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unsigned(v) => write!(f, "{}", v),
            FieldValue::Signed(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Unsigned(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Unsigned(v as u64)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Signed(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Signed(v as i64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// Canonical key for one distinct parameter combination.
///
/// A key carries both the ordered `(name, value)` pairs (needed by backends
/// that key on label values, such as the Prometheus one) and the precomputed
/// canonical string (needed by backends that key on the joined form).
///
/// Construction paths, from most to least structured:
///
/// - [`from_spec`](Self::from_spec) - the typed, fixed-arity path used for
///   sequence requests;
/// - [`from_pairs`](Self::from_pairs) - explicit pre-paired entries, for
///   callers with a different field vocabulary;
/// - [`from_values`](Self::from_values) - ordered positional scalars paired
///   with [`FIELD_NAMES`], falling back to `field{index}` names when more
///   values than names are supplied.
///
/// Equality and hashing are by canonical string.
///
/// # Examples
///
/// ```rust
/// use ritornello::key::{CounterKey, FieldValue};
///
/// let by_value = CounterKey::from_values([
///     FieldValue::from(3u32),
///     FieldValue::from(5u32),
///     FieldValue::from(10u32),
///     FieldValue::from("fizz"),
///     FieldValue::from("buzz"),
/// ]);
///
/// let by_pair = CounterKey::from_pairs([
///     ("int1", FieldValue::from(3u32)),
///     ("int2", FieldValue::from(5u32)),
///     ("limit", FieldValue::from(10u32)),
///     ("str1", FieldValue::from("fizz")),
///     ("str2", FieldValue::from("buzz")),
/// ]);
///
/// assert_eq!(by_value, by_pair);
/// ```
#[derive(Debug, Clone)]
pub struct CounterKey {
    pairs: Vec<(String, String)>,
    canonical: String,
}

impl CounterKey {
    fn from_pair_list(pairs: Vec<(String, String)>) -> Self {
        let canonical = pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");
        Self { pairs, canonical }
    }

    /// Builds the key for a sequence request.
    ///
    /// The five parameters are paired with [`FIELD_NAMES`] in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ritornello::key::CounterKey;
    /// use ritornello::sequence::SequenceSpec;
    ///
    /// let key = CounterKey::from_spec(&SequenceSpec::new(2, 7, 14, "due", "sette"));
    /// assert_eq!(key.as_str(), "int1=2&int2=7&limit=14&str1=due&str2=sette");
    /// ```
    pub fn from_spec(spec: &SequenceSpec) -> Self {
        Self::from_values([
            FieldValue::from(spec.divisor1),
            FieldValue::from(spec.divisor2),
            FieldValue::from(spec.limit),
            FieldValue::from(spec.replacement1.clone()),
            FieldValue::from(spec.replacement2.clone()),
        ])
    }

    /// Builds a key from ordered positional values.
    ///
    /// Value `i` is paired with the `i`-th entry of [`FIELD_NAMES`]. When
    /// more values than names are supplied, the excess positions get the
    /// synthetic name `field{index}` instead. No current caller varies the
    /// arity; prefer [`from_pairs`](Self::from_pairs) for other vocabularies.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ritornello::key::{CounterKey, FieldValue};
    ///
    /// let key = CounterKey::from_values([FieldValue::from(1u32), FieldValue::from("a")]);
    /// assert_eq!(key.as_str(), "int1=1&int2=a");
    /// ```
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = FieldValue>,
    {
        let pairs = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let name = match FIELD_NAMES.get(i) {
                    Some(name) => (*name).to_string(),
                    None => format!("field{}", i),
                };
                (name, value.to_string())
            })
            .collect();
        Self::from_pair_list(pairs)
    }

    /// Builds a key from explicit `(name, value)` entries.
    ///
    /// The entries are kept in the order supplied; callers that need
    /// deterministic keys must supply a fixed order themselves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ritornello::key::{CounterKey, FieldValue};
    ///
    /// let key = CounterKey::from_pairs([
    ///     ("region", FieldValue::from("eu-south")),
    ///     ("shard", FieldValue::from(4u32)),
    /// ]);
    /// assert_eq!(key.as_str(), "region=eu-south&shard=4");
    /// ```
    pub fn from_pairs<N, I>(pairs: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, FieldValue)>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value.to_string()))
            .collect();
        Self::from_pair_list(pairs)
    }

    /// Returns the canonical string form of the key.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Returns the ordered `(name, value)` pairs.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns the values in field order, without their names.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, value)| value.as_str())
    }

    /// Consumes the key and returns the canonical string.
    pub fn into_string(self) -> String {
        self.canonical
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl PartialEq for CounterKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for CounterKey {}

impl Hash for CounterKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl From<&SequenceSpec> for CounterKey {
    fn from(spec: &SequenceSpec) -> Self {
        CounterKey::from_spec(spec)
    }
}
