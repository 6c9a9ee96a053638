//! Generalized FizzBuzz sequence generation.
//!
//! This module provides [`SequenceSpec`], the parameter tuple for a
//! substitution sequence, and the generation logic that maps it to an
//! ordered list of strings.
//!
//! Generation is a pure function of the spec: no shared state, no I/O,
//! identical output for identical input on every call. Recording how often
//! a given spec is requested is a separate concern handled by
//! [`store`](crate::store).

use std::fmt;

/// Parameters for one substitution sequence.
///
/// For every `i` in `1..=limit` the generated element is:
///
/// - `replacement1` if `i` is a multiple of `divisor1`, concatenated with
/// - `replacement2` if `i` is a multiple of `divisor2`,
/// - or the decimal form of `i` when neither divides it.
///
/// A multiple of both divisors therefore yields the two replacements glued
/// together, in order.
///
/// # Validation
///
/// Bounds are enforced by the caller before a spec is constructed:
/// divisors must be at least 1 (a zero divisor would make the modulo
/// undefined), `limit` is expected in `1..=10000`, and the replacement
/// strings are expected to be at most 50 characters. Generation itself does
/// not re-check any of this.
///
/// # Examples
///
/// ```rust
/// use ritornello::sequence::SequenceSpec;
///
/// let spec = SequenceSpec::new(3, 5, 15, "fizz", "buzz");
/// let lines = spec.generate();
///
/// assert_eq!(lines.len(), 15);
/// assert_eq!(lines[2], "fizz");
/// assert_eq!(lines[4], "buzz");
/// assert_eq!(lines[14], "fizzbuzz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSpec {
    /// First divisor, at least 1.
    pub divisor1: u32,
    /// Second divisor, at least 1.
    pub divisor2: u32,
    /// Number of elements to generate, counted from 1.
    pub limit: u32,
    /// Replacement emitted for multiples of `divisor1`.
    pub replacement1: String,
    /// Replacement emitted for multiples of `divisor2`.
    pub replacement2: String,
}

impl SequenceSpec {
    /// Creates a new sequence spec.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ritornello::sequence::SequenceSpec;
    ///
    /// let spec = SequenceSpec::new(3, 5, 10, "fizz", "buzz");
    /// assert_eq!(spec.limit, 10);
    /// ```
    pub fn new(
        divisor1: u32,
        divisor2: u32,
        limit: u32,
        replacement1: impl Into<String>,
        replacement2: impl Into<String>,
    ) -> Self {
        Self {
            divisor1,
            divisor2,
            limit,
            replacement1: replacement1.into(),
            replacement2: replacement2.into(),
        }
    }

    /// Renders the element at position `i` (1-based).
    fn line(&self, i: u32) -> String {
        let mut out = String::new();
        if i % self.divisor1 == 0 {
            out.push_str(&self.replacement1);
        }
        if i % self.divisor2 == 0 {
            out.push_str(&self.replacement2);
        }
        if out.is_empty() {
            out = i.to_string();
        }
        out
    }

    /// Returns a lazy iterator over the sequence elements.
    ///
    /// Useful when the elements are streamed out (e.g. written line by line)
    /// rather than collected; [`generate`](Self::generate) is this iterator
    /// collected into a `Vec`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ritornello::sequence::SequenceSpec;
    ///
    /// let spec = SequenceSpec::new(2, 3, 6, "even", "triple");
    /// let sixth = spec.iter().last().unwrap();
    /// assert_eq!(sixth, "eventriple");
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.limit).map(|i| self.line(i))
    }

    /// Generates the full sequence, exactly `limit` elements long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ritornello::sequence::SequenceSpec;
    ///
    /// let lines = SequenceSpec::new(3, 5, 10, "fizz", "buzz").generate();
    /// assert_eq!(
    ///     lines,
    ///     ["1", "2", "fizz", "4", "buzz", "fizz", "7", "8", "fizz", "buzz"]
    /// );
    /// ```
    pub fn generate(&self) -> Vec<String> {
        self.iter().collect()
    }
}

impl fmt::Display for SequenceSpec {
    /// Formats the spec as its canonical query form, e.g.
    /// `int1=3&int2=5&limit=10&str1=fizz&str2=buzz`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "int1={}&int2={}&limit={}&str1={}&str2={}",
            self.divisor1, self.divisor2, self.limit, self.replacement1, self.replacement2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_fizzbuzz() {
        let lines = SequenceSpec::new(3, 5, 10, "fizz", "buzz").generate();
        assert_eq!(
            lines,
            ["1", "2", "fizz", "4", "buzz", "fizz", "7", "8", "fizz", "buzz"]
        );
    }

    #[test]
    fn test_length_equals_limit() {
        for (d1, d2, limit) in [(1, 1, 1), (3, 5, 10), (7, 11, 100), (2, 2, 10000)] {
            let spec = SequenceSpec::new(d1, d2, limit, "a", "b");
            assert_eq!(spec.generate().len(), limit as usize);
        }
    }

    #[test]
    fn test_first_divisor_only_positions() {
        let spec = SequenceSpec::new(3, 5, 30, "fizz", "buzz");
        let lines = spec.generate();
        for i in 1..=30u32 {
            if i % 3 == 0 && i % 5 != 0 {
                assert_eq!(lines[(i - 1) as usize], "fizz", "position {i}");
            }
        }
    }

    #[test]
    fn test_second_divisor_only_positions() {
        let spec = SequenceSpec::new(3, 5, 30, "fizz", "buzz");
        let lines = spec.generate();
        for i in 1..=30u32 {
            if i % 3 != 0 && i % 5 == 0 {
                assert_eq!(lines[(i - 1) as usize], "buzz", "position {i}");
            }
        }
    }

    #[test]
    fn test_passthrough_positions() {
        let spec = SequenceSpec::new(3, 5, 30, "fizz", "buzz");
        let lines = spec.generate();
        for i in 1..=30u32 {
            if i % 3 != 0 && i % 5 != 0 {
                assert_eq!(lines[(i - 1) as usize], i.to_string(), "position {i}");
            }
        }
    }

    #[test]
    fn test_both_divisors_concatenate_in_order() {
        let spec = SequenceSpec::new(2, 3, 6, "ab", "cd");
        assert_eq!(spec.generate()[5], "abcd");
    }

    #[test]
    fn test_divisor_one_replaces_everything() {
        let lines = SequenceSpec::new(1, 7, 5, "x", "y").generate();
        assert_eq!(lines, vec!["x"; 5]);
    }

    #[test]
    fn test_same_divisor_twice() {
        let lines = SequenceSpec::new(2, 2, 4, "a", "b").generate();
        assert_eq!(lines, ["1", "ab", "3", "ab"]);
    }

    #[test]
    fn test_empty_replacements_fall_through_to_decimal() {
        // The decimal fallback triggers on an empty line, so empty
        // replacements leave every position as its number.
        let lines = SequenceSpec::new(2, 3, 6, "", "").generate();
        assert_eq!(lines, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_limit_one() {
        let lines = SequenceSpec::new(3, 5, 1, "fizz", "buzz").generate();
        assert_eq!(lines, ["1"]);
    }

    #[test]
    fn test_deterministic() {
        let spec = SequenceSpec::new(4, 6, 50, "quat", "sest");
        assert_eq!(spec.generate(), spec.generate());
    }

    #[test]
    fn test_iter_matches_generate() {
        let spec = SequenceSpec::new(3, 4, 24, "tri", "quad");
        let collected: Vec<String> = spec.iter().collect();
        assert_eq!(collected, spec.generate());
    }

    #[test]
    fn test_display() {
        let spec = SequenceSpec::new(3, 5, 10, "fizz", "buzz");
        assert_eq!(spec.to_string(), "int1=3&int2=5&limit=10&str1=fizz&str2=buzz");
    }
}
