//! Unique model names
//!
//! Every model in a world needs a distinct name. A [`NameGenerator`] hands
//! out `<Kind>_<n>` names from a monotonic counter shared by all kinds, so
//! two generators never interfere and a fresh generator always starts at 0.

/// Monotonic counter producing model names
#[derive(Clone, Debug, Default)]
pub struct NameGenerator {
    next_id: u64,
}

impl NameGenerator {
    /// Create a generator starting at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose first identifier is `first`
    ///
    /// Useful when appending to a world whose names were issued elsewhere.
    pub fn starting_at(first: u64) -> Self {
        Self { next_id: first }
    }

    /// Take the next identifier
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take the next name for a shape kind, e.g. `Box_0`
    pub fn next_name(&mut self, kind: &str) -> String {
        format!("{}_{}", kind, self.next_id())
    }

    /// Move past the numeric suffix of a `<Kind>_<n>` name issued elsewhere
    ///
    /// Names without a numeric suffix, or with one already behind the
    /// counter, leave the generator unchanged.
    pub fn reserve(&mut self, name: &str) {
        let suffix = name.rsplit_once('_').and_then(|(_, n)| n.parse::<u64>().ok());
        if let Some(id) = suffix {
            if id >= self.next_id {
                self.next_id = id.saturating_add(1);
            }
        }
    }

    /// Number of identifiers handed out so far (for a generator started at 0)
    pub fn peek(&self) -> u64 {
        self.next_id
    }
}
