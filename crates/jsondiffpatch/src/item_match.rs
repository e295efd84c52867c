//! Element identity predicates used during diffing.

use serde_json::Value;

use crate::options::Options;

/// Identity oracle derived from the configured [`Options::object_hash`].
pub(crate) struct ItemMatch<'a> {
    hash: Option<&'a (dyn Fn(&Value) -> String + Send + Sync)>,
}

impl<'a> ItemMatch<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            hash: options.object_hash.as_deref(),
        }
    }

    /// Value identity outside array alignment: the hash when one is
    /// configured and `a` is an object (both hashes must be non-empty and
    /// equal), structural equality otherwise.
    pub fn match_value(&self, a: &Value, b: &Value) -> bool {
        if let Some(hash) = self.hash {
            if a.is_object() {
                let hash_a = hash(a);
                let hash_b = hash(b);
                return !hash_a.is_empty() && !hash_b.is_empty() && hash_a == hash_b;
            }
        }
        a == b
    }

    /// Element identity during array alignment.
    ///
    /// With a hash configured this is [`Self::match_value`]. Without one,
    /// leaves compare structurally and containers fall back to positional
    /// identity: containers at the same index are "the same element" and get
    /// recursively diffed, containers at different indices cannot be related.
    pub fn match_element(&self, a: &Value, index_a: usize, b: &Value, index_b: usize) -> bool {
        if self.hash.is_some() {
            return self.match_value(a, b);
        }
        if !a.is_object() && !a.is_array() {
            return a == b;
        }
        index_a == index_b
    }
}
