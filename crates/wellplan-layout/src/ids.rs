//! Identifier generation for synthetic plate-choice and plate IDs.

use std::collections::HashSet;

use uuid::Uuid;

/// Source of process-unique string identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `{prefix}-1`, `{prefix}-2`, ... identifiers.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("plate")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Wraps another generator and never hands out a reserved ID.
///
/// Seeded with the request's explicit plate IDs so generated choice and
/// plate IDs cannot collide with them.
pub struct ReservedIds<'a> {
    inner: &'a mut dyn IdGenerator,
    reserved: HashSet<String>,
}

impl<'a> ReservedIds<'a> {
    pub fn new<I, S>(inner: &'a mut dyn IdGenerator, reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner,
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_reserved(&self, id: &str) -> bool {
        self.reserved.contains(id)
    }
}

impl IdGenerator for ReservedIds<'_> {
    fn next_id(&mut self) -> String {
        loop {
            let id = self.inner.next_id();
            if !self.reserved.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new("p");
        assert_eq!(ids.next_id(), "p-1");
        assert_eq!(ids.next_id(), "p-2");
    }

    #[test]
    fn uuids_are_distinct() {
        let mut ids = UuidIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let mut seq = SequentialIds::default();
        let mut ids = ReservedIds::new(&mut seq, ["plate-1", "plate-3"]);
        assert!(ids.is_reserved("plate-1"));
        assert_eq!(ids.next_id(), "plate-2");
        assert_eq!(ids.next_id(), "plate-4");
    }
}
