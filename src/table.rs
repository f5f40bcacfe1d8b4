use std::rc::Rc;

use crate::value::Value;

const MAX_LOAD_FACTOR: f64 = 0.75;

/// FNV-1a, the same hash the original table implementation uses for its
/// interned keys.
fn hash_str(s: &str) -> u32 {
    let mut hash: u32 = 2166136261;
    for byte in s.as_bytes() {
        hash ^= *byte as u32;
        hash = hash.wrapping_mul(16777619);
    }
    hash
}

#[derive(Clone)]
struct Entry {
    key: Option<Rc<str>>,
    value: Value,
    is_tombstone: bool,
}

impl Entry {
    fn empty() -> Self {
        Self { key: None, value: Value::Nil, is_tombstone: false }
    }
}

/// An open-addressed hash table with linear probing and tombstone deletion,
/// used to hold global variable bindings. Grounded directly on the original
/// source's `table.c`: `findEntry`, `adjustCapacity`, `tableSet`,
/// `tableGet`, `tableDelete`.
#[derive(Clone, Default)]
pub struct Table {
    count: usize,
    entries: Vec<Entry>,
}

impl Table {
    pub fn new() -> Self {
        Self { count: 0, entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Finds the slot `key` belongs in: either the entry already holding it,
    /// the first tombstone seen along the probe sequence, or the first truly
    /// empty slot. Assumes `entries` is non-empty.
    fn find_entry(entries: &[Entry], key: &str) -> usize {
        let capacity = entries.len();
        let mut index = hash_str(key) as usize % capacity;
        let mut tombstone: Option<usize> = None;

        loop {
            let entry = &entries[index];
            match &entry.key {
                None => {
                    if entry.is_tombstone {
                        if tombstone.is_none() {
                            tombstone = Some(index);
                        }
                    } else {
                        return tombstone.unwrap_or(index);
                    }
                }
                Some(k) => {
                    if k.as_ref() == key {
                        return index;
                    }
                }
            }
            index = (index + 1) % capacity;
        }
    }

    fn adjust_capacity(&mut self, new_capacity: usize) {
        let mut new_entries = vec![Entry::empty(); new_capacity];

        // Tombstones are not carried across a rehash; only live entries count.
        self.count = 0;
        for entry in self.entries.iter() {
            if let Some(key) = &entry.key {
                let dest = Self::find_entry(&new_entries, key);
                new_entries[dest] = Entry { key: Some(key.clone()), value: entry.value.clone(), is_tombstone: false };
                self.count += 1;
            }
        }

        self.entries = new_entries;
    }

    /// Inserts or overwrites `key`. Returns `true` if `key` was not already
    /// present. Redefining an existing global is permitted; the caller never
    /// treats `false` as an error.
    pub fn set(&mut self, key: Rc<str>, value: Value) -> bool {
        if self.entries.is_empty() || (self.count + 1) as f64 > self.entries.len() as f64 * MAX_LOAD_FACTOR {
            let new_capacity = if self.entries.is_empty() { 8 } else { self.entries.len() * 2 };
            self.adjust_capacity(new_capacity);
        }

        let index = Self::find_entry(&self.entries, &key);
        let entry = &mut self.entries[index];
        let is_new = entry.key.is_none();
        if is_new && !entry.is_tombstone {
            self.count += 1;
        }

        entry.key = Some(key);
        entry.value = value;
        entry.is_tombstone = false;
        is_new
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        if self.entries.is_empty() {
            return None;
        }
        let index = Self::find_entry(&self.entries, key);
        self.entries[index].key.as_ref().map(|_| &self.entries[index].value)
    }

    /// Removes `key`, leaving a tombstone behind so later probe sequences
    /// through this slot keep working. Returns `true` if `key` was present.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let index = Self::find_entry(&self.entries, key);
        if self.entries[index].key.is_none() {
            return false;
        }

        self.entries[index].key = None;
        self.entries[index].value = Value::Nil;
        self.entries[index].is_tombstone = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut table = Table::new();
        table.set(Rc::from("a"), Value::Number(1.0));
        table.set(Rc::from("b"), Value::Number(2.0));
        assert_eq!(table.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(table.get("b"), Some(&Value::Number(2.0)));
        assert_eq!(table.get("c"), None);
    }

    #[test]
    fn set_on_existing_key_overwrites_and_reports_not_new() {
        let mut table = Table::new();
        assert!(table.set(Rc::from("a"), Value::Number(1.0)));
        assert!(!table.set(Rc::from("a"), Value::Number(2.0)));
        assert_eq!(table.get("a"), Some(&Value::Number(2.0)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn delete_then_get_returns_none_but_probe_chain_survives() {
        let mut table = Table::new();
        table.set(Rc::from("a"), Value::Number(1.0));
        table.set(Rc::from("b"), Value::Number(2.0));
        assert!(table.delete("a"));
        assert_eq!(table.get("a"), None);
        assert_eq!(table.get("b"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn delete_missing_key_returns_false() {
        let mut table = Table::new();
        assert!(!table.delete("missing"));
    }

    #[test]
    fn grows_past_load_factor_and_keeps_all_entries() {
        let mut table = Table::new();
        for i in 0..100 {
            table.set(Rc::from(format!("key{}", i).as_str()), Value::Number(i as f64));
        }
        assert_eq!(table.len(), 100);
        for i in 0..100 {
            assert_eq!(table.get(&format!("key{}", i)), Some(&Value::Number(i as f64)));
        }
    }

    #[test]
    fn reinsert_after_delete_reuses_tombstone_slot() {
        let mut table = Table::new();
        table.set(Rc::from("a"), Value::Number(1.0));
        table.delete("a");
        assert!(table.set(Rc::from("a"), Value::Number(9.0)));
        assert_eq!(table.get("a"), Some(&Value::Number(9.0)));
    }
}
