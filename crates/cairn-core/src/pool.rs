//! The generic reference-counted intern pool.
//!
//! A `Pool` maps normalized content to a stable `EntryId` so that
//! structurally equal values share one in-memory representative. Memory
//! is proportional to the number of distinct contents, not the number of
//! references held to them.

use hashbrown::HashMap;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroU32;

/// A stable handle to a pool entry.
///
/// Ids are `NonZeroU32`, so the raw value 0 is unrepresentable and stays
/// reserved as the invalid id. Two ids from the same pool are equal if
/// and only if they name the same entry, which makes handle comparison a
/// substitute for structural comparison of the interned content.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(NonZeroU32);

impl EntryId {
    pub(crate) fn from_slot(slot: usize) -> Self {
        let raw = u32::try_from(slot + 1).expect("pool capacity exceeded");
        Self(NonZeroU32::new(raw).expect("slot index overflowed"))
    }

    fn slot(self) -> usize {
        self.0.get() as usize - 1
    }

    /// Returns the raw non-zero id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry({})", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Slot<T, P> {
    content: T,
    refs: u32,
    payload: P,
}

/// A content-addressed pool with explicit reference counting.
///
/// `T` is the normalized content used as the interning key. `P` is a
/// per-entry payload for specializing caches (e.g. a lazily computed
/// factor list); plain interning uses `P = ()`.
///
/// Slots of evicted entries are recycled through a free list, so an id
/// is only stable while its entry is live.
#[derive(Debug)]
pub struct Pool<T, P = ()> {
    slots: Vec<Option<Slot<T, P>>>,
    index: HashMap<T, EntryId>,
    free: Vec<EntryId>,
}

impl<T, P> Default for Pool<T, P> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            free: Vec::new(),
        }
    }
}

impl<T, P> Pool<T, P> {
    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no entries are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates over live entries as `(id, content, refs, payload)`.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &T, u32, &P)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .map(|s| (EntryId::from_slot(i), &s.content, s.refs, &s.payload))
        })
    }

    fn live(&self, id: EntryId) -> &Slot<T, P> {
        self.slots
            .get(id.slot())
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("access to dead pool id {id}"))
    }

    fn live_mut(&mut self, id: EntryId) -> &mut Slot<T, P> {
        self.slots
            .get_mut(id.slot())
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("access to dead pool id {id}"))
    }

    /// Read access to the content of a live entry.
    ///
    /// # Panics
    ///
    /// Panics if the id does not name a live entry.
    #[must_use]
    pub fn get(&self, id: EntryId) -> &T {
        &self.live(id).content
    }

    /// Read access to the payload of a live entry.
    ///
    /// # Panics
    ///
    /// Panics if the id does not name a live entry.
    #[must_use]
    pub fn payload(&self, id: EntryId) -> &P {
        &self.live(id).payload
    }

    /// Mutable access to the payload of a live entry.
    ///
    /// The content itself is never mutable: it is the interning key.
    ///
    /// # Panics
    ///
    /// Panics if the id does not name a live entry.
    pub fn payload_mut(&mut self, id: EntryId) -> &mut P {
        &mut self.live_mut(id).payload
    }

    /// Returns the reference count of a live entry.
    ///
    /// # Panics
    ///
    /// Panics if the id does not name a live entry.
    #[must_use]
    pub fn refs(&self, id: EntryId) -> u32 {
        self.live(id).refs
    }

    /// Increments the reference count of a live entry.
    ///
    /// # Panics
    ///
    /// Panics if the id does not name a live entry.
    pub fn acquire(&mut self, id: EntryId) {
        self.live_mut(id).refs += 1;
    }
}

impl<T: Clone + Eq + Hash, P> Pool<T, P> {
    /// Creates a new empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            free: Vec::new(),
        }
    }

    /// Creates a pool with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Find-or-insert: interns content, returning its id.
    ///
    /// If equal content is already present, its reference count is
    /// incremented, the passed payload is dropped, and the existing id
    /// is returned. Otherwise a new entry starts with count 1.
    pub fn create(&mut self, content: T, payload: P) -> EntryId {
        if let Some(&id) = self.index.get(&content) {
            self.acquire(id);
            return id;
        }

        let slot = Slot {
            content: content.clone(),
            refs: 1,
            payload,
        };
        let id = if let Some(id) = self.free.pop() {
            self.slots[id.slot()] = Some(slot);
            id
        } else {
            let id = EntryId::from_slot(self.slots.len());
            self.slots.push(Some(slot));
            id
        };
        self.index.insert(content, id);
        id
    }

    /// Looks up the id of content without touching reference counts.
    #[must_use]
    pub fn lookup(&self, content: &T) -> Option<EntryId> {
        self.index.get(content).copied()
    }

    /// Decrements an entry's reference count, evicting it at zero.
    ///
    /// Returns the evicted `(content, payload)` so a specializing cache
    /// can release the references the payload holds to other entries.
    ///
    /// # Panics
    ///
    /// Panics if the id does not name a live entry; releasing an id more
    /// often than it was acquired is a caller bug, not bad data.
    pub fn release(&mut self, id: EntryId) -> Option<(T, P)> {
        let entry = self
            .slots
            .get_mut(id.slot())
            .unwrap_or_else(|| panic!("release of unknown pool id {id}"));
        let slot = entry
            .as_mut()
            .unwrap_or_else(|| panic!("release of dead pool id {id}"));

        slot.refs -= 1;
        if slot.refs > 0 {
            return None;
        }

        let slot = entry.take()?;
        self.index.remove(&slot.content);
        self.free.push(id);
        Some((slot.content, slot.payload))
    }
}

impl<T: fmt::Display, P> fmt::Display for Pool<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pool with {} entries", self.len())?;
        for (id, content, refs, _) in self.iter() {
            writeln!(f, "  {id} [refs {refs}] {content}")?;
        }
        Ok(())
    }
}

impl<T: fmt::Display, P> Pool<T, P> {
    /// Prints a diagnostic dump of all live entries and their counts.
    ///
    /// The format is for debugging only and not stable.
    pub fn print(&self) {
        print!("{self}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_size() {
        // the invalid-id niche keeps Option<EntryId> at 4 bytes
        assert_eq!(std::mem::size_of::<Option<EntryId>>(), 4);
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut pool: Pool<String> = Pool::new();

        let a = pool.create("hello".to_string(), ());
        let b = pool.create("world".to_string(), ());
        let c = pool.create("hello".to_string(), ());

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.refs(a), 2);
        assert_eq!(pool.refs(b), 1);
        assert_eq!(pool.get(a), "hello");
    }

    #[test]
    fn test_release_evicts_at_zero() {
        let mut pool: Pool<String> = Pool::new();

        let a = pool.create("x".to_string(), ());
        pool.create("x".to_string(), ());

        assert!(pool.release(a).is_none());
        let evicted = pool.release(a);
        assert_eq!(evicted, Some(("x".to_string(), ())));
        assert!(pool.is_empty());
        assert_eq!(pool.lookup(&"x".to_string()), None);
    }

    #[test]
    fn test_slot_reuse() {
        let mut pool: Pool<u64> = Pool::new();

        let a = pool.create(1, ());
        pool.release(a);
        let b = pool.create(2, ());

        // the freed slot is recycled, so the id is reused
        assert_eq!(a, b);
        assert_eq!(pool.get(b), &2);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    #[should_panic(expected = "release of dead pool id")]
    fn test_double_release_panics() {
        let mut pool: Pool<u64> = Pool::new();
        let a = pool.create(7, ());
        pool.release(a);
        pool.release(a);
    }

    #[test]
    #[should_panic(expected = "access to dead pool id")]
    fn test_get_after_eviction_panics() {
        let mut pool: Pool<u64> = Pool::new();
        let a = pool.create(7, ());
        pool.release(a);
        let _ = pool.get(a);
    }

    #[test]
    fn test_payload_mutation() {
        let mut pool: Pool<u64, Option<Vec<u32>>> = Pool::new();
        let a = pool.create(5, None);
        assert!(pool.payload(a).is_none());
        *pool.payload_mut(a) = Some(vec![1, 2]);
        assert_eq!(pool.payload(a).as_deref(), Some(&[1, 2][..]));
    }

    #[test]
    fn test_print_smoke() {
        let mut pool: Pool<String> = Pool::new();
        pool.create("a".to_string(), ());
        let dump = pool.to_string();
        assert!(dump.contains("pool with 1 entries"));
        assert!(dump.contains("refs 1"));
    }
}
