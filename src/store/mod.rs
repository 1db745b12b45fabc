pub mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend, default_state_dir};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::model::SelectedItem;

/// Storage key the whole selection is serialized under, as one JSON array.
pub const SELECTION_KEY: &str = "ae:selected-products";

/// Name of the change notification broadcast after every mutation.
pub const SELECTION_CHANGE_EVENT: &str = "ae-selection-change";

/// Token returned by [`SelectionStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&[SelectedItem])>;

/// The customer's persisted pick list: catalog items with quantities,
/// keyed by part number.
///
/// Every operation reads the whole collection from the backend, mutates
/// it, and rewrites the whole blob, then notifies subscribers with the
/// new collection. A backend that has gone away degrades reads to empty
/// and writes to no-ops; nothing here returns an error.
///
/// Two processes sharing a state directory race on the blob with plain
/// last-write-wins; a simultaneous writer can lose an update.
pub struct SelectionStore {
    backend: Box<dyn StorageBackend>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl SelectionStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        SelectionStore {
            backend,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// Current selection. Empty on any read or deserialization failure;
    /// quantities are normalized to integers >= 1 and duplicate part
    /// numbers collapse to the last occurrence.
    pub fn selection(&self) -> Vec<SelectedItem> {
        let raw = match self.backend.read(SELECTION_KEY) {
            Some(s) => s,
            None => return Vec::new(),
        };
        let items: Vec<SelectedItem> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "selection blob unreadable, starting empty");
                return Vec::new();
            }
        };
        dedupe(items).into_values().collect()
    }

    /// Replace the whole selection.
    pub fn set_selection(&mut self, items: Vec<SelectedItem>) {
        let mut normalized: Vec<SelectedItem> = dedupe(items).into_values().collect();
        for item in &mut normalized {
            item.qty = item.qty.max(1);
        }
        self.persist_and_notify(normalized);
    }

    /// Insert with quantity 1, or bump an existing row's quantity by 1.
    pub fn add_item(
        &mut self,
        partnumber: impl Into<String>,
        title: impl Into<String>,
        image: impl Into<String>,
    ) {
        let partnumber = partnumber.into();
        let mut items = self.selection();
        match items.iter_mut().find(|i| i.partnumber == partnumber) {
            Some(existing) => existing.qty = existing.qty.max(1) + 1,
            None => items.push(SelectedItem::new(partnumber, title.into(), image.into())),
        }
        self.persist_and_notify(items);
    }

    /// Set a row's quantity. Unknown part numbers and non-finite
    /// quantities are ignored; zero or negative removes the row;
    /// fractional quantities are floored.
    pub fn update_quantity(&mut self, partnumber: &str, qty: f64) {
        if !qty.is_finite() {
            return;
        }
        let mut items = self.selection();
        let Some(idx) = items.iter().position(|i| i.partnumber == partnumber) else {
            return;
        };
        if qty <= 0.0 {
            items.remove(idx);
        } else {
            items[idx].qty = qty.floor() as u32;
        }
        self.persist_and_notify(items);
    }

    /// Delete a row if present.
    pub fn remove_item(&mut self, partnumber: &str) {
        let mut items = self.selection();
        let before = items.len();
        items.retain(|i| i.partnumber != partnumber);
        if items.len() == before {
            return;
        }
        self.persist_and_notify(items);
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.persist_and_notify(Vec::new());
    }

    /// Register an observer, invoked synchronously after every mutation
    /// with the new collection. Observers are expected to re-read via
    /// [`SelectionStore::selection`] rather than trust the payload.
    pub fn subscribe(&mut self, callback: impl FnMut(&[SelectedItem]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(oid, _)| *oid != id);
    }

    fn persist_and_notify(&mut self, items: Vec<SelectedItem>) {
        match serde_json::to_string(&items) {
            Ok(blob) => self.backend.write(SELECTION_KEY, &blob),
            Err(e) => warn!(error = %e, "selection serialize failed, write skipped"),
        }
        debug!(event = SELECTION_CHANGE_EVENT, count = items.len(), "selection changed");
        for (_, observer) in &mut self.observers {
            observer(&items);
        }
    }
}

/// Collapse duplicate part numbers; later entries win.
fn dedupe(items: Vec<SelectedItem>) -> IndexMap<String, SelectedItem> {
    let mut map = IndexMap::with_capacity(items.len());
    for item in items {
        map.insert(item.partnumber.clone(), item);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::{MemoryBackend, UnavailableBackend};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> SelectionStore {
        SelectionStore::new(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn add_item_inserts_with_qty_one() {
        let mut store = store();
        store.add_item("X1", "Widget", "w.webp");
        let items = store.selection();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].partnumber, "X1");
        assert_eq!(items[0].qty, 1);
    }

    #[test]
    fn repeated_add_increments_quantity() {
        let mut store = store();
        for _ in 0..4 {
            store.add_item("X1", "Widget", "w.webp");
        }
        let items = store.selection();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].qty, 4);
    }

    #[test]
    fn update_quantity_floors_fractions() {
        let mut store = store();
        store.add_item("X1", "Widget", "w.webp");
        store.update_quantity("X1", 3.9);
        assert_eq!(store.selection()[0].qty, 3);
    }

    #[test]
    fn update_quantity_zero_or_negative_removes() {
        let mut store = store();
        store.add_item("X1", "Widget", "w.webp");
        store.update_quantity("X1", 0.0);
        assert!(store.selection().is_empty());

        store.add_item("X2", "Gadget", "g.webp");
        store.update_quantity("X2", -2.0);
        assert!(store.selection().is_empty());
    }

    #[test]
    fn update_quantity_non_finite_ignored() {
        let mut store = store();
        store.add_item("X1", "Widget", "w.webp");
        store.update_quantity("X1", f64::NAN);
        store.update_quantity("X1", f64::INFINITY);
        assert_eq!(store.selection()[0].qty, 1);
    }

    #[test]
    fn update_quantity_unknown_part_is_noop() {
        let mut store = store();
        store.add_item("X1", "Widget", "w.webp");
        store.update_quantity("ZZ", 5.0);
        assert_eq!(store.selection()[0].qty, 1);
    }

    #[test]
    fn remove_item_deletes_only_that_part() {
        let mut store = store();
        store.add_item("X1", "Widget", "w.webp");
        store.add_item("X2", "Gadget", "g.webp");
        store.remove_item("X1");
        let items = store.selection();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].partnumber, "X2");
    }

    #[test]
    fn clear_empties_the_collection() {
        let mut store = store();
        store.add_item("X1", "Widget", "w.webp");
        store.add_item("X2", "Gadget", "g.webp");
        store.clear();
        assert!(store.selection().is_empty());
    }

    #[test]
    fn set_selection_round_trips_and_normalizes() {
        let mut store = store();
        let mut item = SelectedItem::new("X1", "Widget", "w.webp");
        item.qty = 0; // illegal on disk, normalized on write
        store.set_selection(vec![item]);
        let items = store.selection();
        assert_eq!(items[0].qty, 1);
    }

    #[test]
    fn corrupt_blob_reads_empty() {
        let mut backend = MemoryBackend::new();
        backend.write(SELECTION_KEY, "not json {{{");
        let store = SelectionStore::new(Box::new(backend));
        assert!(store.selection().is_empty());
    }

    #[test]
    fn legacy_blob_without_qty_backfills_one() {
        let mut backend = MemoryBackend::new();
        backend.write(
            SELECTION_KEY,
            r#"[{"partnumber":"X1","title":"Widget","image":"w.webp"}]"#,
        );
        let store = SelectionStore::new(Box::new(backend));
        assert_eq!(store.selection()[0].qty, 1);
    }

    #[test]
    fn duplicate_partnumbers_last_wins() {
        let mut backend = MemoryBackend::new();
        backend.write(
            SELECTION_KEY,
            r#"[{"partnumber":"X1","title":"Old","qty":1},
                {"partnumber":"X1","title":"New","qty":7}]"#,
        );
        let store = SelectionStore::new(Box::new(backend));
        let items = store.selection();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "New");
        assert_eq!(items[0].qty, 7);
    }

    #[test]
    fn unavailable_backend_never_panics() {
        let mut store = SelectionStore::new(Box::new(UnavailableBackend));
        assert!(store.selection().is_empty());
        store.add_item("X1", "Widget", "w.webp");
        store.update_quantity("X1", 2.0);
        store.remove_item("X1");
        store.clear();
        assert!(store.selection().is_empty());
    }

    #[test]
    fn observers_fire_on_every_mutation() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut store = store();
        store.subscribe(move |items| sink.borrow_mut().push(items.len()));

        store.add_item("X1", "Widget", "w.webp");
        store.add_item("X2", "Gadget", "g.webp");
        store.remove_item("X1");
        store.clear();

        assert_eq!(*seen.borrow(), vec![1, 2, 1, 0]);
    }

    #[test]
    fn unsubscribed_observers_stop_firing() {
        let count: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut store = store();
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);
        store.add_item("X1", "Widget", "w.webp");
        store.unsubscribe(id);
        store.add_item("X2", "Gadget", "g.webp");

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn noop_mutations_do_not_notify() {
        let count: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut store = store();
        store.subscribe(move |_| *sink.borrow_mut() += 1);
        store.remove_item("absent");
        store.update_quantity("absent", 3.0);
        store.update_quantity("absent", f64::NAN);

        assert_eq!(*count.borrow(), 0);
    }
}
