use std::sync::{Mutex, MutexGuard};
use wellness_scheduler_domain::{Entity, ID};

/// Useful functions for creating inmemory repositories

pub type Collection<T> = std::sync::Arc<Mutex<Vec<T>>>;

pub fn new_collection<T>() -> Collection<T> {
    std::sync::Arc::new(Mutex::new(Vec::new()))
}

/// Locks the collection, recovering it if a holder panicked
pub fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    collection
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    lock(collection).push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    lock(collection).iter().find(|e| e.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    lock(collection)
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

/// Applies `update` to the entity with the given id if `compare` accepts it.
/// Returns whether the entity was updated.
pub fn update_if<T: Entity, F: Fn(&T) -> bool, U: FnOnce(&mut T)>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> bool {
    let mut collection = lock(collection);
    match collection.iter_mut().find(|e| e.id() == val_id) {
        Some(entity) if compare(entity) => {
            update(entity);
            true
        }
        _ => false,
    }
}
