/// One collection per entity category.
///
/// Collision and movement only ever flag entities dead; removal happens in a
/// single `sweep` afterwards, so nothing is removed while it is being
/// iterated.

pub trait Alive {
    fn is_alive(&self) -> bool;
}

#[derive(Clone, Debug)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Alive> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Entities not yet flagged for removal.
    pub fn live(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| item.is_alive())
    }

    /// Drop every dead entity.  Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.is_alive());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
