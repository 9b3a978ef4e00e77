use itertools::Itertools;
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::slice;

/// Duplicate-free, unordered container with linear membership lookup.
///
/// The set keeps a logical capacity that starts at the requested size and doubles
/// whenever an insertion finds it full. Growth never rejects an element.
#[derive(Debug, Clone)]
pub struct Set<T> {
    elements: Vec<T>,
    capacity: usize,
}

impl<T> Set<T> {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A capacity of zero falls back to [`Set::DEFAULT_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity < 1 { Self::DEFAULT_CAPACITY } else { capacity };
        Set { elements: Vec::with_capacity(capacity), capacity }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }

    fn grow(&mut self) {
        self.elements.reserve_exact(self.capacity);
        self.capacity *= 2;
    }
}

impl<T: PartialEq> Set<T> {
    /// Inserts `element` unless an equal one is already present.
    pub fn add(&mut self, element: T) {
        if self.contains(&element) {
            return;
        }

        if self.elements.len() == self.capacity {
            self.grow();
        }
        self.elements.push(element);
    }

    /// Membership test. Accepts any borrowed form of `T`, so a `Set<String>`
    /// can be queried with a `&str`.
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.elements.iter().any(|e| e.borrow() == element)
    }

    /// Removes one copy of `element`, moving the last element into its slot.
    pub fn remove(&mut self, element: &T) -> bool {
        match self.elements.iter().position(|e| e == element) {
            Some(index) => {
                self.elements.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every copy of `element` and returns how many were removed.
    pub fn remove_all(&mut self, element: &T) -> usize {
        let mut removed = 0;
        while self.remove(element) {
            removed += 1;
        }
        removed
    }

    /// True when every element of `self` is also in `other`.
    pub fn is_subset(&self, other: &Set<T>) -> bool {
        self.elements.iter().all(|e| other.contains(e))
    }
}

impl<T: PartialEq + Clone> Set<T> {
    /// Snapshot of the elements. Mutating the returned vector leaves the set untouched.
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.clone()
    }

    pub fn union(&self, other: &Set<T>) -> Set<T> {
        let mut result = Set::with_capacity(self.len() + other.len());
        result.extend(self.elements.iter().cloned());
        result.extend(other.elements.iter().cloned());
        result
    }

    pub fn intersection(&self, other: &Set<T>) -> Set<T> {
        self.elements.iter().filter(|e| other.contains(*e)).cloned().collect()
    }

    pub fn difference(&self, other: &Set<T>) -> Set<T> {
        self.elements.iter().filter(|e| !other.contains(*e)).cloned().collect()
    }
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Order of insertion does not matter for equality.
impl<T: PartialEq> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: Eq> Eq for Set<T> {}

impl<T: PartialEq> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: PartialEq> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Display> Display for Set<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elements.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(items: &[&str]) -> Set<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn add_ignores_duplicates() {
        let mut set = Set::new();
        set.add("p");
        set.add("p");
        set.add("div");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"p"));
    }

    #[test]
    fn capacity_doubles_when_full() {
        let mut set = Set::with_capacity(2);
        set.add(1);
        set.add(2);
        assert_eq!(set.capacity(), 2);
        set.add(3);
        assert_eq!(set.capacity(), 4);
        assert_eq!(set.len(), 3);
        for n in 4..=9 {
            set.add(n);
        }
        assert_eq!(set.capacity(), 16);
        assert!((1..=9).all(|n| set.contains(&n)));
    }

    #[test]
    fn zero_capacity_falls_back_to_default() {
        let set: Set<u8> = Set::with_capacity(0);
        assert_eq!(set.capacity(), Set::<u8>::DEFAULT_CAPACITY);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut set = set_of(&["a", "b", "c"]);
        assert!(set.remove(&"a".to_string()));
        assert!(!set.remove(&"a".to_string()));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"c".to_string()));
        assert!(set.contains("c"));
        assert!(!set.contains("a"));
        assert_eq!(set.remove_all(&"b".to_string()), 1);
        assert_eq!(set.remove_all(&"zzz".to_string()), 0);
        assert_eq!(set.to_vec(), vec!["c".to_string()]);
    }

    #[test]
    fn algebra_leaves_operands_untouched() {
        let a = set_of(&["html", "head", "p"]);
        let b = set_of(&["p", "br"]);

        assert_eq!(a.union(&b), set_of(&["br", "p", "head", "html"]));
        assert_eq!(a.intersection(&b), set_of(&["p"]));
        assert_eq!(a.difference(&b), set_of(&["html", "head"]));
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn subset_checks() {
        let empty: Set<String> = Set::new();
        let a = set_of(&["a", "b"]);
        assert!(empty.is_subset(&a));
        assert!(empty.is_subset(&empty));
        assert!(set_of(&["b"]).is_subset(&a));
        assert!(!a.is_subset(&set_of(&["a"])));
    }

    #[test]
    fn clone_is_independent() {
        let original = set_of(&["a", "b"]);
        let mut copy = original.clone();
        copy.add("c".to_string());
        copy.remove(&"a".to_string());
        assert_eq!(original, set_of(&["a", "b"]));
        assert_eq!(copy, set_of(&["b", "c"]));
    }

    #[test]
    fn snapshot_does_not_alias() {
        let set = set_of(&["a"]);
        let mut snapshot = set.to_vec();
        snapshot.push("b".to_string());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn displays_space_separated() {
        let set: Set<u32> = [3, 1, 2].into_iter().collect();
        assert_eq!(set.to_string(), "3 1 2");
        assert_eq!(Set::<u32>::new().to_string(), "");
    }
}
