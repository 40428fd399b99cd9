use std::borrow::Borrow;
use std::fmt;

/// A map structure that stores data sorted by key as tuples in a [Vec], allowing for retrieval
/// using binary search. Iteration is in key order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct BSMap<K, V>(Vec<(K, V)>);

impl<K, V> BSMap<K, V> {
    pub fn new() -> BSMap<K, V> {
        BSMap(Vec::new())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (K, V)> {
        self.0.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.iter().map(|&(ref k, _)| k)
    }
}

impl<K: Ord, V> BSMap<K, V> {
    pub fn insert(&mut self, key: K, value: V) {
        match self.0.binary_search_by_key(&&key, |&(ref k, _)| k) {
            Ok(i) => self.0[i] = (key, value),
            Err(i) => self.0.insert(i, (key, value)),
        }
    }

    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.0
            .binary_search_by_key(&key, |&(ref k, _)| k.borrow())
            .ok()
            .map(|i| self.0.remove(i).1)
    }
}

impl<K: fmt::Debug, V> fmt::Debug for BSMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

#[test]
fn sorted_insertion() {
    let mut map = BSMap::new();
    map.insert(3, "c");
    map.insert(1, "a");
    map.insert(2, "b");
    map.insert(2, "B");

    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec![1, 2, 3]);

    assert_eq!(map.remove(&2), Some("B"));
    assert_eq!(map.remove(&2), None);

    for (_, v) in map.iter_mut() {
        *v = "x";
    }
    assert_eq!(format!("{:?}", map), "{1, 3}");
}
