use std::{cell::Cell, mem};

/// Union-find with path compression and union by size.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    // Represents parent if >= 0, size if < 0
    link: Vec<Cell<i32>>,
}

impl DisjointSet {
    /// `n` singleton sets `{0}, {1}, .., {n - 1}`.
    pub fn new(n: usize) -> Self {
        assert!(n <= i32::MAX as usize, "too many nodes for a disjoint set");
        Self {
            link: vec![Cell::new(-1); n],
        }
    }

    pub fn len(&self) -> usize {
        self.link.len()
    }

    pub fn is_empty(&self) -> bool {
        self.link.is_empty()
    }

    pub fn find_root_with_size(&self, u: usize) -> (usize, u32) {
        let p = self.link[u].get();
        if p >= 0 {
            let (root, size) = self.find_root_with_size(p as usize);
            self.link[u].set(root as i32);
            (root, size)
        } else {
            (u, (-p) as u32)
        }
    }

    pub fn find_root(&self, u: usize) -> usize {
        self.find_root_with_size(u).0
    }

    pub fn size(&self, u: usize) -> u32 {
        self.find_root_with_size(u).1
    }

    pub fn same(&self, u: usize, v: usize) -> bool {
        self.find_root(u) == self.find_root(v)
    }

    // Returns true iif two sets were previously disjoint.
    // On equal sizes the root of `u` survives.
    pub fn merge(&mut self, u: usize, v: usize) -> bool {
        let (mut u, size_u) = self.find_root_with_size(u);
        let (mut v, size_v) = self.find_root_with_size(v);
        if u == v {
            return false;
        }

        if size_u < size_v {
            mem::swap(&mut u, &mut v);
        }
        self.link[v].set(u as i32);
        self.link[u].set(-((size_u + size_v) as i32));
        true
    }
}
