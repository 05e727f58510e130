//! Typed sets backed by a shared ZDD universe.
//!
//! A pool fixes a domain capacity up front and maps each distinct element
//! to one variable of a single [`ZddManager`]. A pooled set is stored as
//! the family of singletons of its elements, which keeps every set a
//! low-edge chain in the graph: membership tests, insertion and removal
//! are one-variable ZDD operations, sets of equal contents are the same
//! node, and iteration is a plain chain walk.

use std::fmt::Write as _;
use std::hash::Hash;

use common::prelude::*;
use ddcore::prelude::*;

/// One pooled set. The handle doubles as the modification stamp: every
/// mutation replaces it, and two pooled sets with equal contents hold the
/// identical handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSet {
    handle: Zdd,
}

impl PoolSet {
    /// The underlying family-of-singletons handle.
    #[inline]
    pub fn handle(&self) -> &Zdd {
        &self.handle
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }
}

/// A pool of typed sets over a bounded domain.
pub struct SetPool<T> {
    manager: ZddManager,
    var_of: DdHashMap<T, VarId>,
    elem_of: Vec<T>,
}

impl<T: Eq + Hash + Clone> SetPool<T> {
    /// A pool over at most `capacity` distinct elements, with
    /// `cache_capacity` operation-cache slots.
    pub fn new(capacity: usize, cache_capacity: usize) -> Result<Self> {
        Ok(Self {
            manager: ZddManager::with_default_order(capacity, cache_capacity)?,
            var_of: DdHashMap::default(),
            elem_of: Vec::new(),
        })
    }

    /// A pool with variables pre-allocated for `elements` in iteration
    /// order. The first element is assigned the topmost variable, so
    /// listing elements by increasing expected frequency keeps the busy
    /// ones deep in the ordering where chains share the most structure.
    pub fn with_elements<I>(capacity: usize, cache_capacity: usize, elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut pool = Self::new(capacity, cache_capacity)?;
        for element in elements {
            pool.allocate(&element)?;
        }
        Ok(pool)
    }

    /// Maximum number of distinct elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.manager.num_vars()
    }

    /// Number of elements that have been assigned a variable so far.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.elem_of.len()
    }

    /// The shared manager, for direct diagram-level work on pooled
    /// handles.
    #[inline]
    pub fn manager(&mut self) -> &mut ZddManager {
        &mut self.manager
    }

    fn allocate(&mut self, element: &T) -> Result<VarId> {
        if let Some(&v) = self.var_of.get(element) {
            return Ok(v);
        }
        let v = self.elem_of.len();
        if v == self.capacity() {
            return Err(DdError::PoolExhausted(self.capacity()));
        }
        self.var_of.insert(element.clone(), v);
        self.elem_of.push(element.clone());
        Ok(v)
    }

    /// A new empty set in this pool.
    pub fn empty_set(&self) -> PoolSet {
        PoolSet {
            handle: self.manager.empty(),
        }
    }

    /// A new set holding `elements`, allocating variables as needed.
    pub fn set_of<I>(&mut self, elements: I) -> Result<PoolSet>
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = self.empty_set();
        for element in elements {
            self.insert(&mut set, &element)?;
        }
        Ok(set)
    }

    /// Adds `element`; true iff the set changed. Allocates a variable on
    /// first sight of the element.
    pub fn insert(&mut self, set: &mut PoolSet, element: &T) -> Result<bool> {
        let v = self.allocate(element)?;
        let singleton = self.manager.element(v)?;
        let next = self.manager.union(set.handle(), &singleton)?;
        let changed = next != set.handle;
        set.handle = next;
        Ok(changed)
    }

    /// Removes `element`; true iff the set changed. An element the pool has
    /// never seen cannot be present, so nothing is allocated for it.
    pub fn remove(&mut self, set: &mut PoolSet, element: &T) -> Result<bool> {
        let v = match self.var_of.get(element) {
            Some(&v) => v,
            None => return Ok(false),
        };
        let singleton = self.manager.element(v)?;
        let next = self.manager.setdiff(set.handle(), &singleton)?;
        let changed = next != set.handle;
        set.handle = next;
        Ok(changed)
    }

    /// Membership test; never allocates.
    pub fn contains(&mut self, set: &PoolSet, element: &T) -> Result<bool> {
        let v = match self.var_of.get(element) {
            Some(&v) => v,
            None => return Ok(false),
        };
        let singleton = self.manager.element(v)?;
        let hit = self.manager.intersect(set.handle(), &singleton)?;
        Ok(!hit.is_empty())
    }

    /// Adds every element of `elements`; true iff the set changed.
    pub fn insert_all<I>(&mut self, set: &mut PoolSet, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let before = set.handle.clone();
        for element in elements {
            self.insert(set, &element)?;
        }
        Ok(set.handle != before)
    }

    /// Removes every element of `elements`; true iff the set changed.
    pub fn remove_all<I>(&mut self, set: &mut PoolSet, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let before = set.handle.clone();
        for element in elements {
            self.remove(set, &element)?;
        }
        Ok(set.handle != before)
    }

    /// Keeps only the elements of `elements`; true iff the set changed.
    pub fn retain_all<I>(&mut self, set: &mut PoolSet, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let other = self.set_of(elements)?;
        let next = self.manager.intersect(set.handle(), other.handle())?;
        let changed = next != set.handle;
        set.handle = next;
        Ok(changed)
    }

    /// True iff every element of `elements` is in the set.
    pub fn contains_all<I>(&mut self, set: &PoolSet, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        for element in elements {
            if !self.contains(set, &element)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Empties the set; true iff it held anything.
    pub fn clear(&self, set: &mut PoolSet) -> bool {
        let changed = !set.is_empty();
        set.handle = self.manager.empty();
        changed
    }

    /// Number of elements in the set: the member count of the backing
    /// family, since the set is stored as one singleton per element.
    pub fn len(&self, set: &PoolSet) -> Result<u64> {
        self.manager.count(set.handle())
    }

    /// The set's elements in variable-ordering order.
    pub fn members<'a>(&'a self, set: &PoolSet) -> Result<impl Iterator<Item = &'a T> + 'a> {
        let path = self.manager.elements(set.handle())?;
        Ok(path.map(move |v| &self.elem_of[v]))
    }

    /// `{a, b}` rendering in variable-ordering order.
    pub fn render(&self, set: &PoolSet) -> Result<String>
    where
        T: std::fmt::Display,
    {
        let mut out = String::from("{");
        for (i, element) in self.members(set)?.enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", element);
        }
        out.push('}');
        Ok(out)
    }
}
