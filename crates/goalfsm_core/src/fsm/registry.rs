use std::marker::PhantomData;

use crate::error::{CoreError, Result};

use super::transition::same;
use super::{Node, Transition};

/// One registry slot. Slots past the registered prefix are always `None`.
pub type Slot<'a, N> = Option<&'a Transition<'a, N>>;

/// Order-preserving, capacity-bounded set of transition references.
///
/// Storage is whatever slice-like buffer the owner hands in: a fixed array, a
/// borrowed `&mut [Slot]`, or a boxed slice allocated once. The registry never
/// grows it.
///
/// This type only keeps the bookkeeping; topology-change tracking is done by
/// [`crate::fsm::Engine`], which wraps every mutation.
pub struct Registry<'a, N, R> {
    slots: R,
    len: usize,
    _marker: PhantomData<Slot<'a, N>>,
}

impl<'a, N, R> Registry<'a, N, R>
where
    N: Node,
    R: AsRef<[Slot<'a, N>]> + AsMut<[Slot<'a, N>]>,
{
    /// Wrap `slots`; any previous contents are discarded.
    pub fn new(mut slots: R) -> Self {
        slots.as_mut().fill(None);
        Self {
            slots,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.as_ref().len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Append `transition` after every already registered one.
    pub fn add(&mut self, transition: &'a Transition<'a, N>) -> Result<()> {
        let capacity = self.capacity();
        if self.len == capacity {
            return Err(CoreError::capacity_exceeded(capacity));
        }
        self.slots.as_mut()[self.len] = Some(transition);
        self.len += 1;
        Ok(())
    }

    /// Remove `transition` by identity, keeping the relative order of the rest.
    pub fn remove(&mut self, transition: &Transition<'a, N>) -> Result<()> {
        let index = self
            .position(transition)
            .ok_or_else(|| CoreError::not_registered(transition.label()))?;

        let registered = &mut self.slots.as_mut()[..self.len];
        registered[index..].rotate_left(1);
        registered[self.len - 1] = None;
        self.len -= 1;
        Ok(())
    }

    pub fn contains(&self, transition: &Transition<'a, N>) -> bool {
        self.position(transition).is_some()
    }

    /// Registered transitions in registration order, blocked ones included.
    pub fn iter(&self) -> impl Iterator<Item = &'a Transition<'a, N>> + Clone + '_ {
        self.slots.as_ref()[..self.len].iter().flatten().copied()
    }

    /// Available transitions in registration order.
    pub fn enabled(&self) -> impl Iterator<Item = &'a Transition<'a, N>> + Clone + '_ {
        self.iter().filter(|t| t.is_available())
    }

    /// Available transitions leaving `node`, in registration order.
    pub fn outgoing(&self, node: N) -> impl Iterator<Item = &'a Transition<'a, N>> + Clone + '_ {
        self.enabled().filter(move |t| t.source() == node)
    }

    fn position(&self, transition: &Transition<'a, N>) -> Option<usize> {
        self.iter().position(|t| same(t, transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn endpoints<'a, R>(registry: &Registry<'a, u8, R>) -> Vec<(u8, u8)>
    where
        R: AsRef<[Slot<'a, u8>]> + AsMut<[Slot<'a, u8>]>,
    {
        registry
            .iter()
            .map(|t| (t.source(), t.destination()))
            .collect()
    }

    #[test]
    fn add_appends_until_full() {
        let a = Transition::new(0u8, 1u8);
        let b = Transition::new(1u8, 2u8);
        let c = Transition::new(2u8, 0u8);
        let mut registry = Registry::new([None; 2]);

        registry.add(&a).unwrap();
        registry.add(&b).unwrap();
        assert!(registry.is_full());

        let e = registry.add(&c).unwrap_err();
        assert_eq!(e.kind, ErrorKind::CapacityExceeded);
        assert_eq!(endpoints(&registry), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let a = Transition::new(0u8, 1u8);
        let b = Transition::new(1u8, 2u8);
        let c = Transition::new(2u8, 3u8);
        let d = Transition::new(3u8, 4u8);
        let mut registry = Registry::new(vec![None; 4]);
        for t in [&a, &b, &c, &d] {
            registry.add(t).unwrap();
        }

        registry.remove(&b).unwrap();
        assert_eq!(endpoints(&registry), vec![(0, 1), (2, 3), (3, 4)]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.contains(&b));

        // Freed slot is reusable and lands at the end.
        registry.add(&b).unwrap();
        assert_eq!(endpoints(&registry), vec![(0, 1), (2, 3), (3, 4), (1, 2)]);
    }

    #[test]
    fn remove_unregistered_is_not_found() {
        let a = Transition::new(0u8, 1u8).with_label("a");
        let twin = Transition::new(0u8, 1u8);
        let mut registry = Registry::new([None; 2]);
        registry.add(&a).unwrap();

        let e = registry.remove(&twin).unwrap_err();
        assert_eq!(e.kind, ErrorKind::NotFound);
        assert_eq!(registry.len(), 1);

        registry.remove(&a).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.remove(&a).unwrap_err().kind, ErrorKind::NotFound);
    }

    #[test]
    fn duplicate_edges_are_independent() {
        let first = Transition::new(0u8, 1u8);
        let second = Transition::new(0u8, 1u8);
        let mut registry = Registry::new([None; 2]);
        registry.add(&first).unwrap();
        registry.add(&second).unwrap();

        registry.remove(&first).unwrap();
        assert!(registry.contains(&second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn enabled_and_outgoing_skip_blocked() {
        let a = Transition::new(0u8, 1u8);
        let b = Transition::new(0u8, 2u8).blocked();
        let c = Transition::new(1u8, 2u8);
        let mut registry = Registry::new([None; 3]);
        for t in [&a, &b, &c] {
            registry.add(t).unwrap();
        }

        assert_eq!(registry.enabled().count(), 2);
        let out: Vec<_> = registry.outgoing(0).map(|t| t.destination()).collect();
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn borrowed_storage_is_cleared_on_wrap() {
        let stale = Transition::new(9u8, 9u8);
        let mut storage: [Slot<u8>; 2] = [Some(&stale), Some(&stale)];
        let registry = Registry::new(&mut storage[..]);
        assert!(registry.is_empty());
        assert_eq!(registry.capacity(), 2);
    }
}
