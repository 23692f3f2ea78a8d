use crate::cache::slot::{NIL, Slot, SlotIndex};
use crate::cache::slot_arena::SlotArena;

/// Intrusive doubly linked list threaded through the arena's slots.
///
/// The head is the most recently used slot, the tail the least recently
/// used one. The list owns no storage of its own; it only manipulates the
/// `prev`/`next` links of slots that live in the arena, so every operation
/// is O(1) and allocation-free.
#[derive(Debug)]
pub(crate) struct RecencyList {
    head: SlotIndex,
    tail: SlotIndex,
    len: usize,
}

impl RecencyList {
    pub(crate) fn new() -> RecencyList {
        RecencyList {
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> SlotIndex {
        self.head
    }

    pub(crate) fn tail(&self) -> SlotIndex {
        self.tail
    }

    /// Links an unlinked slot at the head of the list.
    pub(crate) fn push_front<K, V>(&mut self, arena: &mut SlotArena<K, V>, index: SlotIndex) {
        let old_head = self.head;

        {
            let slot = arena
                .get_mut(index)
                .expect("a slot being linked must be occupied");
            slot.prev = NIL;
            slot.next = old_head;
        }

        match old_head {
            NIL => self.tail = index,
            head => {
                arena
                    .get_mut(head)
                    .expect("the list head must be occupied")
                    .prev = index;
            }
        }

        self.head = index;
        self.len += 1;
    }

    /// Removes a linked slot from the list, leaving the relative order of
    /// all other slots unchanged. The slot itself stays in the arena with
    /// cleared links.
    pub(crate) fn unlink<K, V>(&mut self, arena: &mut SlotArena<K, V>, index: SlotIndex) {
        let (prev, next) = {
            let slot = arena
                .get(index)
                .expect("a slot being unlinked must be occupied");
            (slot.prev, slot.next)
        };

        match prev {
            NIL => self.head = next,
            prev => {
                arena
                    .get_mut(prev)
                    .expect("a linked slot's neighbour must be occupied")
                    .next = next;
            }
        }

        match next {
            NIL => self.tail = prev,
            next => {
                arena
                    .get_mut(next)
                    .expect("a linked slot's neighbour must be occupied")
                    .prev = prev;
            }
        }

        let slot = arena
            .get_mut(index)
            .expect("a slot being unlinked must be occupied");
        slot.prev = NIL;
        slot.next = NIL;

        self.len -= 1;
    }

    /// Unlinks the tail and returns its index, or [`None`] if the list is
    /// empty.
    pub(crate) fn pop_back<K, V>(&mut self, arena: &mut SlotArena<K, V>) -> Option<SlotIndex> {
        match self.tail {
            NIL => None,
            tail => {
                self.unlink(arena, tail);
                Some(tail)
            }
        }
    }

    /// Promotes a linked slot to the head.
    pub(crate) fn move_to_front<K, V>(&mut self, arena: &mut SlotArena<K, V>, index: SlotIndex) {
        if self.head == index {
            return;
        }

        self.unlink(arena, index);
        self.push_front(arena, index);
    }

    /// Walks the list head to tail, most recently used slot first.
    pub(crate) fn iter<'a, K, V>(&self, arena: &'a SlotArena<K, V>) -> Iter<'a, K, V> {
        Iter {
            arena,
            next: self.head,
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    arena: &'a SlotArena<K, V>,
    next: SlotIndex,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Slot<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NIL {
            return None;
        }

        let slot = self
            .arena
            .get(self.next)
            .expect("a linked slot must be occupied");
        self.next = slot.next;

        Some(slot)
    }
}
