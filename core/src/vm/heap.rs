use super::error::{Fault, ResourceExceeded};
use super::instruction_set::Platter;
use crate::{Box, Vec, vec};

/// Array heap of the machine.
///
/// Arrays live in a slot table indexed by their handle. Handle `0` is not a
/// slot: it always names the active program, which is stored separately so
/// that Load Program can replace its contents without touching the table.
///
/// Freed handles go on a free-list and are handed out again by later
/// allocations, so long-running alloc/free cycles keep the table bounded by
/// the peak number of live arrays.
pub struct Heap {
    /// The active program (array 0).
    program: Box<[Platter]>,
    /// `slots[h]` holds array `h`. Slot 0 is permanently empty.
    slots: Vec<Option<Box<[Platter]>>>,
    /// Handles of empty slots, reused last-in first-out.
    free: Vec<u32>,
}

impl Heap {
    /// Creates a heap whose array 0 holds `program`.
    pub fn new(program: Vec<Platter>) -> Self {
        Self {
            program: program.into_boxed_slice(),
            slots: vec![None],
            free: Vec::new(),
        }
    }

    /// The active program (array 0).
    #[inline(always)]
    pub fn program(&self) -> &[Platter] {
        &self.program
    }

    /// Creates a zero-filled array of `size` platters and returns its handle.
    ///
    /// The handle is never 0 and never that of a live array. The heap is left
    /// unchanged when the array cannot be allocated.
    pub fn allocate(&mut self, size: u32) -> Result<u32, ResourceExceeded> {
        let mut array = Vec::new();
        array
            .try_reserve_exact(size as usize)
            .map_err(|_| ResourceExceeded::OutOfMemory { size })?;
        array.resize(size as usize, 0);
        let array = array.into_boxed_slice();

        if let Some(handle) = self.free.pop() {
            debug_assert!(self.slots[handle as usize].is_none());
            self.slots[handle as usize] = Some(array);
            return Ok(handle);
        }

        let handle = u32::try_from(self.slots.len()).map_err(|_| {
            ResourceExceeded::HandlesExhausted {
                live: self.live_count(),
            }
        })?;
        self.slots.push(Some(array));
        Ok(handle)
    }

    /// Frees array `handle`, making the handle available for reuse.
    pub fn deallocate(&mut self, handle: u32) -> Result<(), Fault> {
        if handle == 0 {
            return Err(Fault::InvalidHandle { handle });
        }
        match self.slots.get_mut(handle as usize) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                self.free.push(handle);
                Ok(())
            }
            _ => Err(Fault::InvalidHandle { handle }),
        }
    }

    /// Resolves a handle to its array. Handle 0 is the active program.
    #[inline]
    pub fn array(&self, handle: u32) -> Result<&[Platter], Fault> {
        if handle == 0 {
            return Ok(&self.program[..]);
        }
        match self.slots.get(handle as usize) {
            Some(Some(array)) => Ok(&array[..]),
            _ => Err(Fault::InvalidHandle { handle }),
        }
    }

    #[inline]
    fn array_mut(&mut self, handle: u32) -> Result<&mut [Platter], Fault> {
        if handle == 0 {
            return Ok(&mut self.program[..]);
        }
        match self.slots.get_mut(handle as usize) {
            Some(Some(array)) => Ok(&mut array[..]),
            _ => Err(Fault::InvalidHandle { handle }),
        }
    }

    /// Reads platter `index` of array `handle`.
    #[inline]
    pub fn read(&self, handle: u32, index: u32) -> Result<Platter, Fault> {
        let array = self.array(handle)?;
        array
            .get(index as usize)
            .copied()
            .ok_or(Fault::OutOfBounds {
                handle,
                index,
                len: array.len(),
            })
    }

    /// Writes platter `index` of array `handle`.
    ///
    /// Writing through handle 0 amends the running program; the change is
    /// visible to the next fetch.
    #[inline]
    pub fn write(&mut self, handle: u32, index: u32, value: Platter) -> Result<(), Fault> {
        let array = self.array_mut(handle)?;
        let len = array.len();
        let slot = array
            .get_mut(index as usize)
            .ok_or(Fault::OutOfBounds { handle, index, len })?;
        *slot = value;
        Ok(())
    }

    /// Makes array 0 a copy of array `source`.
    ///
    /// Replacing the program with itself leaves it unchanged, so handle 0 is
    /// a no-op.
    pub fn replace_program(&mut self, source: u32) -> Result<(), Fault> {
        if source == 0 {
            return Ok(());
        }
        let copy: Box<[Platter]> = self.array(source)?.into();
        self.program = copy;
        Ok(())
    }

    /// Length of array `handle`.
    pub fn len(&self, handle: u32) -> Result<usize, Fault> {
        self.array(handle).map(<[Platter]>::len)
    }

    /// Number of live arrays, not counting array 0.
    pub fn live_count(&self) -> usize {
        self.slots.len() - 1 - self.free.len()
    }

    /// Returns true if `handle` names a live array (0 always does).
    pub fn is_live(&self, handle: u32) -> bool {
        self.array(handle).is_ok()
    }
}
