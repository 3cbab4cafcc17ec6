// Label and temporary-slot allocation
//
// Three independent monotonic counters. A fresh allocator is built for
// every compilation; it is never reset mid-walk, so no two allocations in
// one run can collide however deeply constructs nest.

/// Mints unique temporary slots and control-flow label indices.
#[derive(Debug)]
pub struct LabelAllocator {
    next_temp: u32,
    next_if: u32,
    next_repeat: u32,
}

impl Default for LabelAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelAllocator {
    pub fn new() -> Self {
        LabelAllocator {
            // Temporaries are numbered from 1, labels from 0.
            next_temp: 1,
            next_if: 0,
            next_repeat: 0,
        }
    }

    /// Next unused temporary-slot number.
    pub fn next_temp(&mut self) -> u32 {
        let slot = self.next_temp;
        self.next_temp += 1;
        slot
    }

    /// Next unused index for a THEN/ELSE/ENDIF label group.
    pub fn next_if_label(&mut self) -> u32 {
        let index = self.next_if;
        self.next_if += 1;
        index
    }

    /// Next unused index for a REPEAT/ENDREPEAT label pair.
    pub fn next_repeat_label(&mut self) -> u32 {
        let index = self.next_repeat;
        self.next_repeat += 1;
        index
    }
}
