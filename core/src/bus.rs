use crate::cache::Cache;
use crate::device::{Display, Keyboard};
use crate::ram::Ram;
use crate::stats::Stats;
use crate::types::{Address, Word};

const DISPLAY_BASE: Address = 0xE000;
const KEYBOARD_BASE: Address = 0xF000;

/// Shared capability implemented by every addressable memory device: plain
/// RAM, and the cache that fronts it.
pub trait MemoryDevice {
    fn read(&self, addr: Address) -> Word;
    fn write(&mut self, addr: Address, value: Word);
    fn load_program(&mut self, program: &[Word]);
}

impl MemoryDevice for Ram {
    fn read(&self, addr: Address) -> Word {
        Ram::read(self, addr)
    }
    fn write(&mut self, addr: Address, value: Word) {
        Ram::write(self, addr, value)
    }
    fn load_program(&mut self, program: &[Word]) {
        Ram::load_program(self, program)
    }
}

/// Tagged choice between RAM accessed directly and RAM fronted by a cache.
///
/// Reading through this type is not a pure query: the cached variant
/// mutates cache state and the shared [`Stats`] counters.
pub enum MainMemory {
    Direct(Ram),
    Cached(Cache<Ram>),
}

impl MainMemory {
    pub fn direct(size: usize) -> Self {
        MainMemory::Direct(Ram::new(size))
    }

    pub fn cached(size: usize, num_lines: usize, block_size: u32, verbose: bool) -> Self {
        MainMemory::Cached(Cache::new(Ram::new(size), num_lines, block_size).with_verbose(verbose))
    }

    fn read(&mut self, addr: Address, stats: &mut Stats) -> Word {
        match self {
            MainMemory::Direct(ram) => ram.read(addr),
            MainMemory::Cached(cache) => cache.read(addr, stats),
        }
    }

    fn write(&mut self, addr: Address, value: Word) {
        match self {
            MainMemory::Direct(ram) => ram.write(addr, value),
            MainMemory::Cached(cache) => cache.write(addr, value),
        }
    }

    pub fn load_program(&mut self, program: &[Word]) {
        match self {
            MainMemory::Direct(ram) => ram.load_program(program),
            MainMemory::Cached(cache) => cache.load_program(program),
        }
    }
}

/// Address decoder routing every access to exactly one device.
///
/// Decision ladder: addresses >= 0xF000 hit the keyboard, >= 0xE000 hit the
/// display, everything else is main memory. The bus itself adds no latency
/// or reordering beyond what the target device imposes.
pub struct SystemBus {
    pub memory: MainMemory,
    pub display: Display,
    pub keyboard: Keyboard,
}

impl SystemBus {
    pub fn new(memory: MainMemory, display: Display, keyboard: Keyboard) -> Self {
        Self {
            memory,
            display,
            keyboard,
        }
    }

    pub fn read(&mut self, addr: Address, stats: &mut Stats) -> Word {
        if addr >= KEYBOARD_BASE {
            self.keyboard.read(addr)
        } else if addr >= DISPLAY_BASE {
            self.display.read(addr)
        } else {
            self.memory.read(addr, stats)
        }
    }

    pub fn write(&mut self, addr: Address, value: Word) {
        if addr >= KEYBOARD_BASE {
            self.keyboard.write(addr, value);
        } else if addr >= DISPLAY_BASE {
            self.display.write(addr, value);
        } else {
            self.memory.write(addr, value);
        }
    }

    pub fn load_program(&mut self, program: &[Word]) {
        self.memory.load_program(program);
    }
}
