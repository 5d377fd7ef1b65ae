//! Wires RAM/Cache, Display, Keyboard, the PIC, and the CPU into a runnable
//! machine, and drives the main loop: advance the cycle counter, tick the
//! keyboard, step the CPU.

use accumulon_core::{
    Cpu, Display, InputSource, Keyboard, MainMemory, OutputSink, Pic, Stats, SystemBus, Word,
};

const RAM_SIZE: usize = 1024;
const DEFAULT_CACHE_LINES: usize = 8;
const DEFAULT_BLOCK_SIZE: u32 = 4;

/// Whether main memory is accessed directly or through the write-through
/// cache.
pub enum MemoryMode {
    Direct,
    Cached {
        num_lines: usize,
        block_size: u32,
        verbose: bool,
    },
}

impl MemoryMode {
    pub fn cached_default(verbose: bool) -> Self {
        MemoryMode::Cached {
            num_lines: DEFAULT_CACHE_LINES,
            block_size: DEFAULT_BLOCK_SIZE,
            verbose,
        }
    }
}

pub struct System {
    pub cpu: Cpu,
    pub bus: SystemBus,
    pub pic: Pic,
    pub stats: Stats,
    cycle: u64,
}

impl System {
    pub fn new(
        mode: MemoryMode,
        output: Box<dyn OutputSink>,
        input: Box<dyn InputSource>,
        program: &[Word],
    ) -> Self {
        let memory = match mode {
            MemoryMode::Direct => MainMemory::direct(RAM_SIZE),
            MemoryMode::Cached {
                num_lines,
                block_size,
                verbose,
            } => MainMemory::cached(RAM_SIZE, num_lines, block_size, verbose),
        };
        let mut bus = SystemBus::new(memory, Display::new(output), Keyboard::new(input));
        bus.load_program(program);

        let stack_top = (RAM_SIZE - 1) as u32;
        Self {
            cpu: Cpu::new(stack_top),
            bus,
            pic: Pic::new(),
            stats: Stats::new(),
            cycle: 0,
        }
    }

    /// One iteration of the main loop: advance the cycle counter, poll the
    /// keyboard, step the CPU. Returns whether the machine is now halted.
    pub fn tick(&mut self) -> bool {
        self.stats.total_cycles += 1;
        self.bus.keyboard.tick(&mut self.pic, self.cycle);
        self.cpu.step(&mut self.bus, &mut self.pic, &mut self.stats, self.cycle);
        self.cycle += 1;
        self.cpu.is_halted()
    }

    /// Run until halted. A `max_cycles` guard prevents a runaway program
    /// from looping forever in headless contexts (not part of the pinned
    /// contract — the CLI always passes a generous bound).
    pub fn run_to_halt(&mut self, max_cycles: u64) {
        while !self.cpu.is_halted() && self.cycle < max_cycles {
            self.tick();
        }
    }
}
