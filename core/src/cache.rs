use crate::bus::MemoryDevice;
use crate::stats::Stats;
use crate::types::{Address, Word};

struct Line {
    valid: bool,
    tag: u32,
    data: Vec<Word>,
}

/// Direct-mapped, write-through cache with block fill on read miss.
///
/// Wraps a backing [`MemoryDevice`] (normally [`crate::Ram`]). Writes always
/// reach the backing store; they only update the cache line in place when
/// the line already holds the matching tag (no allocate-on-write-miss).
pub struct Cache<M: MemoryDevice> {
    backing: M,
    lines: Vec<Line>,
    block_size: u32,
    verbose: bool,
}

const MISS_PENALTY: u64 = 10;

impl<M: MemoryDevice> Cache<M> {
    pub fn new(backing: M, num_lines: usize, block_size: u32) -> Self {
        let lines = (0..num_lines)
            .map(|_| Line {
                valid: false,
                tag: 0,
                data: vec![0; block_size as usize],
            })
            .collect();
        Self {
            backing,
            lines,
            block_size,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn block_addr(&self, addr: Address) -> u32 {
        addr / self.block_size
    }

    fn offset(&self, addr: Address) -> usize {
        (addr % self.block_size) as usize
    }

    fn index(&self, block_addr: u32) -> usize {
        (block_addr as usize) % self.lines.len()
    }

    fn tag(&self, block_addr: u32) -> u32 {
        block_addr / self.lines.len() as u32
    }

    pub fn read(&mut self, addr: Address, stats: &mut Stats) -> Word {
        let block_addr = self.block_addr(addr);
        let offset = self.offset(addr);
        let index = self.index(block_addr);
        let tag = self.tag(block_addr);

        let hit = self.lines[index].valid && self.lines[index].tag == tag;
        if hit {
            stats.cache_hits += 1;
            if self.verbose {
                eprintln!("[CACHE] hit addr={addr:#06X} index={index} tag={tag}");
            }
            return self.lines[index].data[offset];
        }

        stats.cache_misses += 1;
        stats.bus_wait_cycles += MISS_PENALTY;
        let base = block_addr * self.block_size;
        for i in 0..self.block_size {
            self.lines[index].data[i as usize] = self.backing.read(base + i);
        }
        self.lines[index].valid = true;
        self.lines[index].tag = tag;
        if self.verbose {
            eprintln!(
                "[CACHE] miss addr={addr:#06X} filled block [{base:#06X}, {:#06X})",
                base + self.block_size
            );
        }
        self.lines[index].data[offset]
    }

    pub fn write(&mut self, addr: Address, value: Word) {
        self.backing.write(addr, value);

        let block_addr = self.block_addr(addr);
        let offset = self.offset(addr);
        let index = self.index(block_addr);
        let tag = self.tag(block_addr);

        if self.lines[index].valid && self.lines[index].tag == tag {
            self.lines[index].data[offset] = value;
        }
    }

    pub fn load_program(&mut self, program: &[Word]) {
        self.backing.load_program(program);
    }
}
