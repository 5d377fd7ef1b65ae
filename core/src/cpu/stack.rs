use crate::bus::SystemBus;
use crate::registers::Registers;
use crate::stats::Stats;
use crate::types::Word;

/// Stack grows downward: push stores at the current SP then decrements it;
/// pop increments SP first, then loads.
pub fn push(regs: &mut Registers, bus: &mut SystemBus, stats: &mut Stats, value: Word) {
    bus.write(regs.sp, value);
    stats.cpu_bytes_copied += 4;
    regs.sp = regs.sp.wrapping_sub(1);
}

pub fn pop(regs: &mut Registers, bus: &mut SystemBus, stats: &mut Stats) -> Word {
    regs.sp = regs.sp.wrapping_add(1);
    let value = bus.read(regs.sp, stats);
    stats.cpu_bytes_copied += 4;
    value
}
