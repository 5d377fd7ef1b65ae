use crate::bus::SystemBus;
use crate::cpu::stack;
use crate::pic::Pic;
use crate::registers::Registers;
use crate::stats::Stats;

/// ISR entry address for the one defined interrupt vector (keyboard, vector 1).
pub const KEYBOARD_ISR_ADDRESS: u32 = 500;

fn vector_table(vector: u8) -> u32 {
    match vector {
        1 => KEYBOARD_ISR_ADDRESS,
        other => {
            eprintln!("[CPU] no ISR entry for vector {other}");
            0
        }
    }
}

/// If interrupts are enabled and the PIC is pending, perform the context
/// switch: ack, record latency, disable interrupts, push PC, jump to the
/// ISR. Returns whether an interrupt was entered this step.
pub fn maybe_enter(
    regs: &mut Registers,
    bus: &mut SystemBus,
    pic: &mut Pic,
    stats: &mut Stats,
    interrupts_enabled: &mut bool,
    current_cycle: u64,
) -> bool {
    if !*interrupts_enabled || !pic.is_pending() {
        return false;
    }
    let (vector, request_cycle) = pic.ack_irq();
    stats.record_irq(request_cycle, current_cycle);
    *interrupts_enabled = false;
    stack::push(regs, bus, stats, regs.pc);
    regs.pc = vector_table(vector);
    true
}
