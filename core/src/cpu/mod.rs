mod interrupt;
mod stack;

use crate::alu::alu;
use crate::bus::SystemBus;
use crate::pic::Pic;
use crate::registers::Registers;
use crate::stats::Stats;
use crate::types::Opcode;

pub use interrupt::KEYBOARD_ISR_ADDRESS;

/// Fetch/decode/execute engine for the accumulator machine.
///
/// One [`Cpu::step`] call performs at most one interrupt context switch and
/// exactly one fetch/decode/execute cycle (the ISR's first instruction runs
/// in the same step it is entered in).
pub struct Cpu {
    pub regs: Registers,
    interrupts_enabled: bool,
    halted: bool,
}

impl Cpu {
    pub fn new(stack_top: u32) -> Self {
        Self {
            regs: Registers::new(stack_top),
            interrupts_enabled: true,
            halted: false,
        }
    }

    pub fn reset(&mut self, stack_top: u32) {
        self.regs.reset(stack_top);
        self.interrupts_enabled = true;
        self.halted = false;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    /// Advance the machine by one step. `current_cycle` is the driver's
    /// monotonically increasing cycle counter, used for IRQ latency
    /// accounting.
    pub fn step(&mut self, bus: &mut SystemBus, pic: &mut Pic, stats: &mut Stats, current_cycle: u64) {
        if self.halted {
            return;
        }

        interrupt::maybe_enter(
            &mut self.regs,
            bus,
            pic,
            stats,
            &mut self.interrupts_enabled,
            current_cycle,
        );

        let ir = bus.read(self.regs.pc, stats);
        self.regs.ir = ir;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        stats.total_instructions += 1;

        let decoded = crate::decoder::decode(ir);

        let resolved = if decoded.opcode.keeps_raw_operand() {
            decoded.operand as i32
        } else if decoded.is_address_mode {
            let v = bus.read(decoded.operand, stats);
            stats.cpu_bytes_copied += 4;
            v as i32
        } else {
            decoded.operand as i32
        };

        self.execute(decoded.opcode, decoded.operand, resolved, bus, stats);
    }

    fn execute(
        &mut self,
        opcode: Opcode,
        raw_operand: u32,
        resolved: i32,
        bus: &mut SystemBus,
        stats: &mut Stats,
    ) {
        match opcode {
            Opcode::Halt => self.halted = true,
            Opcode::Add | Opcode::Sub | Opcode::And | Opcode::Xor | Opcode::Slt | Opcode::Load => {
                let acc = self.regs.acc();
                self.regs.set_acc(alu(opcode, acc, resolved));
            }
            Opcode::Store => {
                bus.write(raw_operand, self.regs.acc() as u32);
                stats.cpu_bytes_copied += 4;
            }
            Opcode::Jump => self.regs.pc = raw_operand,
            Opcode::Jeq => {
                if self.regs.zero {
                    self.regs.pc = raw_operand;
                }
            }
            Opcode::Push => {
                let acc = self.regs.acc() as u32;
                stack::push(&mut self.regs, bus, stats, acc);
            }
            Opcode::Pop => {
                let v = stack::pop(&mut self.regs, bus, stats);
                self.regs.set_acc(v as i32);
            }
            Opcode::Call => {
                let pc = self.regs.pc;
                stack::push(&mut self.regs, bus, stats, pc);
                self.regs.pc = raw_operand;
            }
            Opcode::Ret => {
                self.regs.pc = stack::pop(&mut self.regs, bus, stats);
                self.interrupts_enabled = true;
            }
            Opcode::Unknown(bits) => {
                eprintln!("[CPU] unknown opcode 0x{bits:02X} at pc={}", self.regs.pc);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MainMemory;
    use crate::device::{Display, Keyboard, NullInputSource, NullOutputSink};
    use crate::types::encode;

    const STACK_TOP: u32 = 1023;

    fn harness(program: &[u32]) -> (Cpu, SystemBus, Pic, Stats) {
        let mut bus = SystemBus::new(
            MainMemory::direct(1024),
            Display::new(Box::new(NullOutputSink)),
            Keyboard::new(Box::new(NullInputSource)),
        );
        bus.load_program(program);
        (Cpu::new(STACK_TOP), bus, Pic::new(), Stats::new())
    }

    fn run_to_halt(cpu: &mut Cpu, bus: &mut SystemBus, pic: &mut Pic, stats: &mut Stats) {
        let mut cycle = 0u64;
        while !cpu.is_halted() {
            stats.total_cycles += 1;
            cpu.step(bus, pic, stats, cycle);
            cycle += 1;
            assert!(cycle < 10_000, "runaway program");
        }
    }

    #[test]
    fn scenario_s1_arithmetic() {
        let program = [
            encode(Opcode::Load, false, 5),
            encode(Opcode::Add, false, 7),
            encode(Opcode::Store, true, 100),
            encode(Opcode::Halt, false, 0),
        ];
        let (mut cpu, mut bus, mut pic, mut stats) = harness(&program);
        run_to_halt(&mut cpu, &mut bus, &mut pic, &mut stats);
        assert_eq!(cpu.regs.acc(), 12);
        assert_eq!(bus.read(100, &mut stats), 12);
        assert!(!cpu.regs.zero);
        assert!(!cpu.regs.negative);
    }

    #[test]
    fn scenario_s2_conditional_loop() {
        // addr: 0 LOAD #3; 1 LOOP STORE 50; 2 SUB #1; 3 JEQ END(6); 4 JUMP LOOP(1); 5 unused; 6 END HALT
        let program = [
            encode(Opcode::Load, false, 3),
            encode(Opcode::Store, true, 50),
            encode(Opcode::Sub, false, 1),
            encode(Opcode::Jeq, true, 6),
            encode(Opcode::Jump, true, 1),
            0,
            encode(Opcode::Halt, false, 0),
        ];
        let (mut cpu, mut bus, mut pic, mut stats) = harness(&program);
        run_to_halt(&mut cpu, &mut bus, &mut pic, &mut stats);
        assert_eq!(bus.read(50, &mut stats), 1);
        assert_eq!(cpu.regs.acc(), 0);
        assert!(cpu.regs.zero);
        assert_eq!(cpu.regs.pc, 7);
    }

    #[test]
    fn scenario_s4_stack_roundtrip() {
        let program = [
            encode(Opcode::Load, false, 42),
            encode(Opcode::Push, false, 0),
            encode(Opcode::Load, false, 0),
            encode(Opcode::Pop, false, 0),
            encode(Opcode::Halt, false, 0),
        ];
        let (mut cpu, mut bus, mut pic, mut stats) = harness(&program);
        run_to_halt(&mut cpu, &mut bus, &mut pic, &mut stats);
        assert_eq!(cpu.regs.acc(), 42);
        assert_eq!(cpu.regs.sp, STACK_TOP);
    }

    #[test]
    fn scenario_s5_call_ret() {
        // 0 LOAD #10; 1 CALL SUB(5); 2 STORE 200; 3 HALT; 4 unused; 5 SUB ADD #5; 6 RET
        let program = [
            encode(Opcode::Load, false, 10),
            encode(Opcode::Call, true, 5),
            encode(Opcode::Store, true, 200),
            encode(Opcode::Halt, false, 0),
            0,
            encode(Opcode::Add, false, 5),
            encode(Opcode::Ret, false, 0),
        ];
        let (mut cpu, mut bus, mut pic, mut stats) = harness(&program);
        run_to_halt(&mut cpu, &mut bus, &mut pic, &mut stats);
        assert_eq!(bus.read(200, &mut stats), 15);
        assert_eq!(cpu.regs.sp, STACK_TOP);
        assert!(cpu.interrupts_enabled());
    }

    struct OneByteSource(Option<u8>);
    impl crate::device::InputSource for OneByteSource {
        fn poll_byte(&mut self) -> Option<u8> {
            self.0.take()
        }
    }

    #[test]
    fn scenario_s6_keyboard_interrupt() {
        // main: 0 ADD #0 (the instruction the IRQ preempts); 1 HALT
        // ISR at 500: LOAD 0xF000 ; STORE 100 ; RET
        let mut program = vec![encode(Opcode::Add, false, 0), encode(Opcode::Halt, false, 0)];
        program.resize(500, 0);
        program.push(encode(Opcode::Load, true, 0xF000));
        program.push(encode(Opcode::Store, true, 100));
        program.push(encode(Opcode::Ret, false, 0));

        let mut bus = SystemBus::new(
            MainMemory::direct(1024),
            Display::new(Box::new(NullOutputSink)),
            Keyboard::new(Box::new(OneByteSource(Some(b'A')))),
        );
        bus.load_program(&program);
        let mut cpu = Cpu::new(STACK_TOP);
        let mut pic = Pic::new();
        let mut stats = Stats::new();

        // cycle 0: keyboard enqueues 'A' and raises the IRQ before PC=0 is
        // fetched; the CPU enters the ISR and executes its first
        // instruction (LOAD 0xF000) in this same step.
        bus.keyboard.tick(&mut pic, 0);
        cpu.step(&mut bus, &mut pic, &mut stats, 0);
        assert!(!cpu.interrupts_enabled());
        assert_eq!(cpu.regs.acc(), b'A' as i32);

        // cycle 1: STORE 100
        cpu.step(&mut bus, &mut pic, &mut stats, 1);
        assert_eq!(bus.read(100, &mut stats), b'A' as u32);

        // cycle 2: RET pops the PC the interrupt handshake saved and
        // re-enables interrupts.
        cpu.step(&mut bus, &mut pic, &mut stats, 2);
        assert_eq!(cpu.regs.pc, 0, "must resume at the pre-IRQ instruction");
        assert!(cpu.interrupts_enabled());

        // cycle 3: the preempted ADD #0 now runs normally.
        cpu.step(&mut bus, &mut pic, &mut stats, 3);
        assert_eq!(cpu.regs.pc, 1);

        // cycle 4: HALT
        cpu.step(&mut bus, &mut pic, &mut stats, 4);
        assert!(cpu.is_halted());

        assert_eq!(stats.irq_count, 1);
    }
}
