use accumulon_core::{NullInputSource, NullOutputSink};
use accumulon_machine::{assemble, MemoryMode, System};

fn run(source: &str) -> System {
    let assembled = assemble(source);
    assert!(
        assembled.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        assembled.diagnostics
    );
    let mut sys = System::new(
        MemoryMode::Direct,
        Box::new(NullOutputSink),
        Box::new(NullInputSource),
        &assembled.words,
    );
    sys.run_to_halt(10_000);
    sys
}

#[test]
fn build_then_run_arithmetic_program() {
    let mut sys = run("LOAD #5\nADD #7\nSTORE 100\nHALT");
    let mut stats = sys.stats;
    assert_eq!(sys.cpu.regs.acc(), 12);
    assert_eq!(sys.bus.read(100, &mut stats), 12);
    assert!(!sys.cpu.regs.zero);
    assert!(!sys.cpu.regs.negative);
}

#[test]
fn build_then_run_conditional_loop() {
    let src = "\
        LOAD #3\n\
        LOOP: STORE 50\n\
        SUB #1\n\
        JEQ END\n\
        JUMP LOOP\n\
        END: HALT\n\
    ";
    let mut sys = run(src);
    let mut stats = sys.stats;
    assert_eq!(sys.bus.read(50, &mut stats), 1);
    assert_eq!(sys.cpu.regs.acc(), 0);
    assert!(sys.cpu.regs.zero);
}

#[test]
fn build_then_run_call_and_ret() {
    let src = "\
        LOAD #10\n\
        CALL SUB\n\
        STORE 200\n\
        HALT\n\
        SUB: ADD #5\n\
        RET\n\
    ";
    let mut sys = run(src);
    let mut stats = sys.stats;
    assert_eq!(sys.bus.read(200, &mut stats), 15);
    assert!(sys.cpu.interrupts_enabled());
}

#[test]
fn cached_memory_mode_produces_the_same_program_result() {
    let assembled = assemble("LOAD #5\nADD #7\nSTORE 100\nHALT");
    let mut sys = System::new(
        MemoryMode::cached_default(false),
        Box::new(NullOutputSink),
        Box::new(NullInputSource),
        &assembled.words,
    );
    sys.run_to_halt(10_000);
    assert_eq!(sys.cpu.regs.acc(), 12);
    assert!(sys.stats.cache_misses > 0);
}

#[test]
fn firmware_round_trip_through_a_temp_file() {
    let assembled = assemble("LOAD #1\nADD #1\nHALT");
    let dir = std::env::temp_dir().join("accumulon_e2e_test");
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("arith.bin");
    accumulon_machine::firmware::save(&path, &assembled.words).unwrap();
    let loaded = accumulon_machine::firmware::load(&path).unwrap();
    assert_eq!(loaded, assembled.words);
    let _ = std::fs::remove_file(&path);
}
