use crate::types::Opcode;

/// Pure arithmetic/logic step: `acc (op) operand -> new acc`.
///
/// Opcodes that do not pass through the ALU (HALT, STORE, JUMP, JEQ, PUSH,
/// POP, CALL, RET) return `acc` unchanged, which guarantees they never
/// disturb the Z/N flags through this path.
pub fn alu(opcode: Opcode, acc: i32, operand: i32) -> i32 {
    match opcode {
        Opcode::Add => acc.wrapping_add(operand),
        Opcode::Sub => acc.wrapping_sub(operand),
        Opcode::And => acc & operand,
        Opcode::Xor => acc ^ operand,
        Opcode::Slt => {
            if acc < operand {
                1
            } else {
                0
            }
        }
        Opcode::Load => operand,
        Opcode::Halt
        | Opcode::Store
        | Opcode::Jump
        | Opcode::Jeq
        | Opcode::Push
        | Opcode::Pop
        | Opcode::Call
        | Opcode::Ret => acc,
        Opcode::Unknown(bits) => {
            eprintln!("[ALU] unknown or non-arithmetic opcode 0x{bits:02X}");
            acc
        }
    }
}
