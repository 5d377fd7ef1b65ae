pub mod alu;
pub mod bus;
pub mod cache;
pub mod cpu;
pub mod decoder;
pub mod device;
pub mod pic;
pub mod ram;
pub mod registers;
pub mod stats;
pub mod types;

pub use alu::alu;
pub use bus::{MainMemory, MemoryDevice, SystemBus};
pub use cache::Cache;
pub use cpu::Cpu;
pub use decoder::{decode, Decoded};
pub use device::{Display, InputSource, Keyboard, NullInputSource, NullOutputSink, OutputSink};
pub use pic::Pic;
pub use ram::Ram;
pub use registers::Registers;
pub use stats::Stats;
pub use types::{encode, Address, Opcode, Word};
