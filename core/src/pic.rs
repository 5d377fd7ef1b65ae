/// Single-vector programmable interrupt controller.
///
/// Devices call [`Pic::request_irq`] to latch a pending request; the CPU
/// polls [`Pic::is_pending`] between instructions and calls
/// [`Pic::ack_irq`] to claim the vector and clear the latch. A device must
/// check `is_pending` itself before requesting again — a second request
/// while one is already pending silently overwrites the vector and
/// timestamp (see the open question recorded in DESIGN.md).
#[derive(Debug, Clone, Copy, Default)]
pub struct Pic {
    pending: bool,
    vector: u8,
    request_cycle: u64,
}

impl Pic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_irq(&mut self, vector: u8, current_cycle: u64) {
        self.pending = true;
        self.vector = vector;
        self.request_cycle = current_cycle;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Claim the pending interrupt, returning its vector and the cycle at
    /// which it was requested (for latency accounting). Clears the latch.
    pub fn ack_irq(&mut self) -> (u8, u64) {
        self.pending = false;
        (self.vector, self.request_cycle)
    }
}
