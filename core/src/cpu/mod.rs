use crate::core::{Bus, BusMaster};

/// Coarse run state reported by `Cpu::step`/`Cpu::get_state`, distinct from
/// the cycle-granular internal `ExecState` each CPU keeps privately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Fetching and executing instructions normally.
    Exec,
    /// TSC/HALT line asserted; bus is tri-stated from this master's view.
    Halted,
    /// Asleep in SYNC or CWAI, waiting for an interrupt line.
    Sync,
    /// Reset asserted; vector fetch has not yet completed.
    Reset,
    /// Decoder hit an opcode with no defined behavior.
    Exception,
}

/// Public contract every CPU core in this crate exposes to a machine: a
/// handful of async line-level setters plus the single `step` forward-
/// progress primitive. Internally a CPU may still offer a finer
/// `BusMasterComponent::tick_with_bus` for cycle-exact test harnesses.
pub trait Cpu {
    /// Load the initial register file and enter the Halted run state,
    /// ready for `reset(true)` then `reset(false)` to vector in.
    fn init(&mut self, start_addr: u16);

    /// Assert/deassert the TSC-style halt line.
    fn halt(&mut self, asserted: bool);

    /// Assert/deassert the reset line. Vectoring happens once the line is
    /// released (edge low->high is sampled by `step`).
    fn reset(&mut self, asserted: bool);

    /// Assert/deassert the level-sensitive IRQ line.
    fn irq(&mut self, asserted: bool);

    /// Assert/deassert the level-sensitive FIRQ line.
    fn firq(&mut self, asserted: bool);

    /// Latch an edge-triggered NMI request.
    fn nmi_trigger(&mut self);

    /// Advance to the next instruction boundary (or halt/sleep/exception),
    /// driving however many clock cycles that requires.
    fn step<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        bus: &mut B,
        master: BusMaster,
    ) -> RunState;

    /// Snapshot of registers and run state for monitors/debuggers.
    fn get_state(&self) -> m6809::CpuDebugState;

    /// Disassemble the instruction at `addr` without advancing state.
    fn mnemonic_at<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &self,
        bus: &mut B,
        master: BusMaster,
        addr: u16,
    ) -> &'static str;

    /// True while asleep in HALT, SYNC, or CWAI.
    fn is_sleeping(&self) -> bool;
}

// Re-export state types
pub mod state;
pub use state::{CpuStateTrait, M6809State};

// Re-export the 6809 core
pub mod m6809;
pub use m6809::M6809;
