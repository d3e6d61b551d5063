use crate::core::BusMaster;

/// A piece of hardware that advances one clock tick at a time without needing
/// bus access of its own (e.g. a timer, or a device driven purely by writes
/// from something else). Returns true on a logical boundary (defined by the
/// implementor) so callers can detect completed work without polling state.
pub trait Component {
    fn tick(&mut self) -> bool;
}

/// A component that drives its own bus accesses each tick (CPUs, DMA
/// controllers). `Bus` is an associated type rather than a generic parameter
/// so a single concrete component type can be stored as a trait object
/// alongside others sharing the same bus.
pub trait BusMasterComponent {
    type Bus: ?Sized;

    /// Advance one clock cycle, performing any bus reads/writes this tick
    /// requires. Returns true when an instruction (or equivalent atomic unit
    /// of work) has completed.
    fn tick_with_bus(&mut self, bus: &mut Self::Bus, master: BusMaster) -> bool;
}
