pub mod dac;
pub mod memory;
pub mod pia0;
pub mod pia1;
pub mod sam;
pub mod vdg;

pub use dac::Mc1408Dac;
pub use memory::Memory;
pub use pia0::Pia0;
pub use pia1::Pia1;
pub use sam::Sam;
pub use vdg::{Vdg, VdgMode};
