//! The narrow host-abstraction contract the core consumes (§6). Everything
//! behind this trait — framebuffer allocation, GPIO/SPI/UART drivers, the
//! SD/FAT32 reader, the system timer — is out of scope for the core and is
//! supplied by the frontend crate.

/// Result of polling the physical reset button, sampled once per main-loop
/// tick. A long press is the only software-visible way to force a cold
/// boot (see §3 Lifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPress {
    None,
    Short,
    Long,
}

pub trait Host {
    /// Request an 8-bit indexed framebuffer at the given resolution,
    /// returning a writable view the VDG renders into. Initializes the
    /// fixed 16-entry BGR palette (see `device::vdg::PALETTE`).
    fn fb_init(&mut self, width: u32, height: u32) -> &mut [u8];

    /// Change resolution on a VDG mode switch; may reallocate.
    fn fb_resolution(&mut self, width: u32, height: u32) -> &mut [u8];

    /// Monotonically increasing microsecond counter.
    fn system_time_us(&self) -> u32;

    /// Next keyboard event: bit 7 = break(1)/make(0); bits 0..6 = scan
    /// code. Returns 0 when no event is pending.
    fn keyboard_read(&mut self) -> u8;

    fn joystk_comp(&self) -> bool;
    fn rjoystk_button(&self) -> bool;
    fn reset_button(&self) -> ResetPress;

    fn audio_mux_set(&mut self, sel2: u8);
    fn write_dac(&mut self, v6: u8);

    fn sd_read_block(&mut self, lba: u32, buf: &mut [u8]) -> bool;

    /// Next byte of the mounted cassette stream, or `None` at end of file
    /// (the core pads with 0x55 rather than treating this as an error).
    fn fat32_fread(&mut self) -> Option<u8>;

    /// Requests the external loader hand over (and open) the mounted
    /// cassette file, triggered by PIA1-CRA's motor-on transition.
    fn loader_mount_cas(&mut self);
}
