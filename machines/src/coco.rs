use std::cell::RefCell;
use std::rc::Rc;

use phosphor_core::core::bus::InterruptState;
use phosphor_core::core::machine::{InputButton, Machine};
use phosphor_core::core::{Bus, BusMaster};
use phosphor_core::cpu::m6809::M6809;
use phosphor_core::cpu::{Cpu, RunState};
use phosphor_core::device::memory::Memory;
use phosphor_core::device::pia0::Pia0;
use phosphor_core::device::pia1::Pia1;
use phosphor_core::device::sam::Sam;
use phosphor_core::device::vdg::{PALETTE, Vdg};
use phosphor_core::host::{Host, ResetPress};

use crate::rom_loader::{RomEntry, RomLoadError, RomRegion, RomSet};

/// System ROM window: 0x8000..=0xFEFF (bit-exact per the memory map). The
/// optional cartridge image overlays the tail of this span and is installed
/// separately by `load_cartridge_rom`.
const SYSTEM_ROM_BASE: u16 = 0x8000;
const SYSTEM_ROM_END: u16 = 0xFEFF;
const SYSTEM_ROM_SIZE: usize = (SYSTEM_ROM_END - SYSTEM_ROM_BASE) as usize + 1;
const CARTRIDGE_ROM_BASE: u16 = 0xC000;

const VECTOR_REDIRECT_BASE: u16 = 0xFFF2;
const VECTOR_REDIRECT_END: u16 = 0xFFFF;
const VECTOR_REDIRECT_XOR: u16 = 0x4000;

const PIA0_BASE: u16 = 0xFF00;
const PIA0_END: u16 = 0xFF03;
const PIA1_BASE: u16 = 0xFF20;
const PIA1_END: u16 = 0xFF23;
const SAM_BASE: u16 = 0xFFC0;
const SAM_END: u16 = 0xFFDF;

/// RAM byte a long reset-button press scribbles over to force a cold start
/// (the only software-visible difference between warm and cold reset).
const COLD_START_FLAG_ADDR: u16 = 0x0071;

/// Approximate CPU cycles in one ~50 Hz video field at the system's
/// nominal 0.895 MHz clock. `run_frame` steps the CPU until this many
/// cycles have been consumed, then renders and pulses field sync once,
/// matching the main loop's "every N ticks" cadence (§4.7).
const CYCLES_PER_FRAME: u32 = 17_897;

/// No canonical system-ROM image is pinned to a single checksum here (unlike
/// an arcade set, a home-computer ROM has many legitimate revisions) so the
/// entry is accepted unconditionally and only size-checked.
pub static COCO_SYSTEM_ROM: RomRegion = RomRegion {
    size: SYSTEM_ROM_SIZE,
    entries: &[RomEntry {
        name: "coco.rom",
        size: SYSTEM_ROM_SIZE,
        offset: 0,
        crc32: None,
    }],
};

/// A Motorola 6809E home computer: CPU + memory fabric + SAM + VDG + two
/// PIAs, driven by a host-supplied `Host` implementation for everything
/// outside the board (framebuffer, keyboard, audio, storage, timing).
pub struct Coco<H: Host> {
    cpu: M6809,
    memory: Memory,
    vdg: Rc<RefCell<Vdg>>,
    pia0: Rc<RefCell<Pia0<H>>>,
    pia1: Rc<RefCell<Pia1<H>>>,
    host: Rc<RefCell<H>>,

    /// 8-bit palette-indexed framebuffer filled by `Vdg::render` during
    /// `run_frame`; `render_frame` (an immutable-`self` trait method)
    /// converts it to RGB24 on demand rather than re-rendering.
    framebuffer: Vec<u8>,
    last_audio_mux: u8,
    loader_escape_pending: bool,
}

impl<H: Host> Coco<H> {
    pub fn new(host: Rc<RefCell<H>>) -> Self {
        let vdg = Rc::new(RefCell::new(Vdg::new()));
        let sam: Rc<RefCell<Sam>> = Rc::new(RefCell::new(Sam::new(vdg.clone())));
        let pia0 = Rc::new(RefCell::new(Pia0::new(host.clone())));
        let pia1 = Rc::new(RefCell::new(Pia1::new(host.clone(), vdg.clone())));

        let mut memory = Memory::new();
        memory.define_io(PIA0_BASE..=PIA0_END, pia0.clone());
        memory.define_io(PIA1_BASE..=PIA1_END, pia1.clone());
        memory.define_io(SAM_BASE..=SAM_END, sam);
        memory.define_redirect(VECTOR_REDIRECT_BASE..=VECTOR_REDIRECT_END, VECTOR_REDIRECT_XOR);

        let (fb_w, fb_h) = vdg.borrow().mode().resolution();

        Self {
            cpu: M6809::new(),
            memory,
            vdg,
            pia0,
            pia1,
            host,
            framebuffer: vec![0u8; (fb_w * fb_h) as usize],
            last_audio_mux: 0,
            loader_escape_pending: false,
        }
    }

    /// Install a system ROM image, sized to the full 0x8000..=0xFEFF span
    /// (shorter images are zero-padded at the tail). Must be called before
    /// `reset()` so the reset vector load finds real data.
    pub fn load_system_rom(&mut self, data: &[u8]) {
        self.memory.load(SYSTEM_ROM_BASE, data);
        self.memory.define_rom(SYSTEM_ROM_BASE..=SYSTEM_ROM_END);
    }

    /// Overlay an optional cartridge image at 0xC000, replacing whatever
    /// system-ROM bytes previously sat there (loader-installed, per §6).
    pub fn load_cartridge_rom(&mut self, data: &[u8]) {
        self.memory.load(CARTRIDGE_ROM_BASE, data);
        self.memory.define_rom(SYSTEM_ROM_BASE..=SYSTEM_ROM_END);
    }

    /// Load the system ROM from a `RomSet` using `COCO_SYSTEM_ROM`'s mapping.
    pub fn load_rom_set(&mut self, rom_set: &RomSet) -> Result<(), RomLoadError> {
        let data = COCO_SYSTEM_ROM.load_skip_checksums(rom_set)?;
        self.load_system_rom(&data);
        Ok(())
    }

    /// Drive the CPU through exactly one `step()` (the only forward-progress
    /// primitive, per §4.2.1). Mirrors the arcade-board `tick()` idiom: the
    /// bus and the component driving it are the same struct, so a raw
    /// pointer sidesteps the otherwise-simultaneous `&mut self.cpu` /
    /// `&mut dyn Bus` borrow (the `Bus` impl below never touches `self.cpu`,
    /// so the aliasing is harmless).
    fn tick(&mut self) -> RunState {
        let bus_ptr: *mut Self = self;
        unsafe {
            let bus = &mut *bus_ptr as &mut dyn Bus<Address = u16, Data = u8>;
            self.cpu.step(bus, BusMaster::Cpu(0))
        }
    }

    fn poll_reset_button(&mut self) {
        match self.host.borrow().reset_button() {
            ResetPress::Short => self.cpu.reset(true),
            ResetPress::Long => {
                self.memory.write(COLD_START_FLAG_ADDR, 0);
                self.cpu.reset(true);
            }
            ResetPress::None => self.cpu.reset(false),
        }
    }

    fn poll_function_key(&mut self) {
        if self.pia0.borrow_mut().function_key() == 1 {
            // The loader menu UI is an out-of-scope external collaborator
            // (§1); the frontend polls this flag and owns the escape.
            self.loader_escape_pending = true;
        }
    }

    fn update_audio_mux(&mut self) {
        let bit0 = self.pia0.borrow().audio_mux_bit0() as u8;
        let bit1 = self.pia1.borrow().audio_mux_bit1() as u8;
        let sel2 = bit0 | (bit1 << 1);
        if sel2 != self.last_audio_mux {
            self.last_audio_mux = sel2;
            self.host.borrow_mut().audio_mux_set(sel2);
        }
    }

    /// Consumes and returns a pending loader-escape request (F1), cleared on
    /// read. The frontend polls this after `run_frame` and, if set, is
    /// responsible for presenting whatever loader/menu UI it implements.
    pub fn take_loader_escape_request(&mut self) -> bool {
        std::mem::take(&mut self.loader_escape_pending)
    }
}

impl<H: Host> Bus for Coco<H> {
    type Address = u16;
    type Data = u8;

    fn read(&mut self, _master: BusMaster, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    fn write(&mut self, _master: BusMaster, addr: u16, data: u8) {
        self.memory.write(addr, data);
    }

    fn is_halted_for(&self, _master: BusMaster) -> bool {
        false
    }

    fn check_interrupts(&self, target: BusMaster) -> InterruptState {
        match target {
            BusMaster::Cpu(0) => InterruptState {
                nmi: false,
                irq: self.pia0.borrow().irq(),
                firq: false,
            },
            _ => InterruptState::default(),
        }
    }
}

impl<H: Host> Machine for Coco<H> {
    fn display_size(&self) -> (u32, u32) {
        self.vdg.borrow().mode().resolution()
    }

    fn run_frame(&mut self) {
        let mut cycles = 0u32;
        while cycles < CYCLES_PER_FRAME {
            self.poll_reset_button();
            self.tick();
            self.poll_function_key();
            self.update_audio_mux();
            cycles += self.cpu.get_state().last_cycles as u32;
        }

        let (w, h) = self.vdg.borrow_mut().render(&self.memory, &mut self.framebuffer[..]);
        let needed = (w * h) as usize;
        if self.framebuffer.len() != needed {
            self.framebuffer.resize(needed, 0);
        }
        self.pia0.borrow_mut().vsync_irq();
    }

    fn render_frame(&self, buffer: &mut [u8]) {
        let (w, h) = self.display_size();
        let count = (w * h) as usize;
        for i in 0..count.min(self.framebuffer.len()).min(buffer.len() / 3) {
            let (r, g, b) = PALETTE[(self.framebuffer[i] & 0x0F) as usize];
            buffer[i * 3] = r;
            buffer[i * 3 + 1] = g;
            buffer[i * 3 + 2] = b;
        }
    }

    fn set_input(&mut self, _button: u8, _pressed: bool) {
        // This machine takes no discrete Machine::set_input buttons: the
        // keyboard matrix, joystick comparator/button, and reset button all
        // arrive continuously through the `Host` trait instead (§6), which
        // the frontend feeds directly rather than routing through here.
    }

    fn input_map(&self) -> &[InputButton] {
        &[]
    }

    fn reset(&mut self) {
        self.memory.write(COLD_START_FLAG_ADDR, 0);
        self.cpu.reset(true);
        self.tick();
        self.cpu.reset(false);
        self.last_audio_mux = 0;
        self.loader_escape_pending = false;
    }
}
