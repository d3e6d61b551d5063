//! SDL2-backed `Host` implementation: the seam a bare-metal target would
//! replace wholesale (§6/§4.8). Owns the keyboard event queue, the audio
//! ring buffer, the cassette file handle, and the framebuffer scratch
//! buffer the VDG renders into.

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::time::Instant;

use sdl2::keyboard::Scancode;

use phosphor_core::device::Mc1408Dac;
use phosphor_core::host::{Host, ResetPress};

use crate::audio::AudioRing;

/// Translate an SDL scancode to the AT Set-1 make code the core's keyboard
/// matrix expects (§4.5). Only the keys a CoCo-style 53-key keyboard cares
/// about are mapped; anything else is dropped.
fn at_set1_code(sc: Scancode) -> Option<u8> {
    use Scancode::*;
    Some(match sc {
        A => 0x1E,
        B => 0x30,
        C => 0x2E,
        D => 0x20,
        E => 0x12,
        F => 0x21,
        G => 0x22,
        H => 0x23,
        I => 0x17,
        J => 0x24,
        K => 0x25,
        L => 0x26,
        M => 0x32,
        N => 0x31,
        O => 0x18,
        P => 0x19,
        Q => 0x10,
        R => 0x13,
        S => 0x1F,
        T => 0x14,
        U => 0x16,
        V => 0x2F,
        W => 0x11,
        X => 0x2D,
        Y => 0x15,
        Z => 0x2C,
        Num0 => 0x0B,
        Num1 => 0x02,
        Num2 => 0x03,
        Num3 => 0x04,
        Num4 => 0x05,
        Num5 => 0x06,
        Num6 => 0x07,
        Num7 => 0x08,
        Num8 => 0x09,
        Num9 => 0x0A,
        Space => 0x39,
        Return => 0x1C,
        Backspace => 0x0E,
        Escape => 0x01,
        LShift | RShift => 0x2A,
        LCtrl | RCtrl => 0x1D,
        Comma => 0x33,
        Period => 0x34,
        Slash => 0x35,
        Semicolon => 0x27,
        Minus => 0x0C,
        Equals => 0x0D,
        F1 => 0x3B,
        F2 => 0x3C,
        F3 => 0x3D,
        F4 => 0x3E,
        F5 => 0x3F,
        F6 => 0x40,
        F7 => 0x41,
        F8 => 0x42,
        F9 => 0x43,
        F10 => 0x44,
        _ => return None,
    })
}

/// Parse a config-file scancode name (the SDL `Scancode` `Debug`/name form,
/// e.g. "F12", "LCtrl") back into a `Scancode`. Falls back to a sentinel
/// that never matches if unrecognized, so a bad config entry is inert
/// rather than fatal.
fn parse_scancode(name: &str) -> Scancode {
    Scancode::from_name(name).unwrap_or(Scancode::NonUsBackslash)
}

pub struct HostSdl {
    framebuffer: Vec<u8>,
    fb_width: u32,
    fb_height: u32,
    start: Instant,

    key_events: VecDeque<u8>,
    joystick_comp: bool,
    joystick_button: bool,
    reset_pending: ResetPress,

    reset_scancode: Scancode,
    joystick_fire_scancode: Scancode,

    audio_ring: Option<AudioRing>,
    dac: Mc1408Dac,

    cassette_path: Option<std::path::PathBuf>,
    cassette_file: Option<File>,
}

impl HostSdl {
    pub fn new(
        reset_scancode: Scancode,
        joystick_fire_scancode: Scancode,
        audio_ring: Option<AudioRing>,
        cassette_path: Option<std::path::PathBuf>,
    ) -> Self {
        Self {
            framebuffer: vec![0u8; 256 * 192],
            fb_width: 256,
            fb_height: 192,
            start: Instant::now(),
            key_events: VecDeque::new(),
            joystick_comp: false,
            joystick_button: false,
            reset_pending: ResetPress::None,
            reset_scancode,
            joystick_fire_scancode,
            audio_ring,
            dac: Mc1408Dac::new(),
            cassette_path,
            cassette_file: None,
        }
    }

    pub fn from_config(cfg: &crate::config::Config, audio_ring: Option<AudioRing>) -> Self {
        Self::new(
            parse_scancode(&cfg.reset_scancode),
            parse_scancode(&cfg.joystick_fire_scancode),
            audio_ring,
            cfg.cassette_path.as_ref().map(std::path::PathBuf::from),
        )
    }

    /// Feed an SDL keyboard event into the queue `keyboard_read` drains.
    pub fn push_key_event(&mut self, sc: Scancode, pressed: bool) {
        if let Some(code) = at_set1_code(sc) {
            let byte = if pressed { code } else { code | 0x80 };
            self.key_events.push_back(byte);
        }
    }

    pub fn set_joystick_button(&mut self, pressed: bool) {
        self.joystick_button = pressed;
    }

    pub fn set_joystick_comp(&mut self, level: bool) {
        self.joystick_comp = level;
    }

    pub fn request_reset(&mut self, long_press: bool) {
        self.reset_pending = if long_press {
            ResetPress::Long
        } else {
            ResetPress::Short
        };
    }

    pub fn clear_reset_request(&mut self) {
        self.reset_pending = ResetPress::None;
    }

    pub fn reset_scancode(&self) -> Scancode {
        self.reset_scancode
    }

    pub fn joystick_fire_scancode(&self) -> Scancode {
        self.joystick_fire_scancode
    }

    /// Current palette-indexed framebuffer, converted to RGB24 by the
    /// machine's own `render_frame`; exposed here only for the resolution
    /// bookkeeping `fb_init`/`fb_resolution` perform.
    pub fn framebuffer_resolution(&self) -> (u32, u32) {
        (self.fb_width, self.fb_height)
    }
}

impl Host for HostSdl {
    fn fb_init(&mut self, width: u32, height: u32) -> &mut [u8] {
        self.fb_width = width;
        self.fb_height = height;
        self.framebuffer.resize((width * height) as usize, 0);
        &mut self.framebuffer[..]
    }

    fn fb_resolution(&mut self, width: u32, height: u32) -> &mut [u8] {
        self.fb_init(width, height)
    }

    fn system_time_us(&self) -> u32 {
        self.start.elapsed().as_micros() as u32
    }

    fn keyboard_read(&mut self) -> u8 {
        self.key_events.pop_front().unwrap_or(0)
    }

    fn joystk_comp(&self) -> bool {
        self.joystick_comp
    }

    fn rjoystk_button(&self) -> bool {
        self.joystick_button
    }

    fn reset_button(&self) -> ResetPress {
        self.reset_pending
    }

    fn audio_mux_set(&mut self, _sel2: u8) {
        // The audio-mux select distinguishes DAC output from cassette/other
        // sources on real hardware; this host always mixes the DAC path,
        // matching the single-bit-sound/cassette-audio non-goal (§1).
    }

    fn write_dac(&mut self, v6: u8) {
        self.dac.write(v6 << 2);
        if let Some(ring) = &self.audio_ring {
            push_sample(ring, self.dac.sample_i16());
        }
    }

    fn sd_read_block(&mut self, _lba: u32, _buf: &mut [u8]) -> bool {
        // The SD/FAT32 layer is out of scope (§1); the cassette stream below
        // is the only storage path this host actually wires up.
        false
    }

    fn fat32_fread(&mut self) -> Option<u8> {
        let file = self.cassette_file.as_mut()?;
        let mut byte = [0u8; 1];
        match file.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn loader_mount_cas(&mut self) {
        if self.cassette_file.is_some() {
            return;
        }
        if let Some(path) = &self.cassette_path {
            match File::open(path) {
                Ok(f) => self.cassette_file = Some(f),
                Err(e) => eprintln!("warning: failed to open cassette {}: {e}", path.display()),
            }
        }
    }
}

fn push_sample(ring: &AudioRing, sample: i16) {
    let mut buf = ring.lock().unwrap();
    buf.push_back(sample);
    // Bound the queue so a stalled audio thread cannot leak memory; dropping
    // the oldest sample is inaudible compared to the alternative of growing
    // unbounded.
    const MAX_QUEUED: usize = 1 << 16;
    if buf.len() > MAX_QUEUED {
        buf.pop_front();
    }
}
