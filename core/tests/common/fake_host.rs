use std::collections::VecDeque;

use phosphor_core::host::{Host, ResetPress};

/// A minimal `Host` stand-in for device-level tests: a keyboard event
/// queue the test pushes into directly, a cassette byte source backed by
/// an in-memory `Vec<u8>`, and recorders for the DAC/audio-mux writes.
pub struct FakeHost {
    pub keyboard_events: VecDeque<u8>,
    pub joystick_comp: bool,
    pub joystick_button: bool,
    pub reset: ResetPress,
    pub dac_writes: Vec<u8>,
    pub audio_mux_writes: Vec<u8>,
    pub cassette: VecDeque<u8>,
    pub cassette_mount_requests: u32,
    pub framebuffer: Vec<u8>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            keyboard_events: VecDeque::new(),
            joystick_comp: false,
            joystick_button: false,
            reset: ResetPress::None,
            dac_writes: Vec::new(),
            audio_mux_writes: Vec::new(),
            cassette: VecDeque::new(),
            cassette_mount_requests: 0,
            framebuffer: vec![0u8; 256 * 192],
        }
    }
}

impl Host for FakeHost {
    fn fb_init(&mut self, width: u32, height: u32) -> &mut [u8] {
        self.framebuffer.resize((width * height) as usize, 0);
        &mut self.framebuffer[..]
    }

    fn fb_resolution(&mut self, width: u32, height: u32) -> &mut [u8] {
        self.fb_init(width, height)
    }

    fn system_time_us(&self) -> u32 {
        0
    }

    fn keyboard_read(&mut self) -> u8 {
        self.keyboard_events.pop_front().unwrap_or(0)
    }

    fn joystk_comp(&self) -> bool {
        self.joystick_comp
    }

    fn rjoystk_button(&self) -> bool {
        self.joystick_button
    }

    fn reset_button(&self) -> ResetPress {
        self.reset
    }

    fn audio_mux_set(&mut self, sel2: u8) {
        self.audio_mux_writes.push(sel2);
    }

    fn write_dac(&mut self, v6: u8) {
        self.dac_writes.push(v6);
    }

    fn sd_read_block(&mut self, _lba: u32, _buf: &mut [u8]) -> bool {
        false
    }

    fn fat32_fread(&mut self) -> Option<u8> {
        self.cassette.pop_front()
    }

    fn loader_mount_cas(&mut self) {
        self.cassette_mount_requests += 1;
    }
}
