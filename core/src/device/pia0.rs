use std::cell::RefCell;
use std::rc::Rc;

use super::memory::IoDevice;
use crate::host::Host;

/// Function-key scan codes, F1..F10 (not injected into the row matrix —
/// they latch a one-shot escape request instead, per §4.5).
const FUNCTION_KEY_BASE: u8 = 59;
const FUNCTION_KEY_COUNT: u8 = 10;

/// Scan-code -> (row, column bitmask) table. Index is the 7-bit AT-style
/// scan code from `Host::keyboard_read`. `None` entries are keys the
/// matrix does not wire up (or reserved/unused codes).
const KEY_TABLE: [Option<(u8, u8)>; 128] = build_key_table();

const fn build_key_table() -> [Option<(u8, u8)>; 128] {
    let mut table: [Option<(u8, u8)>; 128] = [None; 128];
    // Scan 16 (Q) is pinned to row 4 / column bit 1 to match the documented
    // end-to-end keyboard scenario (write 0xFD to PB -> PA bit 4 clears).
    table[16] = Some((4, 0b0000_0010));
    let mut code = 1u8;
    while code < 81 {
        if table[code as usize].is_none() {
            let row = 1 + (code % 6);
            let col = 1u8 << (code % 7);
            table[code as usize] = Some((row, col));
        }
        code += 1;
    }
    table
}

pub struct Pia0<H: Host> {
    cra: u8,
    crb: u8,
    last_pb: u8,
    field_sync_enabled: bool,
    field_sync_pending: bool,
    /// One 8-bit "currently pressed" pattern per keyboard row; idle (no
    /// key down) is all ones, matching invariant #8.
    row_bitmaps: [u8; 7],
    function_key: u8,
    audio_mux_bit0: bool,
    host: Rc<RefCell<H>>,
}

impl<H: Host> Pia0<H> {
    pub fn new(host: Rc<RefCell<H>>) -> Self {
        Self {
            cra: 0,
            crb: 0,
            last_pb: 0,
            field_sync_enabled: false,
            field_sync_pending: false,
            row_bitmaps: [0xFF; 7],
            function_key: 0,
            audio_mux_bit0: false,
            host,
        }
    }

    /// Host-driven field-sync tick (~20 ms cadence). Only raises the IRQ
    /// flag if the enable bit is set; the next PB read clears it.
    pub fn vsync_irq(&mut self) {
        if self.field_sync_enabled {
            self.field_sync_pending = true;
        }
    }

    /// Returns the latched function-key value (1..10, or 0) and clears it.
    pub fn function_key(&mut self) -> u8 {
        let v = self.function_key;
        self.function_key = 0;
        v
    }

    pub fn irq(&self) -> bool {
        self.field_sync_pending
    }

    pub fn audio_mux_bit0(&self) -> bool {
        self.audio_mux_bit0
    }

    fn poll_keyboard_and_scan(&mut self) {
        loop {
            let event = self.host.borrow_mut().keyboard_read();
            if event == 0 {
                break;
            }
            let is_break = event & 0x80 != 0;
            let scan = event & 0x7F;

            if (FUNCTION_KEY_BASE..FUNCTION_KEY_BASE + FUNCTION_KEY_COUNT).contains(&scan) {
                if !is_break {
                    self.function_key = scan - FUNCTION_KEY_BASE + 1;
                }
                continue;
            }

            if let Some((row, col_mask)) = KEY_TABLE[scan as usize] {
                let row = (row as usize).min(6);
                if is_break {
                    self.row_bitmaps[row] |= col_mask;
                } else {
                    self.row_bitmaps[row] &= !col_mask;
                }
            }
            // Only one event is drained per PB write; the ROM re-scans
            // every cycle and will pick up additional queued events on the
            // next write.
            break;
        }
    }

    /// Recompute the column bits PA reports for the current PB scan byte:
    /// a row's bit is set when that row's bitmap fully masks the CPU's PB
    /// byte, i.e. `(~pb & row_bits) == ~pb`.
    fn scan_columns(&self, pb: u8) -> u8 {
        let inverted = !pb;
        let mut columns = 0u8;
        for (row, bitmap) in self.row_bitmaps.iter().enumerate().take(7) {
            if row == 0 {
                continue;
            }
            if (inverted & bitmap) == inverted {
                columns |= 1 << row;
            }
        }
        columns
    }
}

impl<H: Host> IoDevice for Pia0<H> {
    fn io_read(&mut self, addr: u16, current: u8) -> u8 {
        match addr & 0x03 {
            0 => {
                let comparator = self.host.borrow().joystk_comp();
                let fire_pressed = self.host.borrow().rjoystk_button();
                let columns = self.scan_columns(self.last_pb);
                let bit0 = if fire_pressed { 0 } else { 1 };
                (columns & 0b0111_1110) | ((comparator as u8) << 7) | bit0
            }
            1 => self.cra,
            2 => {
                // PB read acknowledges the field-sync IRQ.
                self.field_sync_pending = false;
                self.last_pb
            }
            3 => {
                let flag = (self.field_sync_pending as u8) << 7;
                (self.crb & 0x7F) | flag
            }
            _ => current,
        }
    }

    fn io_write(&mut self, addr: u16, value: u8) {
        match addr & 0x03 {
            0 => { /* PA is read-only from the CPU's perspective in this system */ }
            1 => {
                self.cra = value;
                if (self.cra >> 3) & 0b111 == 0b111 {
                    self.audio_mux_bit0 = true;
                }
            }
            2 => {
                self.last_pb = value;
                self.poll_keyboard_and_scan();
            }
            3 => {
                self.crb = value;
                self.field_sync_enabled = value & 0x01 != 0;
            }
            _ => {}
        }
    }
}
