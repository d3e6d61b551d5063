use std::cell::RefCell;
use std::rc::Rc;

use super::memory::IoDevice;
use super::vdg::Vdg;

/// MC6883 Synchronous Address Multiplexer, reduced to the bits this system
/// actually exercises: the write-only pair-set register bank at
/// 0xFFC0..0xFFDF and the CPU-vector read redirect at 0xFFF2..0xFFFF (the
/// latter is wired into the memory fabric directly via `Memory::define_redirect`,
/// not through this device — see §4.3).
pub struct Sam {
    vdg_mode: u8,           // 3 bits
    vdg_display_offset: u8, // 7 bits
    page: bool,
    mpu_rate: u8,    // 2 bits
    memory_size: u8, // 2 bits
    map_type: bool,
    vdg: Rc<RefCell<Vdg>>,
}

impl Sam {
    pub fn new(vdg: Rc<RefCell<Vdg>>) -> Self {
        Self {
            vdg_mode: 0,
            vdg_display_offset: 0,
            page: false,
            mpu_rate: 0,
            memory_size: 0,
            map_type: false,
            vdg,
        }
    }

    fn push_to_vdg(&self) {
        let mut vdg = self.vdg.borrow_mut();
        vdg.set_sam_mode(self.vdg_mode);
        vdg.set_video_offset(self.vdg_display_offset);
    }
}

impl IoDevice for Sam {
    fn io_read(&mut self, _addr: u16, current: u8) -> u8 {
        // Pair-set registers are write-only; reads just see whatever byte
        // last sat in the cell.
        current
    }

    fn io_write(&mut self, addr: u16, _value: u8) {
        let index = (addr - 0xFFC0) as u8;
        let bit_index = index >> 1;
        let set = (index & 1) != 0;

        let apply = |field: &mut u8, bit: u8| {
            if set {
                *field |= 1 << bit;
            } else {
                *field &= !(1 << bit);
            }
        };

        match bit_index {
            0..=2 => apply(&mut self.vdg_mode, bit_index),
            3..=9 => apply(&mut self.vdg_display_offset, bit_index - 3),
            10 => {
                self.page = set;
            }
            11..=12 => apply(&mut self.mpu_rate, bit_index - 11),
            13..=14 => apply(&mut self.memory_size, bit_index - 13),
            15 => {
                self.map_type = set;
            }
            _ => {}
        }

        self.push_to_vdg();
    }
}
