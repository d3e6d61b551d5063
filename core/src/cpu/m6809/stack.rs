use super::{CcFlag, ExecState, M6809};
use crate::core::{Bus, BusMaster};

impl M6809 {
    // Stack operation state management using temp_addr:
    // Low byte (0-7): The post-byte mask (remaining registers to process)
    // High byte (8-15):
    //   Bit 8: "Second byte" flag for 16-bit registers (0=First/Low, 1=Second/High)
    //   Bits 12-15: Current bit index being processed (0-7)

    /// Generic PUSH operation (PSHS/PSHU)
    /// Pushes registers from High ID (PC=7) to Low ID (CC=0).
    /// Stack grows downward.
    /// 16-bit regs: Push Low byte, then High byte (so High is at lower addr).
    /// Timing: 5+n cycles (1 fetch + 1 read postbyte + 2 internal + n push bytes).
    fn op_push<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        opcode: u8,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
        use_u: bool,
    ) {
        if cycle == 0 {
            // Cycle 0: Read post-byte
            let mask = bus.read(master, self.pc);
            self.pc = self.pc.wrapping_add(1);
            // Initialize state: Mask in low byte, no current bit selected (high byte 0)
            self.temp_addr = mask as u16;
            self.state = ExecState::Execute(opcode, 1);
            return;
        }

        // Cycles 1-2: Internal cycles (datasheet: 5+n = 1 fetch + 1 postbyte + 2 internal + n push + 1 done-check)
        if cycle <= 2 {
            self.state = ExecState::Execute(opcode, cycle + 1);
            return;
        }

        // Cycle 3+: Process registers
        // Check if we are currently processing a 16-bit register (second byte)
        let mut mask = (self.temp_addr & 0xFF) as u8;
        let state = (self.temp_addr >> 8) as u8;
        let second_byte = (state & 0x01) != 0;
        let mut current_bit = 0;

        if mask == 0 && !second_byte {
            // Done
            self.state = ExecState::Fetch;
            return;
        }

        // If not in the middle of a 16-bit reg, find next register
        if !second_byte {
            // PSH order: PC(7), U/S(6), Y(5), X(4), DP(3), B(2), A(1), CC(0)
            // Find highest set bit
            for i in (0..=7).rev() {
                if (mask & (1 << i)) != 0 {
                    current_bit = i;
                    break;
                }
            }
        } else {
            // Recover current bit from state if needed, though we can re-derive it
            // Actually we need to know which bit we are on if we are in second byte
            // But since we don't clear the mask bit until finished, the loop above finds it again.
            for i in (0..=7).rev() {
                if (mask & (1 << i)) != 0 {
                    current_bit = i;
                    break;
                }
            }
        }

        // Perform Push
        let sp = if use_u { self.u } else { self.s };
        let write_addr = sp.wrapping_sub(1);

        let val_to_push = match current_bit {
            7 => {
                if second_byte {
                    (self.pc >> 8) as u8
                } else {
                    self.pc as u8
                }
            } // PC
            6 => {
                // U or S
                let val = if use_u { self.s } else { self.u };
                if second_byte {
                    (val >> 8) as u8
                } else {
                    val as u8
                }
            }
            5 => {
                if second_byte {
                    (self.y >> 8) as u8
                } else {
                    self.y as u8
                }
            } // Y
            4 => {
                if second_byte {
                    (self.x >> 8) as u8
                } else {
                    self.x as u8
                }
            } // X
            3 => self.dp, // DP
            2 => self.b,  // B
            1 => self.a,  // A
            0 => self.cc, // CC
            _ => 0,
        };

        bus.write(master, write_addr, val_to_push);

        // Update SP
        if use_u {
            self.u = write_addr;
        } else {
            self.s = write_addr;
        }

        // Update state for next cycle
        let is_16bit = current_bit >= 4; // 4,5,6,7 are 16-bit

        if is_16bit {
            if !second_byte {
                // Just pushed Low byte, next is High byte
                // Keep mask bit set, set second_byte flag
                // We don't strictly need to store current_bit in temp_addr because we re-scan mask
                self.temp_addr |= 0x0100;
            } else {
                // Finished 16-bit reg
                mask &= !(1 << current_bit);
                self.temp_addr = mask as u16; // Clear state
            }
        } else {
            // Finished 8-bit reg
            mask &= !(1 << current_bit);
            self.temp_addr = mask as u16; // Clear state
        }

        // Continue execution next cycle
        self.state = ExecState::Execute(opcode, cycle + 1);
    }

    /// Generic PULL operation (PULS/PULU)
    /// Pulls registers from Low ID (CC=0) to High ID (PC=7).
    /// Stack grows upward (incrementing).
    /// 16-bit regs: Pull High byte, then Low byte.
    /// Timing: 5+n cycles (1 fetch + 1 read postbyte + 3 internal + n pull bytes).
    fn op_pull<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        opcode: u8,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
        use_u: bool,
    ) {
        if cycle == 0 {
            let mask = bus.read(master, self.pc);
            self.pc = self.pc.wrapping_add(1);
            self.temp_addr = mask as u16;
            self.state = ExecState::Execute(opcode, 1);
            return;
        }

        // Cycles 1-2: Internal cycles (datasheet: 5+n = 1 fetch + 1 postbyte + 2 internal + n pull + 1 done-check)
        if cycle <= 2 {
            self.state = ExecState::Execute(opcode, cycle + 1);
            return;
        }

        let mut mask = (self.temp_addr & 0xFF) as u8;
        let state = (self.temp_addr >> 8) as u8;
        let second_byte = (state & 0x01) != 0; // For pull, 2nd byte is Low
        let mut current_bit = 0;

        if mask == 0 && !second_byte {
            self.state = ExecState::Fetch;
            return;
        }

        // PUL order: CC(0), A(1), B(2), DP(3), X(4), Y(5), U/S(6), PC(7)
        // Find lowest set bit
        for i in 0..=7 {
            if (mask & (1 << i)) != 0 {
                current_bit = i;
                break;
            }
        }

        let sp = if use_u { self.u } else { self.s };
        let val = bus.read(master, sp);

        // Update SP
        let new_sp = sp.wrapping_add(1);
        if use_u {
            self.u = new_sp;
        } else {
            self.s = new_sp;
        }

        // Store value
        let is_16bit = current_bit >= 4;

        if is_16bit {
            // 16-bit: Pull High then Low
            // If !second_byte (first step): val is High byte
            // If second_byte (second step): val is Low byte

            // Helper to update 16-bit reg
            let update_reg = |cpu: &mut M6809, val: u8, is_high: bool| {
                let target_reg = match current_bit {
                    7 => &mut cpu.pc,
                    6 => {
                        if use_u {
                            &mut cpu.s
                        } else {
                            &mut cpu.u
                        }
                    }
                    5 => &mut cpu.y,
                    4 => &mut cpu.x,
                    _ => unreachable!(),
                };
                if is_high {
                    *target_reg = (*target_reg & 0x00FF) | ((val as u16) << 8);
                } else {
                    *target_reg = (*target_reg & 0xFF00) | (val as u16);
                }
            };

            update_reg(self, val, !second_byte);

            if !second_byte {
                // Done High byte, next is Low
                self.temp_addr |= 0x0100;
            } else {
                // Done Low byte
                mask &= !(1 << current_bit);
                self.temp_addr = mask as u16;
                if current_bit == 7 && !use_u {
                    // PULS touching PC arms nmi_armed (matches LDS/LEAS/TFR,EXG->S)
                    self.nmi_armed = true;
                }
            }
        } else {
            // 8-bit reg
            match current_bit {
                3 => self.dp = val,
                2 => self.b = val,
                1 => self.a = val,
                0 => self.cc = val,
                _ => unreachable!(),
            }
            mask &= !(1 << current_bit);
            self.temp_addr = mask as u16;
        }

        self.state = ExecState::Execute(opcode, cycle + 1);
    }

    pub(crate) fn op_pshs<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        self.op_push(0x34, cycle, bus, master, false);
    }

    pub(crate) fn op_puls<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        self.op_pull(0x35, cycle, bus, master, false);
    }

    pub(crate) fn op_pshu<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        self.op_push(0x36, cycle, bus, master, true);
    }

    pub(crate) fn op_pulu<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        self.op_pull(0x37, cycle, bus, master, true);
    }

    // --- SWI / RTI ---

    /// Returns the register value to push for a given SWI push cycle (0-11).
    /// Push order matches PSHS hardware: PC, U, Y, X, DP, B, A, CC.
    /// For 16-bit regs, low byte is pushed first, high byte second
    /// (so high byte ends up at lower address = big-endian in memory).
    fn swi_push_byte(&self, push_cycle: u8) -> u8 {
        match push_cycle {
            0 => self.pc as u8,
            1 => (self.pc >> 8) as u8,
            2 => self.u as u8,
            3 => (self.u >> 8) as u8,
            4 => self.y as u8,
            5 => (self.y >> 8) as u8,
            6 => self.x as u8,
            7 => (self.x >> 8) as u8,
            8 => self.dp,
            9 => self.b,
            10 => self.a,
            11 => self.cc,
            _ => 0,
        }
    }

    /// SWI (0x3F): Software Interrupt.
    /// Sets E flag, pushes all registers onto S stack, sets I+F flags,
    /// then vectors through 0xFFFA/0xFFFB.
    /// 19 cycles total: 1 fetch + 2 internal + 12 push + 1 internal + 2 vector + 1 internal.
    pub(crate) fn op_swi<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match cycle {
            0 => {
                // Internal: set E flag
                self.cc |= CcFlag::E as u8;
                self.state = ExecState::Execute(0x3F, 1);
            }
            1 => {
                // Internal cycle
                self.state = ExecState::Execute(0x3F, 2);
            }
            c @ 2..=13 => {
                // Push 12 register bytes
                self.s = self.s.wrapping_sub(1);
                bus.write(master, self.s, self.swi_push_byte(c - 2));
                self.state = ExecState::Execute(0x3F, c + 1);
            }
            14 => {
                // Internal: set mask flags
                self.cc |= CcFlag::I as u8 | CcFlag::F as u8;
                self.state = ExecState::Execute(0x3F, 15);
            }
            15 => {
                // Read vector high byte
                let hi = bus.read(master, 0xFFFA);
                self.temp_addr = (hi as u16) << 8;
                self.state = ExecState::Execute(0x3F, 16);
            }
            16 => {
                // Read vector low byte
                let lo = bus.read(master, 0xFFFB);
                self.pc = self.temp_addr | (lo as u16);
                self.state = ExecState::Execute(0x3F, 17);
            }
            17 => {
                // Internal cycle (done)
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// SWI2 (0x103F): Software Interrupt 2.
    /// Sets E flag, pushes all registers onto S stack. Does NOT mask interrupts.
    /// Vectors through 0xFFF4/0xFFF5.
    /// 20 cycles total: 2 prefix + 2 internal + 12 push + 1 internal + 2 vector + 1 internal.
    pub(crate) fn op_swi2<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match cycle {
            0 => {
                // Internal: set E flag
                self.cc |= CcFlag::E as u8;
                self.state = ExecState::ExecutePage2(0x3F, 1);
            }
            1 => {
                // Internal cycle
                self.state = ExecState::ExecutePage2(0x3F, 2);
            }
            c @ 2..=13 => {
                // Push 12 register bytes
                self.s = self.s.wrapping_sub(1);
                bus.write(master, self.s, self.swi_push_byte(c - 2));
                self.state = ExecState::ExecutePage2(0x3F, c + 1);
            }
            14 => {
                // Internal: SWI2 does NOT mask interrupts
                self.state = ExecState::ExecutePage2(0x3F, 15);
            }
            15 => {
                let hi = bus.read(master, 0xFFF4);
                self.temp_addr = (hi as u16) << 8;
                self.state = ExecState::ExecutePage2(0x3F, 16);
            }
            16 => {
                let lo = bus.read(master, 0xFFF5);
                self.pc = self.temp_addr | (lo as u16);
                self.state = ExecState::ExecutePage2(0x3F, 17);
            }
            17 => {
                // Internal cycle (done)
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// SWI3 (0x113F): Software Interrupt 3.
    /// Sets E flag, pushes all registers onto S stack. Does NOT mask interrupts.
    /// Vectors through 0xFFF2/0xFFF3.
    /// 20 cycles total: 2 prefix + 2 internal + 12 push + 1 internal + 2 vector + 1 internal.
    pub(crate) fn op_swi3<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match cycle {
            0 => {
                // Internal: set E flag
                self.cc |= CcFlag::E as u8;
                self.state = ExecState::ExecutePage3(0x3F, 1);
            }
            1 => {
                // Internal cycle
                self.state = ExecState::ExecutePage3(0x3F, 2);
            }
            c @ 2..=13 => {
                // Push 12 register bytes
                self.s = self.s.wrapping_sub(1);
                bus.write(master, self.s, self.swi_push_byte(c - 2));
                self.state = ExecState::ExecutePage3(0x3F, c + 1);
            }
            14 => {
                // Internal: SWI3 does NOT mask interrupts
                self.state = ExecState::ExecutePage3(0x3F, 15);
            }
            15 => {
                let hi = bus.read(master, 0xFFF2);
                self.temp_addr = (hi as u16) << 8;
                self.state = ExecState::ExecutePage3(0x3F, 16);
            }
            16 => {
                let lo = bus.read(master, 0xFFF3);
                self.pc = self.temp_addr | (lo as u16);
                self.state = ExecState::ExecutePage3(0x3F, 17);
            }
            17 => {
                // Internal cycle (done)
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    // --- Hardware Interrupt Response ---

    /// Execute hardware interrupt push+vector sequence.
    /// Called from execute_cycle when state is Interrupt(cycle).
    /// interrupt_type: 1=NMI, 2=FIRQ, 3=IRQ (stored in self.interrupt_type).
    pub(crate) fn execute_interrupt<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match cycle {
            // Vector-only phase (used by CWAI completion, cycles 20-21)
            20 => {
                // temp_addr has vector base address, read high byte
                let hi = bus.read(master, self.temp_addr);
                self.temp_addr = self.temp_addr.wrapping_add(1);
                self.opcode = hi; // scratch storage for vector high
                self.state = ExecState::Interrupt(21);
            }
            21 => {
                let lo = bus.read(master, self.temp_addr);
                self.pc = ((self.opcode as u16) << 8) | (lo as u16);
                self.state = ExecState::Fetch;
            }
            // Full interrupt response (dispatched by type)
            _ => match self.interrupt_type {
                1 | 3 => self.interrupt_full(cycle, bus, master), // NMI or IRQ
                2 => self.interrupt_firq(cycle, bus, master),     // FIRQ
                _ => {
                    self.state = ExecState::Fetch;
                }
            },
        }
    }

    /// NMI/IRQ full interrupt response: set E, push all 12 registers, mask, vector.
    /// Matches SWI cycle structure exactly (18 execute cycles after detect):
    /// Cycle 0: internal (set E flag).
    /// Cycle 1: internal.
    /// Cycles 2-13: push 12 register bytes.
    /// Cycle 14: internal (set mask flags).
    /// Cycle 15: read vector high.
    /// Cycle 16: read vector low.
    /// Cycle 17: internal (done).
    /// Total: 1 detect + 18 execute = 19 cycles (same as SWI).
    fn interrupt_full<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match cycle {
            0 => {
                // Internal: set E flag (matches SWI cycle 0)
                self.cc |= CcFlag::E as u8;
                self.state = ExecState::Interrupt(1);
            }
            1 => {
                // Internal cycle (matches SWI cycle 1)
                self.state = ExecState::Interrupt(2);
            }
            c @ 2..=13 => {
                // Push 12 register bytes (matches SWI cycles 2-13)
                self.s = self.s.wrapping_sub(1);
                bus.write(master, self.s, self.swi_push_byte(c - 2));
                self.state = ExecState::Interrupt(c + 1);
            }
            14 => {
                // Internal: set mask flags (matches SWI cycle 14)
                let mask = match self.interrupt_type {
                    1 => CcFlag::I as u8 | CcFlag::F as u8, // NMI
                    _ => CcFlag::I as u8,                    // IRQ
                };
                self.cc |= mask;
                self.state = ExecState::Interrupt(15);
            }
            15 => {
                // Read vector high byte (matches SWI cycle 15)
                let vector = match self.interrupt_type {
                    1 => 0xFFFC_u16, // NMI
                    _ => 0xFFF8_u16, // IRQ
                };
                let hi = bus.read(master, vector);
                self.temp_addr = (hi as u16) << 8;
                self.state = ExecState::Interrupt(16);
            }
            16 => {
                // Read vector low byte (matches SWI cycle 16)
                let vector_lo = match self.interrupt_type {
                    1 => 0xFFFD_u16, // NMI
                    _ => 0xFFF9_u16, // IRQ
                };
                let lo = bus.read(master, vector_lo);
                self.pc = self.temp_addr | (lo as u16);
                self.state = ExecState::Interrupt(17);
            }
            17 => {
                // Internal cycle (matches SWI cycle 17)
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// FIRQ fast interrupt response: clear E, push CC+PC only (3 bytes), mask I+F, vector.
    /// 10 cycles total (1 detect + 9 execute):
    /// Cycle 0: internal (clear E flag).
    /// Cycle 1: internal.
    /// Cycle 2: push PC low.
    /// Cycle 3: push PC high.
    /// Cycle 4: push CC.
    /// Cycle 5: internal (set I+F).
    /// Cycle 6: read vector high.
    /// Cycle 7: read vector low.
    /// Cycle 8: internal (done).
    fn interrupt_firq<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match cycle {
            0 => {
                // Internal: clear E for fast return
                self.cc &= !(CcFlag::E as u8);
                self.state = ExecState::Interrupt(1);
            }
            1 => {
                // Internal cycle
                self.state = ExecState::Interrupt(2);
            }
            2 => {
                self.s = self.s.wrapping_sub(1);
                bus.write(master, self.s, self.pc as u8); // PC low
                self.state = ExecState::Interrupt(3);
            }
            3 => {
                self.s = self.s.wrapping_sub(1);
                bus.write(master, self.s, (self.pc >> 8) as u8); // PC high
                self.state = ExecState::Interrupt(4);
            }
            4 => {
                self.s = self.s.wrapping_sub(1);
                bus.write(master, self.s, self.cc); // CC
                self.state = ExecState::Interrupt(5);
            }
            5 => {
                // Internal: set mask flags
                self.cc |= CcFlag::I as u8 | CcFlag::F as u8;
                self.state = ExecState::Interrupt(6);
            }
            6 => {
                let hi = bus.read(master, 0xFFF6);
                self.temp_addr = (hi as u16) << 8;
                self.state = ExecState::Interrupt(7);
            }
            7 => {
                let lo = bus.read(master, 0xFFF7);
                self.pc = self.temp_addr | (lo as u16);
                self.state = ExecState::Interrupt(8);
            }
            8 => {
                // Internal cycle (done)
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// Handle CWAI wait state: check for interrupts each cycle.
    /// Since all registers are already pushed, just apply mask and vector.
    pub(crate) fn wait_for_interrupt<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        bus: &mut B,
        master: BusMaster,
    ) {
        let ints = bus.check_interrupts(master);

        // NMI edge detection
        let nmi_edge = ints.nmi && !self.nmi_previous;
        self.nmi_previous = ints.nmi;

        if nmi_edge {
            self.cc |= CcFlag::I as u8 | CcFlag::F as u8;
            self.temp_addr = 0xFFFC;
            self.state = ExecState::Interrupt(20); // vector-only phase
            return;
        }

        if ints.firq && (self.cc & CcFlag::F as u8) == 0 {
            self.cc |= CcFlag::I as u8 | CcFlag::F as u8;
            self.temp_addr = 0xFFF6;
            self.state = ExecState::Interrupt(20);
            return;
        }

        if ints.irq && (self.cc & CcFlag::I as u8) == 0 {
            self.cc |= CcFlag::I as u8;
            self.temp_addr = 0xFFF8;
            self.state = ExecState::Interrupt(20);
        }
        // Otherwise: stay in WaitForInterrupt
    }

    /// Handle SYNC wait state: check for any interrupt signal each cycle.
    /// If interrupt is not masked: take the interrupt normally (full push response).
    /// If interrupt is masked: just wake up and continue to next instruction.
    pub(crate) fn sync_wait<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        bus: &mut B,
        master: BusMaster,
    ) {
        let ints = bus.check_interrupts(master);

        // NMI edge detection
        let nmi_edge = ints.nmi && !self.nmi_previous;
        self.nmi_previous = ints.nmi;

        // Any interrupt signal wakes up from SYNC
        let any_signal = nmi_edge || ints.firq || ints.irq;
        if !any_signal {
            return; // Stay in SyncWait
        }

        // Determine if the interrupt can be taken (not masked)
        if nmi_edge {
            self.interrupt_type = 1;
            self.state = ExecState::Interrupt(0);
        } else if ints.firq && (self.cc & CcFlag::F as u8) == 0 {
            self.interrupt_type = 2;
            self.state = ExecState::Interrupt(0);
        } else if ints.irq && (self.cc & CcFlag::I as u8) == 0 {
            self.interrupt_type = 3;
            self.state = ExecState::Interrupt(0);
        } else {
            // Interrupt is masked: just wake up, continue to next instruction
            self.state = ExecState::Fetch;
        }
    }

    // --- CWAI / SYNC opcodes ---

    /// CWAI (0x3C): Clear and Wait for Interrupt.
    /// Cycle 0: Read immediate operand, AND with CC, set E flag.
    /// Cycles 1-12: Push all registers (same as SWI push sequence).
    /// Then enter WaitForInterrupt state.
    /// When interrupt arrives: skip push (already done), just mask + vector.
    pub(crate) fn op_cwai<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match cycle {
            0 => {
                // Read immediate operand, AND with CC, set E flag
                let operand = bus.read(master, self.pc);
                self.pc = self.pc.wrapping_add(1);
                self.cc &= operand;
                self.cc |= CcFlag::E as u8;
                self.state = ExecState::Execute(0x3C, 1);
            }
            c @ 1..=12 => {
                // Push all registers (same order as SWI)
                self.s = self.s.wrapping_sub(1);
                bus.write(master, self.s, self.swi_push_byte(c - 1));
                if c == 12 {
                    // All registers pushed, enter wait state
                    self.state = ExecState::WaitForInterrupt;
                } else {
                    self.state = ExecState::Execute(0x3C, c + 1);
                }
            }
            _ => {}
        }
    }

    /// SYNC (0x13): Synchronize to interrupt.
    /// Halts CPU until any interrupt signal is detected.
    /// If interrupt is not masked: take the interrupt normally.
    /// If interrupt is masked: just resume at next instruction.
    pub(crate) fn op_sync<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        _bus: &mut B,
        _master: BusMaster,
    ) {
        if cycle == 0 {
            self.state = ExecState::SyncWait;
        }
    }

    /// RTI (0x3B): Return from Interrupt.
    /// Pulls CC from S stack. If E flag is set in pulled CC, pulls all registers
    /// (A, B, DP, X, Y, U, PC). If E is clear, pulls only PC (fast FIRQ return).
    /// CC is restored from the stack (all flags affected).
    /// E=0: 6 cycles (1 fetch + 1 internal + 1 pull CC + 1 internal + 2 pull PC).
    /// E=1: 15 cycles (1 fetch + 1 internal + 12 pulls + 1 internal).
    pub(crate) fn op_rti<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match cycle {
            0 => {
                // Internal cycle
                self.state = ExecState::Execute(0x3B, 1);
            }
            1 => {
                // Pull CC
                self.cc = bus.read(master, self.s);
                self.s = self.s.wrapping_add(1);
                if self.cc & (CcFlag::E as u8) != 0 {
                    // E set: pull all registers
                    self.state = ExecState::Execute(0x3B, 2);
                } else {
                    // E clear: pull PC only (fast FIRQ return)
                    self.state = ExecState::Execute(0x3B, 20);
                }
            }
            // === E=1 path: pull A, B, DP, X, Y, U, PC ===
            2 => {
                self.a = bus.read(master, self.s);
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 3);
            }
            3 => {
                self.b = bus.read(master, self.s);
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 4);
            }
            4 => {
                self.dp = bus.read(master, self.s);
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 5);
            }
            5 => {
                self.x = (bus.read(master, self.s) as u16) << 8;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 6);
            }
            6 => {
                self.x |= bus.read(master, self.s) as u16;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 7);
            }
            7 => {
                self.y = (bus.read(master, self.s) as u16) << 8;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 8);
            }
            8 => {
                self.y |= bus.read(master, self.s) as u16;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 9);
            }
            9 => {
                self.u = (bus.read(master, self.s) as u16) << 8;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 10);
            }
            10 => {
                self.u |= bus.read(master, self.s) as u16;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 11);
            }
            11 => {
                self.pc = (bus.read(master, self.s) as u16) << 8;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 12);
            }
            12 => {
                self.pc |= bus.read(master, self.s) as u16;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 13);
            }
            13 => {
                // Internal cycle (E=1 done)
                self.state = ExecState::Fetch;
            }
            // === E=0 path: internal + pull PC only ===
            20 => {
                // Internal cycle
                self.state = ExecState::Execute(0x3B, 21);
            }
            21 => {
                self.pc = (bus.read(master, self.s) as u16) << 8;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Execute(0x3B, 22);
            }
            22 => {
                self.pc |= bus.read(master, self.s) as u16;
                self.s = self.s.wrapping_add(1);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }
}
