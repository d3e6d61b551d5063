use crate::core::{Bus, BusMaster};
use crate::cpu::m6809::{ExecState, M6809};

impl M6809 {
    // --- Internal 16-bit ALU helpers ---

    #[inline]
    fn perform_add16(&mut self, acc: u16, val: u16) -> u16 {
        let (result, carry) = acc.overflowing_add(val);
        let overflow = (acc ^ result) & (val ^ result) & 0x8000 != 0;
        self.set_flags_arithmetic16(result, overflow, carry);
        result
    }

    #[inline]
    fn perform_sub16(&mut self, acc: u16, val: u16) -> u16 {
        let (result, borrow) = acc.overflowing_sub(val);
        let overflow = (acc ^ val) & (acc ^ result) & 0x8000 != 0;
        self.set_flags_arithmetic16(result, overflow, borrow);
        result
    }

    #[inline]
    fn perform_cmp16(&mut self, acc: u16, val: u16) {
        self.perform_sub16(acc, val);
    }

    /// Generic helper for 16-bit Immediate Addressing Mode load instructions
    /// (LDD/LDX/LDY/LDU/LDS immediate). Two execute cycles: fetch high byte,
    /// then fetch low byte and apply.
    #[inline]
    fn word_load_imm<B: Bus<Address = u16, Data = u8> + ?Sized, F>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster, apply: F,
    ) where
        F: FnOnce(&mut Self, u16),
    {
        match cycle {
            0 => {
                let high = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr = high << 8;
                self.state = ExecState::Execute(opcode, 1);
            }
            1 => {
                let low = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                let val = self.temp_addr | low;
                apply(self, val);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// Generic helper for 16-bit Immediate Addressing Mode compare/arithmetic
    /// instructions (CMPD/CMPX/CMPY/CMPU/CMPS/ADDD/SUBD immediate). Three
    /// execute cycles: fetch high byte, fetch low byte, internal apply — the
    /// extra internal cycle (versus a plain 16-bit load) accounts for the ALU
    /// computation on the full 16-bit operand.
    #[inline]
    fn word_alu_imm<B: Bus<Address = u16, Data = u8> + ?Sized, F>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
        mk_state: fn(u8, u8) -> ExecState, operation: F,
    ) where
        F: FnOnce(&mut Self, u16),
    {
        match cycle {
            0 => {
                let high = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr = high << 8;
                self.state = mk_state(opcode, 1);
            }
            1 => {
                let low = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr |= low;
                self.state = mk_state(opcode, 2);
            }
            2 => {
                let val = self.temp_addr;
                operation(self, val);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// Generic helper for 16-bit Direct Addressing Mode compare/arithmetic
    /// instructions. Five execute cycles: address fetch, internal, read high
    /// byte, internal (ALU), read low byte + apply.
    #[inline]
    fn word_alu_direct<B: Bus<Address = u16, Data = u8> + ?Sized, F>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
        mk_state: fn(u8, u8) -> ExecState, operation: F,
    ) where
        F: FnOnce(&mut Self, u16),
    {
        match cycle {
            0 => {
                let addr = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr = ((self.dp as u16) << 8) | addr;
                self.state = mk_state(opcode, 1);
            }
            1 => {
                self.state = mk_state(opcode, 2);
            }
            2 => {
                self.opcode = bus.read(master, self.temp_addr);
                self.temp_addr = self.temp_addr.wrapping_add(1);
                self.state = mk_state(opcode, 3);
            }
            3 => {
                self.state = mk_state(opcode, 4);
            }
            4 => {
                let low = bus.read(master, self.temp_addr) as u16;
                let val = ((self.opcode as u16) << 8) | low;
                operation(self, val);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// Generic helper for 16-bit Extended Addressing Mode compare/arithmetic
    /// instructions. Six execute cycles.
    #[inline]
    fn word_alu_extended<B: Bus<Address = u16, Data = u8> + ?Sized, F>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
        mk_state: fn(u8, u8) -> ExecState, operation: F,
    ) where
        F: FnOnce(&mut Self, u16),
    {
        match cycle {
            0 => {
                let high = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr = high << 8;
                self.state = mk_state(opcode, 1);
            }
            1 => {
                let low = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr |= low;
                self.state = mk_state(opcode, 2);
            }
            2 => {
                self.state = mk_state(opcode, 3);
            }
            3 => {
                self.opcode = bus.read(master, self.temp_addr);
                self.temp_addr = self.temp_addr.wrapping_add(1);
                self.state = mk_state(opcode, 4);
            }
            4 => {
                self.state = mk_state(opcode, 5);
            }
            5 => {
                let low = bus.read(master, self.temp_addr) as u16;
                let val = ((self.opcode as u16) << 8) | low;
                operation(self, val);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// Generic helper for 16-bit Indexed Addressing Mode compare/arithmetic
    /// instructions. Cycle 39/40 = internal (the second accounts for the ALU
    /// computation), 50/51 = read high/low byte and apply.
    #[inline]
    fn word_alu_indexed<B: Bus<Address = u16, Data = u8> + ?Sized, F>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
        mk_state: fn(u8, u8) -> ExecState,
        resolve: fn(&mut Self, u8, u8, &mut B, BusMaster) -> bool,
        operation: F,
    ) where
        F: FnOnce(&mut Self, u16),
    {
        match cycle {
            39 => {
                self.state = mk_state(opcode, 40);
            }
            40 => {
                self.state = mk_state(opcode, 50);
            }
            50 => {
                self.opcode = bus.read(master, self.temp_addr);
                self.temp_addr = self.temp_addr.wrapping_add(1);
                self.state = mk_state(opcode, 51);
            }
            51 => {
                let low = bus.read(master, self.temp_addr) as u16;
                let val = ((self.opcode as u16) << 8) | low;
                operation(self, val);
                self.state = ExecState::Fetch;
            }
            _ => {
                if resolve(self, opcode, cycle, bus, master) {
                    self.state = mk_state(opcode, 39);
                }
            }
        }
    }

    // === LDD/LDX/LDU/LDY/LDS immediate ===

    /// LDD immediate (0xCC): D = operand16.
    pub(crate) fn op_ldd_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_load_imm(opcode, cycle, bus, master, |cpu, val| {
            cpu.set_d(val);
            cpu.set_flags_logical16(val);
        });
    }

    /// LDX immediate (0x8E): X = operand16.
    pub(crate) fn op_ldx_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_load_imm(opcode, cycle, bus, master, |cpu, val| {
            cpu.x = val;
            cpu.set_flags_logical16(val);
        });
    }

    /// LDU immediate (0xCE): U = operand16.
    pub(crate) fn op_ldu_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_load_imm(opcode, cycle, bus, master, |cpu, val| {
            cpu.u = val;
            cpu.set_flags_logical16(val);
        });
    }

    /// LDY immediate (page 2, 0x8E): Y = operand16.
    pub(crate) fn op_ldy_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_load_imm(opcode, cycle, bus, master, |cpu, val| {
            cpu.y = val;
            cpu.set_flags_logical16(val);
        });
    }

    /// LDS immediate (page 2, 0xCE): S = operand16. Arms nmi_armed.
    pub(crate) fn op_lds_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_load_imm(opcode, cycle, bus, master, |cpu, val| {
            cpu.s = val;
            cpu.set_flags_logical16(val);
            cpu.nmi_armed = true;
        });
    }

    // === LDY/STY/LDS/STS extended (page 2) ===

    /// LDY extended (page 2, 0xBE): Y = mem[addr16].
    pub(crate) fn op_ldy_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        match cycle {
            0 => {
                let high = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr = high << 8;
                self.state = ExecState::ExecutePage2(opcode, 1);
            }
            1 => {
                let low = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr |= low;
                self.state = ExecState::ExecutePage2(opcode, 2);
            }
            2 => {
                self.state = ExecState::ExecutePage2(opcode, 3);
            }
            3 => {
                let high = bus.read(master, self.temp_addr) as u16;
                self.temp_addr = self.temp_addr.wrapping_add(1);
                self.y = high << 8;
                self.state = ExecState::ExecutePage2(opcode, 4);
            }
            4 => {
                let low = bus.read(master, self.temp_addr) as u16;
                self.y |= low;
                self.set_flags_logical16(self.y);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// STY extended (page 2, 0xBF): mem[addr16] = Y.
    pub(crate) fn op_sty_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        match cycle {
            0 => {
                let high = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr = high << 8;
                self.state = ExecState::ExecutePage2(opcode, 1);
            }
            1 => {
                let low = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr |= low;
                self.state = ExecState::ExecutePage2(opcode, 2);
            }
            2 => {
                self.state = ExecState::ExecutePage2(opcode, 3);
            }
            3 => {
                bus.write(master, self.temp_addr, (self.y >> 8) as u8);
                self.temp_addr = self.temp_addr.wrapping_add(1);
                self.state = ExecState::ExecutePage2(opcode, 4);
            }
            4 => {
                bus.write(master, self.temp_addr, self.y as u8);
                self.set_flags_logical16(self.y);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// LDS extended (page 2, 0xFE): S = mem[addr16]. Arms nmi_armed.
    pub(crate) fn op_lds_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        match cycle {
            0 => {
                let high = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr = high << 8;
                self.state = ExecState::ExecutePage2(opcode, 1);
            }
            1 => {
                let low = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr |= low;
                self.state = ExecState::ExecutePage2(opcode, 2);
            }
            2 => {
                self.state = ExecState::ExecutePage2(opcode, 3);
            }
            3 => {
                let high = bus.read(master, self.temp_addr) as u16;
                self.temp_addr = self.temp_addr.wrapping_add(1);
                self.s = high << 8;
                self.state = ExecState::ExecutePage2(opcode, 4);
            }
            4 => {
                let low = bus.read(master, self.temp_addr) as u16;
                self.s |= low;
                self.set_flags_logical16(self.s);
                self.nmi_armed = true;
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    /// STS extended (page 2, 0xFF): mem[addr16] = S.
    pub(crate) fn op_sts_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        match cycle {
            0 => {
                let high = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr = high << 8;
                self.state = ExecState::ExecutePage2(opcode, 1);
            }
            1 => {
                let low = bus.read(master, self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
                self.temp_addr |= low;
                self.state = ExecState::ExecutePage2(opcode, 2);
            }
            2 => {
                self.state = ExecState::ExecutePage2(opcode, 3);
            }
            3 => {
                bus.write(master, self.temp_addr, (self.s >> 8) as u8);
                self.temp_addr = self.temp_addr.wrapping_add(1);
                self.state = ExecState::ExecutePage2(opcode, 4);
            }
            4 => {
                bus.write(master, self.temp_addr, self.s as u8);
                self.set_flags_logical16(self.s);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }

    // === ADDD ===

    pub(crate) fn op_addd_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_imm(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| {
            let d = cpu.get_d();
            let result = cpu.perform_add16(d, val);
            cpu.set_d(result);
        });
    }

    pub(crate) fn op_addd_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_direct(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| {
            let d = cpu.get_d();
            let result = cpu.perform_add16(d, val);
            cpu.set_d(result);
        });
    }

    pub(crate) fn op_addd_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_extended(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| {
            let d = cpu.get_d();
            let result = cpu.perform_add16(d, val);
            cpu.set_d(result);
        });
    }

    pub(crate) fn op_addd_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_indexed(opcode, cycle, bus, master, ExecState::Execute, Self::indexed_resolve, |cpu, val| {
            let d = cpu.get_d();
            let result = cpu.perform_add16(d, val);
            cpu.set_d(result);
        });
    }

    // === SUBD ===

    pub(crate) fn op_subd_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_imm(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| {
            let d = cpu.get_d();
            let result = cpu.perform_sub16(d, val);
            cpu.set_d(result);
        });
    }

    pub(crate) fn op_subd_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_direct(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| {
            let d = cpu.get_d();
            let result = cpu.perform_sub16(d, val);
            cpu.set_d(result);
        });
    }

    pub(crate) fn op_subd_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_extended(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| {
            let d = cpu.get_d();
            let result = cpu.perform_sub16(d, val);
            cpu.set_d(result);
        });
    }

    pub(crate) fn op_subd_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_indexed(opcode, cycle, bus, master, ExecState::Execute, Self::indexed_resolve, |cpu, val| {
            let d = cpu.get_d();
            let result = cpu.perform_sub16(d, val);
            cpu.set_d(result);
        });
    }

    // === CMPX (page 1) ===

    pub(crate) fn op_cmpx_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_imm(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| cpu.perform_cmp16(cpu.x, val));
    }

    pub(crate) fn op_cmpx_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_direct(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| cpu.perform_cmp16(cpu.x, val));
    }

    pub(crate) fn op_cmpx_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_extended(opcode, cycle, bus, master, ExecState::Execute, |cpu, val| cpu.perform_cmp16(cpu.x, val));
    }

    pub(crate) fn op_cmpx_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_indexed(opcode, cycle, bus, master, ExecState::Execute, Self::indexed_resolve, |cpu, val| cpu.perform_cmp16(cpu.x, val));
    }

    // === CMPD (page 2) ===

    pub(crate) fn op_cmpd_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_imm(opcode, cycle, bus, master, ExecState::ExecutePage2, |cpu, val| {
            let d = cpu.get_d();
            cpu.perform_cmp16(d, val);
        });
    }

    pub(crate) fn op_cmpd_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_direct(opcode, cycle, bus, master, ExecState::ExecutePage2, |cpu, val| {
            let d = cpu.get_d();
            cpu.perform_cmp16(d, val);
        });
    }

    pub(crate) fn op_cmpd_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_extended(opcode, cycle, bus, master, ExecState::ExecutePage2, |cpu, val| {
            let d = cpu.get_d();
            cpu.perform_cmp16(d, val);
        });
    }

    pub(crate) fn op_cmpd_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_indexed(opcode, cycle, bus, master, ExecState::ExecutePage2, Self::indexed_resolve_page2, |cpu, val| {
            let d = cpu.get_d();
            cpu.perform_cmp16(d, val);
        });
    }

    // === CMPY (page 2) ===

    pub(crate) fn op_cmpy_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_imm(opcode, cycle, bus, master, ExecState::ExecutePage2, |cpu, val| cpu.perform_cmp16(cpu.y, val));
    }

    pub(crate) fn op_cmpy_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_direct(opcode, cycle, bus, master, ExecState::ExecutePage2, |cpu, val| cpu.perform_cmp16(cpu.y, val));
    }

    pub(crate) fn op_cmpy_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_extended(opcode, cycle, bus, master, ExecState::ExecutePage2, |cpu, val| cpu.perform_cmp16(cpu.y, val));
    }

    pub(crate) fn op_cmpy_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_indexed(opcode, cycle, bus, master, ExecState::ExecutePage2, Self::indexed_resolve_page2, |cpu, val| cpu.perform_cmp16(cpu.y, val));
    }

    // === CMPU (page 3) ===

    pub(crate) fn op_cmpu_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_imm(opcode, cycle, bus, master, ExecState::ExecutePage3, |cpu, val| cpu.perform_cmp16(cpu.u, val));
    }

    pub(crate) fn op_cmpu_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_direct(opcode, cycle, bus, master, ExecState::ExecutePage3, |cpu, val| cpu.perform_cmp16(cpu.u, val));
    }

    pub(crate) fn op_cmpu_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_extended(opcode, cycle, bus, master, ExecState::ExecutePage3, |cpu, val| cpu.perform_cmp16(cpu.u, val));
    }

    pub(crate) fn op_cmpu_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_indexed(opcode, cycle, bus, master, ExecState::ExecutePage3, Self::indexed_resolve_page3, |cpu, val| cpu.perform_cmp16(cpu.u, val));
    }

    // === CMPS (page 3) ===

    pub(crate) fn op_cmps_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_imm(opcode, cycle, bus, master, ExecState::ExecutePage3, |cpu, val| cpu.perform_cmp16(cpu.s, val));
    }

    pub(crate) fn op_cmps_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_direct(opcode, cycle, bus, master, ExecState::ExecutePage3, |cpu, val| cpu.perform_cmp16(cpu.s, val));
    }

    pub(crate) fn op_cmps_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_extended(opcode, cycle, bus, master, ExecState::ExecutePage3, |cpu, val| cpu.perform_cmp16(cpu.s, val));
    }

    pub(crate) fn op_cmps_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.word_alu_indexed(opcode, cycle, bus, master, ExecState::ExecutePage3, Self::indexed_resolve_page3, |cpu, val| cpu.perform_cmp16(cpu.s, val));
    }
}
