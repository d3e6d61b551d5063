use crate::core::{Bus, BusMaster};
use crate::cpu::m6809::{CcFlag, ExecState, M6809};

impl M6809 {
    // --- Internal binary ALU helpers ---
    //
    // Each helper takes the accumulator value and the operand read from memory
    // (or fetched immediate) and returns the new accumulator value, setting
    // flags along the way. CMP/BIT/TST-style helpers discard the result.

    #[inline]
    fn perform_add(&mut self, acc: u8, val: u8) -> u8 {
        let (result, carry) = acc.overflowing_add(val);
        let half_carry = (acc ^ val ^ result) & 0x10 != 0;
        let overflow = (acc ^ result) & (val ^ result) & 0x80 != 0;
        self.set_flag(CcFlag::H, half_carry);
        self.set_flags_arithmetic(result, overflow, carry);
        result
    }

    #[inline]
    fn perform_adc(&mut self, acc: u8, val: u8) -> u8 {
        let c_in = (self.cc & CcFlag::C as u8 != 0) as u8;
        let (partial, c1) = acc.overflowing_add(val);
        let (result, c2) = partial.overflowing_add(c_in);
        let carry = c1 || c2;
        let half_carry = (acc ^ val ^ result) & 0x10 != 0;
        let overflow = (acc ^ result) & (val ^ result) & 0x80 != 0;
        self.set_flag(CcFlag::H, half_carry);
        self.set_flags_arithmetic(result, overflow, carry);
        result
    }

    #[inline]
    fn perform_sub(&mut self, acc: u8, val: u8) -> u8 {
        let (result, borrow) = acc.overflowing_sub(val);
        let overflow = (acc ^ val) & (acc ^ result) & 0x80 != 0;
        self.set_flags_arithmetic(result, overflow, borrow);
        result
    }

    #[inline]
    fn perform_sbc(&mut self, acc: u8, val: u8) -> u8 {
        let c_in = (self.cc & CcFlag::C as u8 != 0) as u8;
        let (partial, b1) = acc.overflowing_sub(val);
        let (result, b2) = partial.overflowing_sub(c_in);
        let borrow = b1 || b2;
        let overflow = (acc ^ val) & (acc ^ result) & 0x80 != 0;
        self.set_flags_arithmetic(result, overflow, borrow);
        result
    }

    #[inline]
    fn perform_and(&mut self, acc: u8, val: u8) -> u8 {
        let result = acc & val;
        self.set_flags_logical(result);
        result
    }

    #[inline]
    fn perform_or(&mut self, acc: u8, val: u8) -> u8 {
        let result = acc | val;
        self.set_flags_logical(result);
        result
    }

    #[inline]
    fn perform_eor(&mut self, acc: u8, val: u8) -> u8 {
        let result = acc ^ val;
        self.set_flags_logical(result);
        result
    }

    #[inline]
    fn perform_bit(&mut self, acc: u8, val: u8) {
        self.set_flags_logical(acc & val);
    }

    #[inline]
    fn perform_cmp(&mut self, acc: u8, val: u8) {
        self.perform_sub(acc, val);
    }

    // === ADDA ===

    /// ADDA immediate (0x8B): A += operand.
    pub(crate) fn op_adda_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.a = cpu.perform_add(cpu.a, val));
    }

    /// ADDA direct (0x9B): A += mem[DP:addr].
    pub(crate) fn op_adda_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_add(cpu.a, val));
    }

    /// ADDA extended (0xBB): A += mem[addr16].
    pub(crate) fn op_adda_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_add(cpu.a, val));
    }

    /// ADDA indexed (0xAB): A += mem[EA].
    pub(crate) fn op_adda_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_add(cpu.a, val));
    }

    // === ADDB ===

    pub(crate) fn op_addb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.b = cpu.perform_add(cpu.b, val));
    }

    pub(crate) fn op_addb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_add(cpu.b, val));
    }

    pub(crate) fn op_addb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_add(cpu.b, val));
    }

    pub(crate) fn op_addb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_add(cpu.b, val));
    }

    // === ADCA ===

    pub(crate) fn op_adca_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.a = cpu.perform_adc(cpu.a, val));
    }

    pub(crate) fn op_adca_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_adc(cpu.a, val));
    }

    pub(crate) fn op_adca_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_adc(cpu.a, val));
    }

    pub(crate) fn op_adca_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_adc(cpu.a, val));
    }

    // === ADCB ===

    pub(crate) fn op_adcb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.b = cpu.perform_adc(cpu.b, val));
    }

    pub(crate) fn op_adcb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_adc(cpu.b, val));
    }

    pub(crate) fn op_adcb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_adc(cpu.b, val));
    }

    pub(crate) fn op_adcb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_adc(cpu.b, val));
    }

    // === SUBA ===

    pub(crate) fn op_suba_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.a = cpu.perform_sub(cpu.a, val));
    }

    pub(crate) fn op_suba_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_sub(cpu.a, val));
    }

    pub(crate) fn op_suba_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_sub(cpu.a, val));
    }

    pub(crate) fn op_suba_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_sub(cpu.a, val));
    }

    // === SUBB ===

    pub(crate) fn op_subb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.b = cpu.perform_sub(cpu.b, val));
    }

    pub(crate) fn op_subb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_sub(cpu.b, val));
    }

    pub(crate) fn op_subb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_sub(cpu.b, val));
    }

    pub(crate) fn op_subb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_sub(cpu.b, val));
    }

    // === SBCA ===

    pub(crate) fn op_sbca_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.a = cpu.perform_sbc(cpu.a, val));
    }

    pub(crate) fn op_sbca_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_sbc(cpu.a, val));
    }

    pub(crate) fn op_sbca_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_sbc(cpu.a, val));
    }

    pub(crate) fn op_sbca_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_sbc(cpu.a, val));
    }

    // === SBCB ===

    pub(crate) fn op_sbcb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.b = cpu.perform_sbc(cpu.b, val));
    }

    pub(crate) fn op_sbcb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_sbc(cpu.b, val));
    }

    pub(crate) fn op_sbcb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_sbc(cpu.b, val));
    }

    pub(crate) fn op_sbcb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_sbc(cpu.b, val));
    }

    // === ANDA ===

    pub(crate) fn op_anda_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.a = cpu.perform_and(cpu.a, val));
    }

    pub(crate) fn op_anda_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_and(cpu.a, val));
    }

    pub(crate) fn op_anda_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_and(cpu.a, val));
    }

    pub(crate) fn op_anda_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_and(cpu.a, val));
    }

    // === ANDB ===

    pub(crate) fn op_andb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.b = cpu.perform_and(cpu.b, val));
    }

    pub(crate) fn op_andb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_and(cpu.b, val));
    }

    pub(crate) fn op_andb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_and(cpu.b, val));
    }

    pub(crate) fn op_andb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_and(cpu.b, val));
    }

    // === ORA ===

    pub(crate) fn op_ora_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.a = cpu.perform_or(cpu.a, val));
    }

    pub(crate) fn op_ora_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_or(cpu.a, val));
    }

    pub(crate) fn op_ora_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_or(cpu.a, val));
    }

    pub(crate) fn op_ora_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_or(cpu.a, val));
    }

    // === ORB ===

    pub(crate) fn op_orb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.b = cpu.perform_or(cpu.b, val));
    }

    pub(crate) fn op_orb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_or(cpu.b, val));
    }

    pub(crate) fn op_orb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_or(cpu.b, val));
    }

    pub(crate) fn op_orb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_or(cpu.b, val));
    }

    // === EORA ===

    pub(crate) fn op_eora_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.a = cpu.perform_eor(cpu.a, val));
    }

    pub(crate) fn op_eora_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_eor(cpu.a, val));
    }

    pub(crate) fn op_eora_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_eor(cpu.a, val));
    }

    pub(crate) fn op_eora_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.a = cpu.perform_eor(cpu.a, val));
    }

    // === EORB ===

    pub(crate) fn op_eorb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.b = cpu.perform_eor(cpu.b, val));
    }

    pub(crate) fn op_eorb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_eor(cpu.b, val));
    }

    pub(crate) fn op_eorb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_eor(cpu.b, val));
    }

    pub(crate) fn op_eorb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.b = cpu.perform_eor(cpu.b, val));
    }

    // === BITA === (AND without storing the result)

    pub(crate) fn op_bita_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.perform_bit(cpu.a, val));
    }

    pub(crate) fn op_bita_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.perform_bit(cpu.a, val));
    }

    pub(crate) fn op_bita_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.perform_bit(cpu.a, val));
    }

    pub(crate) fn op_bita_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.perform_bit(cpu.a, val));
    }

    // === BITB ===

    pub(crate) fn op_bitb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.perform_bit(cpu.b, val));
    }

    pub(crate) fn op_bitb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.perform_bit(cpu.b, val));
    }

    pub(crate) fn op_bitb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.perform_bit(cpu.b, val));
    }

    pub(crate) fn op_bitb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.perform_bit(cpu.b, val));
    }

    // === CMPA ===

    pub(crate) fn op_cmpa_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.perform_cmp(cpu.a, val));
    }

    pub(crate) fn op_cmpa_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.perform_cmp(cpu.a, val));
    }

    pub(crate) fn op_cmpa_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.perform_cmp(cpu.a, val));
    }

    pub(crate) fn op_cmpa_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.perform_cmp(cpu.a, val));
    }

    // === CMPB ===

    pub(crate) fn op_cmpb_imm<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_imm(cycle, bus, master, |cpu, val| cpu.perform_cmp(cpu.b, val));
    }

    pub(crate) fn op_cmpb_direct<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_direct(opcode, cycle, bus, master, |cpu, val| cpu.perform_cmp(cpu.b, val));
    }

    pub(crate) fn op_cmpb_extended<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_extended(opcode, cycle, bus, master, |cpu, val| cpu.perform_cmp(cpu.b, val));
    }

    pub(crate) fn op_cmpb_indexed<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self, opcode: u8, cycle: u8, bus: &mut B, master: BusMaster,
    ) {
        self.alu_indexed(opcode, cycle, bus, master, |cpu, val| cpu.perform_cmp(cpu.b, val));
    }

    /// MUL (0x3D): unsigned 8x8->16 multiply, A*B -> D.
    /// Z is set from the full 16-bit result; C is set from bit 7 of B (the
    /// result's low byte), a quirk of the original part used to round BCD
    /// conversions. 11 total cycles (1 fetch + 10 execute).
    pub(crate) fn op_mul(&mut self, cycle: u8) {
        match cycle {
            0..=8 => {
                // Internal cycles modeling the hardware's shift-add sequence.
                self.state = ExecState::Execute(0x3D, cycle + 1);
            }
            9 => {
                let result = (self.a as u16) * (self.b as u16);
                self.set_d(result);
                self.set_flag(CcFlag::Z, result == 0);
                self.set_flag(CcFlag::C, self.b & 0x80 != 0);
                self.state = ExecState::Fetch;
            }
            _ => {}
        }
    }
}
