mod alu;
mod branch;
mod load_store;
mod stack;
mod transfer;

use crate::core::{
    Bus, BusMaster,
    bus::InterruptState,
    component::{BusMasterComponent, Component},
};
use crate::cpu::{
    Cpu, RunState,
    state::{CpuStateTrait, M6809State},
};

#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum CcFlag {
    C = 0x01, // Carry
    V = 0x02, // Overflow
    Z = 0x04, // Zero
    N = 0x08, // Negative
    I = 0x10, // IRQ mask
    H = 0x20, // Half carry
    F = 0x40, // FIRQ mask
    E = 0x80, // Entire
}

pub struct M6809 {
    // Registers (a,b,x,y,u,s,pc,cc)
    pub a: u8,
    pub b: u8,
    pub dp: u8,
    pub x: u16,
    pub y: u16,
    pub u: u16,
    pub s: u16,
    pub pc: u16,
    pub cc: u8,

    // Internal state (generic enough to support TSC/RDY logic)
    pub(crate) state: ExecState,
    pub(crate) opcode: u8,
    pub(crate) temp_addr: u16,
    #[allow(dead_code)]
    resume_delay: u8, // For TSC/RDY release timing

    // Interrupt entry bookkeeping, shared by the Fetch-state sampler, SYNC
    // and CWAI (see stack.rs).
    pub(crate) interrupt_type: u8, // 1=NMI, 2=FIRQ, 3=IRQ
    pub(crate) nmi_previous: bool, // last-sampled NMI line, for edge detection

    /// Arms on the first write to S that looks like stack initialization
    /// (LDS, LEAS, PULS pulling PC, TFR/EXG into S) — see DESIGN.md for why
    /// this set rather than "every S mutation".
    pub(crate) nmi_armed: bool,

    // Asynchronous input latches, set directly by the public Cpu contract
    // (halt/reset/irq/firq/nmi_trigger) independent of whatever the Bus
    // reports via check_interrupts/is_halted_for. A machine is free to wire
    // interrupts either way; the two are simply ORed together at sampling
    // time.
    halt_latch: bool,
    reset_latch: bool,
    irq_latch: bool,
    firq_latch: bool,
    nmi_edge_pending: bool,

    run_state: RunState,
    reset_pending_entry: bool, // true on the cycle RESET is first entered

    // Debugger bookkeeping (see get_state()).
    last_pc: u16,
    last_bytes: u16,
    last_cycles: u16,
    instr_start_pc: u16,
    cycles_this_instr: u16,
}

#[derive(Clone, Debug)]
pub(crate) enum ExecState {
    Fetch,
    Execute(u8, u8),      // (opcode, cycle)
    ExecutePage2(u8, u8), // (opcode, cycle) for 0x10 prefix
    ExecutePage3(u8, u8), // (opcode, cycle) for 0x11 prefix
    Halted {
        return_state: Box<ExecState>,
    },
    /// Hardware interrupt response in progress (push + vector), see
    /// stack.rs::execute_interrupt. Cycle 20/21 is the vector-only tail
    /// used by CWAI completion (registers already pushed).
    Interrupt(u8),
    /// CWAI has pushed the full frame and is waiting for an unmasked
    /// interrupt (stack.rs::wait_for_interrupt).
    WaitForInterrupt,
    /// SYNC is waiting for any interrupt line to assert
    /// (stack.rs::sync_wait).
    SyncWait,
}

impl Default for M6809 {
    fn default() -> Self {
        Self::new()
    }
}

impl M6809 {
    pub fn new() -> Self {
        Self {
            a: 0,
            b: 0,
            dp: 0,
            x: 0,
            y: 0,
            u: 0,
            s: 0,
            pc: 0,
            cc: 0,
            state: ExecState::Fetch,
            opcode: 0,
            temp_addr: 0,
            resume_delay: 0,
            interrupt_type: 0,
            nmi_previous: false,
            // Constructed CPUs start armed so unit tests that poke registers
            // directly (rather than going through init()/reset()) can still
            // exercise NMI without a synthetic boot sequence.
            nmi_armed: true,
            halt_latch: false,
            reset_latch: false,
            irq_latch: false,
            firq_latch: false,
            nmi_edge_pending: false,
            run_state: RunState::Exec,
            reset_pending_entry: true,
            last_pc: 0,
            last_bytes: 0,
            last_cycles: 0,
            instr_start_pc: 0,
            cycles_this_instr: 0,
        }
    }

    pub(crate) fn get_d(&self) -> u16 {
        u16::from_be_bytes([self.a, self.b])
    }

    pub(crate) fn set_d(&mut self, val: u16) {
        let bytes = val.to_be_bytes();
        self.a = bytes[0];
        self.b = bytes[1];
    }

    #[inline]
    pub(crate) fn set_flag(&mut self, flag: CcFlag, set: bool) {
        if set {
            self.cc |= flag as u8
        } else {
            self.cc &= !(flag as u8)
        }
    }

    /// Execute one cycle - handles fetch/execute state machine
    pub fn execute_cycle<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        bus: &mut B,
        master: BusMaster,
    ) {
        // Check TSC via the generic bus, OR'd with a manually-latched halt.
        if bus.is_halted_for(master) || self.halt_latch {
            if !matches!(self.state, ExecState::Halted { .. }) {
                self.state = ExecState::Halted {
                    return_state: Box::new(self.state.clone()),
                };
            }
            return;
        }

        match self.state {
            ExecState::Halted { ref return_state } => {
                // TSC/halt just released: this cycle is the one dead cycle
                // hardware needs to re-sync before resuming, so restore the
                // state that was in flight when HALT was asserted.
                self.state = (**return_state).clone();
            }
            ExecState::Fetch => {
                self.cycles_this_instr = 0;
                if self.sample_interrupts(bus, master) {
                    self.cycles_this_instr += 1;
                    return;
                }
                self.instr_start_pc = self.pc;
                self.opcode = bus.read(master, self.pc);
                self.pc = self.pc.wrapping_add(1);
                self.cycles_this_instr += 1;
                self.state = ExecState::Execute(self.opcode, 0);
            }
            ExecState::Execute(op, cyc) => {
                self.cycles_this_instr += 1;
                self.execute_instruction(op, cyc, bus, master);
                self.note_if_instruction_boundary();
            }
            ExecState::ExecutePage2(op, cyc) => {
                self.cycles_this_instr += 1;
                self.execute_instruction_page2(op, cyc, bus, master);
                self.note_if_instruction_boundary();
            }
            ExecState::ExecutePage3(op, cyc) => {
                self.cycles_this_instr += 1;
                self.execute_instruction_page3(op, cyc, bus, master);
                self.note_if_instruction_boundary();
            }
            ExecState::Interrupt(cycle) => {
                self.cycles_this_instr += 1;
                self.execute_interrupt(cycle, bus, master);
                self.note_if_instruction_boundary();
            }
            ExecState::WaitForInterrupt => {
                self.cycles_this_instr += 1;
                self.wait_for_interrupt(bus, master);
            }
            ExecState::SyncWait => {
                self.cycles_this_instr += 1;
                self.sync_wait(bus, master);
            }
        }
    }

    fn note_if_instruction_boundary(&mut self) {
        if matches!(self.state, ExecState::Fetch) {
            self.last_pc = self.instr_start_pc;
            self.last_bytes = self.pc.wrapping_sub(self.instr_start_pc) & 0xFF;
            self.last_cycles = self.cycles_this_instr;
        }
    }

    /// Sample reset/NMI/FIRQ/IRQ per §4.2.2 and, if an interrupt wins,
    /// transition into the interrupt-entry state machine. Returns true if
    /// servicing began (so the Fetch arm should not also fetch an opcode
    /// this cycle).
    fn sample_interrupts<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        bus: &mut B,
        master: BusMaster,
    ) -> bool {
        let ints = bus.check_interrupts(master);

        let nmi_level = ints.nmi;
        let nmi_edge = (nmi_level && !self.nmi_previous) || self.nmi_edge_pending;
        self.nmi_previous = nmi_level;

        if self.nmi_armed && nmi_edge {
            self.nmi_edge_pending = false;
            self.interrupt_type = 1;
            self.state = ExecState::Interrupt(0);
            return true;
        }
        if (ints.firq || self.firq_latch) && (self.cc & CcFlag::F as u8) == 0 {
            self.interrupt_type = 2;
            self.state = ExecState::Interrupt(0);
            return true;
        }
        if (ints.irq || self.irq_latch) && (self.cc & CcFlag::I as u8) == 0 {
            self.interrupt_type = 3;
            self.state = ExecState::Interrupt(0);
            return true;
        }
        false
    }

    fn execute_instruction<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        opcode: u8,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match opcode {
            // Page 2 Prefix (0x10)
            0x10 => {
                if cycle == 0 {
                    let next_op = bus.read(master, self.pc);
                    self.pc = self.pc.wrapping_add(1);
                    self.state = ExecState::ExecutePage2(next_op, 0);
                }
            }

            // Page 3 Prefix (0x11)
            0x11 => {
                if cycle == 0 {
                    let next_op = bus.read(master, self.pc);
                    self.pc = self.pc.wrapping_add(1);
                    self.state = ExecState::ExecutePage3(next_op, 0);
                }
            }

            // Misc inherent/immediate
            0x12 => self.op_nop(cycle),
            0x13 => self.op_sync(cycle, bus, master),
            0x19 => self.op_daa(cycle),
            0x1A => self.op_orcc(cycle, bus, master),
            0x1C => self.op_andcc(cycle, bus, master),
            0x1D => self.op_sex(cycle),

            // Direct-page unary/shift (0x00-0x0F)
            0x00 => self.op_neg_direct(opcode, cycle, bus, master),
            0x03 => self.op_com_direct(opcode, cycle, bus, master),
            0x04 => self.op_lsr_direct(opcode, cycle, bus, master),
            0x06 => self.op_ror_direct(opcode, cycle, bus, master),
            0x07 => self.op_asr_direct(opcode, cycle, bus, master),
            0x08 => self.op_asl_direct(opcode, cycle, bus, master),
            0x09 => self.op_rol_direct(opcode, cycle, bus, master),
            0x0A => self.op_dec_direct(opcode, cycle, bus, master),
            0x0C => self.op_inc_direct(opcode, cycle, bus, master),
            0x0D => self.op_tst_direct(opcode, cycle, bus, master),
            0x0E => self.op_jmp_direct(opcode, cycle, bus, master),
            0x0F => self.op_clr_direct(opcode, cycle, bus, master),

            // Transfer/Exchange
            0x1E => self.op_exg(cycle, bus, master),
            0x1F => self.op_tfr(cycle, bus, master),

            // ALU instructions (A register inherent)
            0x3D => self.op_mul(cycle),
            0x40 => self.op_nega(cycle),
            0x43 => self.op_coma(cycle),
            0x44 => self.op_lsra(cycle),
            0x46 => self.op_rora(cycle),
            0x47 => self.op_asra(cycle),
            0x48 => self.op_asla(cycle),
            0x49 => self.op_rola(cycle),
            0x4A => self.op_deca(cycle),
            0x4C => self.op_inca(cycle),
            0x4D => self.op_tsta(cycle),
            0x4F => self.op_clra(cycle),

            // LEA instructions
            0x30 => self.op_leax(opcode, cycle, bus, master),
            0x31 => self.op_leay(opcode, cycle, bus, master),
            0x32 => self.op_leas(opcode, cycle, bus, master),
            0x33 => self.op_leau(opcode, cycle, bus, master),

            // Subroutine / Return / Interrupt
            0x39 => self.op_rts(cycle, bus, master),
            0x3A => self.op_abx(cycle),
            0x3B => self.op_rti(cycle, bus, master),
            0x3C => self.op_cwai(cycle, bus, master),
            0x3F => self.op_swi(cycle, bus, master),

            // Stack operations
            0x34 => self.op_pshs(cycle, bus, master),
            0x35 => self.op_puls(cycle, bus, master),
            0x36 => self.op_pshu(cycle, bus, master),
            0x37 => self.op_pulu(cycle, bus, master),

            // Branch instructions (Short)
            0x8D => self.op_bsr(opcode, cycle, bus, master),
            0x20 => self.op_bra(opcode, cycle, bus, master),
            0x21 => self.op_brn(opcode, cycle, bus, master),
            0x22 => self.op_bhi(opcode, cycle, bus, master),
            0x23 => self.op_bls(opcode, cycle, bus, master),
            0x24 => self.op_bcc(opcode, cycle, bus, master),
            0x25 => self.op_bcs(opcode, cycle, bus, master),
            0x26 => self.op_bne(opcode, cycle, bus, master),
            0x27 => self.op_beq(opcode, cycle, bus, master),
            0x28 => self.op_bvc(opcode, cycle, bus, master),
            0x29 => self.op_bvs(opcode, cycle, bus, master),
            0x2A => self.op_bpl(opcode, cycle, bus, master),
            0x2B => self.op_bmi(opcode, cycle, bus, master),
            0x2C => self.op_bge(opcode, cycle, bus, master),
            0x2D => self.op_blt(opcode, cycle, bus, master),
            0x2E => self.op_bgt(opcode, cycle, bus, master),
            0x2F => self.op_ble(opcode, cycle, bus, master),

            // Indexed memory unary/shift (0x60-0x6F)
            0x60 => self.op_neg_indexed(opcode, cycle, bus, master),
            0x63 => self.op_com_indexed(opcode, cycle, bus, master),
            0x64 => self.op_lsr_indexed(opcode, cycle, bus, master),
            0x66 => self.op_ror_indexed(opcode, cycle, bus, master),
            0x67 => self.op_asr_indexed(opcode, cycle, bus, master),
            0x68 => self.op_asl_indexed(opcode, cycle, bus, master),
            0x69 => self.op_rol_indexed(opcode, cycle, bus, master),
            0x6A => self.op_dec_indexed(opcode, cycle, bus, master),
            0x6C => self.op_inc_indexed(opcode, cycle, bus, master),
            0x6D => self.op_tst_indexed(opcode, cycle, bus, master),
            0x6E => self.op_jmp_indexed(opcode, cycle, bus, master),
            0x6F => self.op_clr_indexed(opcode, cycle, bus, master),

            // Extended unary/shift (0x70-0x7F)
            0x70 => self.op_neg_extended(opcode, cycle, bus, master),
            0x73 => self.op_com_extended(opcode, cycle, bus, master),
            0x74 => self.op_lsr_extended(opcode, cycle, bus, master),
            0x76 => self.op_ror_extended(opcode, cycle, bus, master),
            0x77 => self.op_asr_extended(opcode, cycle, bus, master),
            0x78 => self.op_asl_extended(opcode, cycle, bus, master),
            0x79 => self.op_rol_extended(opcode, cycle, bus, master),
            0x7A => self.op_dec_extended(opcode, cycle, bus, master),
            0x7C => self.op_inc_extended(opcode, cycle, bus, master),
            0x7D => self.op_tst_extended(opcode, cycle, bus, master),
            0x7E => self.op_jmp_extended(opcode, cycle, bus, master),
            0x7F => self.op_clr_extended(opcode, cycle, bus, master),

            // ALU immediate (A register)
            0x80 => self.op_suba_imm(cycle, bus, master),
            0x81 => self.op_cmpa_imm(cycle, bus, master),
            0x82 => self.op_sbca_imm(cycle, bus, master),
            0x83 => self.op_subd_imm(opcode, cycle, bus, master),
            0x84 => self.op_anda_imm(cycle, bus, master),
            0x85 => self.op_bita_imm(cycle, bus, master),
            0x88 => self.op_eora_imm(cycle, bus, master),
            0x89 => self.op_adca_imm(cycle, bus, master),
            0x8A => self.op_ora_imm(cycle, bus, master),
            0x8B => self.op_adda_imm(cycle, bus, master),
            0x8C => self.op_cmpx_imm(opcode, cycle, bus, master),
            0x8E => self.op_ldx_imm(opcode, cycle, bus, master),

            // ALU/load/store direct (A register page)
            0x90 => self.op_suba_direct(opcode, cycle, bus, master),
            0x91 => self.op_cmpa_direct(opcode, cycle, bus, master),
            0x92 => self.op_sbca_direct(opcode, cycle, bus, master),
            0x93 => self.op_subd_direct(opcode, cycle, bus, master),
            0x94 => self.op_anda_direct(opcode, cycle, bus, master),
            0x95 => self.op_bita_direct(opcode, cycle, bus, master),
            0x96 => self.op_lda_direct(opcode, cycle, bus, master),
            0x97 => self.op_sta_direct(opcode, cycle, bus, master),
            0x98 => self.op_eora_direct(opcode, cycle, bus, master),
            0x99 => self.op_adca_direct(opcode, cycle, bus, master),
            0x9A => self.op_ora_direct(opcode, cycle, bus, master),
            0x9B => self.op_adda_direct(opcode, cycle, bus, master),
            0x9C => self.op_cmpx_direct(opcode, cycle, bus, master),
            0x9D => self.op_jsr_direct(opcode, cycle, bus, master),
            0x9E => self.op_ldx_direct(opcode, cycle, bus, master),
            0x9F => self.op_stx_direct(opcode, cycle, bus, master),

            // ALU/load/store indexed (A register page, 0xA0-0xAF)
            0xA0 => self.op_suba_indexed(opcode, cycle, bus, master),
            0xA1 => self.op_cmpa_indexed(opcode, cycle, bus, master),
            0xA2 => self.op_sbca_indexed(opcode, cycle, bus, master),
            0xA3 => self.op_subd_indexed(opcode, cycle, bus, master),
            0xA4 => self.op_anda_indexed(opcode, cycle, bus, master),
            0xA5 => self.op_bita_indexed(opcode, cycle, bus, master),
            0xA6 => self.op_lda_indexed(opcode, cycle, bus, master),
            0xA7 => self.op_sta_indexed(opcode, cycle, bus, master),
            0xA8 => self.op_eora_indexed(opcode, cycle, bus, master),
            0xA9 => self.op_adca_indexed(opcode, cycle, bus, master),
            0xAA => self.op_ora_indexed(opcode, cycle, bus, master),
            0xAB => self.op_adda_indexed(opcode, cycle, bus, master),
            0xAC => self.op_cmpx_indexed(opcode, cycle, bus, master),
            0xAD => self.op_jsr_indexed(opcode, cycle, bus, master),
            0xAE => self.op_ldx_indexed(opcode, cycle, bus, master),
            0xAF => self.op_stx_indexed(opcode, cycle, bus, master),

            // ALU extended (A register)
            0xB0 => self.op_suba_extended(opcode, cycle, bus, master),
            0xB1 => self.op_cmpa_extended(opcode, cycle, bus, master),
            0xB2 => self.op_sbca_extended(opcode, cycle, bus, master),
            0xB3 => self.op_subd_extended(opcode, cycle, bus, master),
            0xB4 => self.op_anda_extended(opcode, cycle, bus, master),
            0xB5 => self.op_bita_extended(opcode, cycle, bus, master),
            0xB6 => self.op_lda_extended(opcode, cycle, bus, master),
            0xB7 => self.op_sta_extended(opcode, cycle, bus, master),
            0xB8 => self.op_eora_extended(opcode, cycle, bus, master),
            0xB9 => self.op_adca_extended(opcode, cycle, bus, master),
            0xBA => self.op_ora_extended(opcode, cycle, bus, master),
            0xBB => self.op_adda_extended(opcode, cycle, bus, master),
            0xBC => self.op_cmpx_extended(opcode, cycle, bus, master),
            0xBD => self.op_jsr_extended(opcode, cycle, bus, master),
            0xBE => self.op_ldx_extended(opcode, cycle, bus, master),
            0xBF => self.op_stx_extended(opcode, cycle, bus, master),

            // ALU instructions (B register inherent)
            0x50 => self.op_negb(cycle),
            0x53 => self.op_comb(cycle),
            0x54 => self.op_lsrb(cycle),
            0x56 => self.op_rorb(cycle),
            0x57 => self.op_asrb(cycle),
            0x58 => self.op_aslb(cycle),
            0x59 => self.op_rolb(cycle),
            0x5A => self.op_decb(cycle),
            0x5C => self.op_incb(cycle),
            0x5D => self.op_tstb(cycle),
            0x5F => self.op_clrb(cycle),
            // ALU immediate (B register)
            0xC0 => self.op_subb_imm(cycle, bus, master),
            0xC1 => self.op_cmpb_imm(cycle, bus, master),
            0xC2 => self.op_sbcb_imm(cycle, bus, master),
            0xC3 => self.op_addd_imm(opcode, cycle, bus, master),
            0xC4 => self.op_andb_imm(cycle, bus, master),
            0xC5 => self.op_bitb_imm(cycle, bus, master),
            0xC8 => self.op_eorb_imm(cycle, bus, master),
            0xC9 => self.op_adcb_imm(cycle, bus, master),
            0xCA => self.op_orb_imm(cycle, bus, master),
            0xCB => self.op_addb_imm(cycle, bus, master),
            0xCC => self.op_ldd_imm(opcode, cycle, bus, master),
            0xCE => self.op_ldu_imm(opcode, cycle, bus, master),

            // ALU/load/store direct (B register page)
            0xD0 => self.op_subb_direct(opcode, cycle, bus, master),
            0xD1 => self.op_cmpb_direct(opcode, cycle, bus, master),
            0xD2 => self.op_sbcb_direct(opcode, cycle, bus, master),
            0xD3 => self.op_addd_direct(opcode, cycle, bus, master),
            0xD4 => self.op_andb_direct(opcode, cycle, bus, master),
            0xD5 => self.op_bitb_direct(opcode, cycle, bus, master),
            0xD6 => self.op_ldb_direct(opcode, cycle, bus, master),
            0xD7 => self.op_stb_direct(opcode, cycle, bus, master),
            0xD8 => self.op_eorb_direct(opcode, cycle, bus, master),
            0xD9 => self.op_adcb_direct(opcode, cycle, bus, master),
            0xDA => self.op_orb_direct(opcode, cycle, bus, master),
            0xDB => self.op_addb_direct(opcode, cycle, bus, master),
            0xDC => self.op_ldd_direct(opcode, cycle, bus, master),
            0xDD => self.op_std_direct(opcode, cycle, bus, master),
            0xDE => self.op_ldu_direct(opcode, cycle, bus, master),
            0xDF => self.op_stu_direct(opcode, cycle, bus, master),

            // ALU/load/store indexed (B register page, 0xE0-0xEF)
            0xE0 => self.op_subb_indexed(opcode, cycle, bus, master),
            0xE1 => self.op_cmpb_indexed(opcode, cycle, bus, master),
            0xE2 => self.op_sbcb_indexed(opcode, cycle, bus, master),
            0xE3 => self.op_addd_indexed(opcode, cycle, bus, master),
            0xE4 => self.op_andb_indexed(opcode, cycle, bus, master),
            0xE5 => self.op_bitb_indexed(opcode, cycle, bus, master),
            0xE6 => self.op_ldb_indexed(opcode, cycle, bus, master),
            0xE7 => self.op_stb_indexed(opcode, cycle, bus, master),
            0xE8 => self.op_eorb_indexed(opcode, cycle, bus, master),
            0xE9 => self.op_adcb_indexed(opcode, cycle, bus, master),
            0xEA => self.op_orb_indexed(opcode, cycle, bus, master),
            0xEB => self.op_addb_indexed(opcode, cycle, bus, master),
            0xEC => self.op_ldd_indexed(opcode, cycle, bus, master),
            0xED => self.op_std_indexed(opcode, cycle, bus, master),
            0xEE => self.op_ldu_indexed(opcode, cycle, bus, master),
            0xEF => self.op_stu_indexed(opcode, cycle, bus, master),

            // ALU extended (B register)
            0xF0 => self.op_subb_extended(opcode, cycle, bus, master),
            0xF1 => self.op_cmpb_extended(opcode, cycle, bus, master),
            0xF2 => self.op_sbcb_extended(opcode, cycle, bus, master),
            0xF3 => self.op_addd_extended(opcode, cycle, bus, master),
            0xF4 => self.op_andb_extended(opcode, cycle, bus, master),
            0xF5 => self.op_bitb_extended(opcode, cycle, bus, master),
            0xF6 => self.op_ldb_extended(opcode, cycle, bus, master),
            0xF7 => self.op_stb_extended(opcode, cycle, bus, master),
            0xF8 => self.op_eorb_extended(opcode, cycle, bus, master),
            0xF9 => self.op_adcb_extended(opcode, cycle, bus, master),
            0xFA => self.op_orb_extended(opcode, cycle, bus, master),
            0xFB => self.op_addb_extended(opcode, cycle, bus, master),
            0xFC => self.op_ldd_extended(opcode, cycle, bus, master),
            0xFD => self.op_std_extended(opcode, cycle, bus, master),
            0xFE => self.op_ldu_extended(opcode, cycle, bus, master),
            0xFF => self.op_stu_extended(opcode, cycle, bus, master),

            // Load/store immediate
            0x86 => self.op_lda_imm(cycle, bus, master),
            0xC6 => self.op_ldb_imm(cycle, bus, master),

            // Unknown/illegal opcode: fatal decode failure per §4.2.6.
            _ => {
                self.run_state = RunState::Exception;
                self.state = ExecState::Fetch;
            }
        }
    }

    fn execute_instruction_page2<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        opcode: u8,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match opcode {
            // SWI2
            0x3F => self.op_swi2(cycle, bus, master),

            // Long branches
            0x21 => self.op_lbrn(opcode, cycle, bus, master),
            0x22 => self.op_lbhi(opcode, cycle, bus, master),
            0x23 => self.op_lbls(opcode, cycle, bus, master),
            0x24 => self.op_lbcc(opcode, cycle, bus, master),
            0x25 => self.op_lbcs(opcode, cycle, bus, master),
            0x26 => self.op_lbne(opcode, cycle, bus, master),
            0x27 => self.op_lbeq(opcode, cycle, bus, master),
            0x28 => self.op_lbvc(opcode, cycle, bus, master),
            0x29 => self.op_lbvs(opcode, cycle, bus, master),
            0x2A => self.op_lbpl(opcode, cycle, bus, master),
            0x2B => self.op_lbmi(opcode, cycle, bus, master),
            0x2C => self.op_lbge(opcode, cycle, bus, master),
            0x2D => self.op_lblt(opcode, cycle, bus, master),
            0x2E => self.op_lbgt(opcode, cycle, bus, master),
            0x2F => self.op_lble(opcode, cycle, bus, master),

            // CMPD (immediate, direct, indexed, extended)
            0x83 => self.op_cmpd_imm(opcode, cycle, bus, master),
            0x93 => self.op_cmpd_direct(opcode, cycle, bus, master),
            0xA3 => self.op_cmpd_indexed(opcode, cycle, bus, master),
            0xB3 => self.op_cmpd_extended(opcode, cycle, bus, master),

            // CMPY (immediate, direct, indexed, extended)
            0x8C => self.op_cmpy_imm(opcode, cycle, bus, master),
            0x9C => self.op_cmpy_direct(opcode, cycle, bus, master),
            0xAC => self.op_cmpy_indexed(opcode, cycle, bus, master),
            0xBC => self.op_cmpy_extended(opcode, cycle, bus, master),

            // LDY / STY (immediate, direct, indexed, extended)
            0x8E => self.op_ldy_imm(opcode, cycle, bus, master),
            0x9E => self.op_ldy_direct(opcode, cycle, bus, master),
            0x9F => self.op_sty_direct(opcode, cycle, bus, master),
            0xAE => self.op_ldy_indexed(opcode, cycle, bus, master),
            0xAF => self.op_sty_indexed(opcode, cycle, bus, master),
            0xBE => self.op_ldy_extended(opcode, cycle, bus, master),
            0xBF => self.op_sty_extended(opcode, cycle, bus, master),

            // LDS / STS (immediate, direct, indexed, extended)
            0xCE => self.op_lds_imm(opcode, cycle, bus, master),
            0xDE => self.op_lds_direct(opcode, cycle, bus, master),
            0xDF => self.op_sts_direct(opcode, cycle, bus, master),
            0xEE => self.op_lds_indexed(opcode, cycle, bus, master),
            0xEF => self.op_sts_indexed(opcode, cycle, bus, master),
            0xFE => self.op_lds_extended(opcode, cycle, bus, master),
            0xFF => self.op_sts_extended(opcode, cycle, bus, master),

            _ => {
                self.run_state = RunState::Exception;
                self.state = ExecState::Fetch;
            }
        }
    }

    fn execute_instruction_page3<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        opcode: u8,
        cycle: u8,
        bus: &mut B,
        master: BusMaster,
    ) {
        match opcode {
            // SWI3
            0x3F => self.op_swi3(cycle, bus, master),

            // CMPU (immediate, direct, indexed, extended)
            0x83 => self.op_cmpu_imm(opcode, cycle, bus, master),
            0x93 => self.op_cmpu_direct(opcode, cycle, bus, master),
            0xA3 => self.op_cmpu_indexed(opcode, cycle, bus, master),
            0xB3 => self.op_cmpu_extended(opcode, cycle, bus, master),

            // CMPS (immediate, direct, indexed, extended)
            0x8C => self.op_cmps_imm(opcode, cycle, bus, master),
            0x9C => self.op_cmps_direct(opcode, cycle, bus, master),
            0xAC => self.op_cmps_indexed(opcode, cycle, bus, master),
            0xBC => self.op_cmps_extended(opcode, cycle, bus, master),

            _ => {
                self.run_state = RunState::Exception;
                self.state = ExecState::Fetch;
            }
        }
    }

    /// Drive the reset sequence (§4.2.2 step 1) while the reset latch holds,
    /// reading the vector from the bus exactly once per fresh assertion.
    fn service_reset<B: Bus<Address = u16, Data = u8> + ?Sized>(&mut self, bus: &mut B, master: BusMaster) {
        if self.reset_pending_entry {
            self.dp = 0;
            self.cc |= CcFlag::F as u8 | CcFlag::I as u8;
            self.nmi_armed = false;
            self.nmi_previous = false;
            self.nmi_edge_pending = false;
            let hi = bus.read(master, 0xFFFE) as u16;
            let lo = bus.read(master, 0xFFFF) as u16;
            self.pc = (hi << 8) | lo;
            self.state = ExecState::Fetch;
            self.reset_pending_entry = false;
        }
        self.run_state = RunState::Reset;
    }
}

impl Component for M6809 {
    fn tick(&mut self) -> bool {
        // This would be called for clock-domain only ticks (no bus)
        // For CPUs, we usually use tick_with_bus instead
        false
    }
}

impl BusMasterComponent for M6809 {
    type Bus = dyn Bus<Address = u16, Data = u8>;

    fn tick_with_bus(&mut self, bus: &mut Self::Bus, master: BusMaster) -> bool {
        self.execute_cycle(bus, master);
        // Return true if instruction boundary reached
        matches!(self.state, ExecState::Fetch)
    }
}

impl Cpu for M6809 {
    fn init(&mut self, start_addr: u16) {
        self.a = 0;
        self.b = 0;
        self.dp = 0;
        self.x = 0;
        self.y = 0;
        self.u = 0;
        self.s = 0;
        self.cc = 0;
        self.pc = start_addr;
        self.state = ExecState::Fetch;
        self.opcode = 0;
        self.temp_addr = 0;
        self.interrupt_type = 0;
        self.nmi_previous = false;
        self.nmi_armed = false;
        self.halt_latch = false;
        self.reset_latch = false;
        self.irq_latch = false;
        self.firq_latch = false;
        self.nmi_edge_pending = false;
        self.run_state = RunState::Halted;
        self.reset_pending_entry = true;
        self.last_pc = start_addr;
        self.last_bytes = 0;
        self.last_cycles = 0;
    }

    fn halt(&mut self, asserted: bool) {
        self.halt_latch = asserted;
    }

    fn reset(&mut self, asserted: bool) {
        if asserted && !self.reset_latch {
            self.reset_pending_entry = true;
        }
        self.reset_latch = asserted;
    }

    fn irq(&mut self, asserted: bool) {
        self.irq_latch = asserted;
    }

    fn firq(&mut self, asserted: bool) {
        self.firq_latch = asserted;
    }

    fn nmi_trigger(&mut self) {
        self.nmi_edge_pending = true;
    }

    fn step<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &mut self,
        bus: &mut B,
        master: BusMaster,
    ) -> RunState {
        if self.reset_latch {
            self.service_reset(bus, master);
            return self.run_state;
        }
        self.reset_pending_entry = true; // arm for the next reset assertion

        if self.halt_latch || bus.is_halted_for(master) {
            self.execute_cycle(bus, master);
            self.run_state = RunState::Halted;
            return self.run_state;
        }

        if matches!(self.state, ExecState::SyncWait) {
            self.run_state = RunState::Sync;
        }

        // Drive whole-cycle steps until an instruction boundary (or a
        // halt/sleep state) is reached; this makes `step()` the coarse,
        // "one instruction" primitive the public contract promises while
        // execute_cycle/tick_with_bus remains the cycle-granular internal
        // substrate the existing test suite drives directly.
        loop {
            let was_waiting = matches!(self.state, ExecState::SyncWait | ExecState::WaitForInterrupt);
            self.execute_cycle(bus, master);
            match self.state {
                ExecState::Fetch => {
                    self.run_state = RunState::Exec;
                    break;
                }
                ExecState::SyncWait | ExecState::WaitForInterrupt => {
                    if was_waiting {
                        // Still waiting one cycle later with no state change: the
                        // caller gets control back rather than spinning forever.
                        self.run_state = RunState::Sync;
                        break;
                    }
                }
                ExecState::Halted { .. } => {
                    self.run_state = RunState::Halted;
                    break;
                }
                _ => {}
            }
            if matches!(self.run_state, RunState::Exception) {
                break;
            }
        }
        self.run_state
    }

    fn get_state(&self) -> CpuDebugState {
        CpuDebugState {
            a: self.a,
            b: self.b,
            dp: self.dp,
            x: self.x,
            y: self.y,
            u: self.u,
            s: self.s,
            pc: self.pc,
            cc: self.cc,
            run_state: self.run_state,
            last_pc: self.last_pc,
            last_bytes: self.last_bytes,
            last_cycles: self.last_cycles,
        }
    }

    fn mnemonic_at<B: Bus<Address = u16, Data = u8> + ?Sized>(
        &self,
        bus: &mut B,
        master: BusMaster,
        addr: u16,
    ) -> &'static str {
        let op = bus.read(master, addr);
        match op {
            0x10 => mnemonic_page2(bus.read(master, addr.wrapping_add(1))),
            0x11 => mnemonic_page3(bus.read(master, addr.wrapping_add(1))),
            _ => mnemonic_page1(op),
        }
    }

    fn is_sleeping(&self) -> bool {
        matches!(
            self.state,
            ExecState::Halted { .. } | ExecState::SyncWait | ExecState::WaitForInterrupt
        )
    }
}

impl CpuStateTrait for M6809 {
    type Snapshot = M6809State;

    fn snapshot(&self) -> M6809State {
        M6809State {
            a: self.a,
            b: self.b,
            dp: self.dp,
            x: self.x,
            y: self.y,
            u: self.u,
            s: self.s,
            pc: self.pc,
            cc: self.cc,
        }
    }
}

/// Snapshot returned by `Cpu::get_state` for debugger/monitor front ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuDebugState {
    pub a: u8,
    pub b: u8,
    pub dp: u8,
    pub x: u16,
    pub y: u16,
    pub u: u16,
    pub s: u16,
    pub pc: u16,
    pub cc: u8,
    pub run_state: RunState,
    pub last_pc: u16,
    pub last_bytes: u16,
    pub last_cycles: u16,
}

fn mnemonic_page1(op: u8) -> &'static str {
    match op {
        0x00 => "NEG direct",
        0x03 => "COM direct",
        0x04 => "LSR direct",
        0x06 => "ROR direct",
        0x07 => "ASR direct",
        0x08 => "ASL direct",
        0x09 => "ROL direct",
        0x0A => "DEC direct",
        0x0C => "INC direct",
        0x0D => "TST direct",
        0x0E => "JMP direct",
        0x0F => "CLR direct",
        0x12 => "NOP",
        0x13 => "SYNC",
        0x19 => "DAA",
        0x1A => "ORCC #",
        0x1C => "ANDCC #",
        0x1D => "SEX",
        0x1E => "EXG",
        0x1F => "TFR",
        0x20 => "BRA",
        0x21 => "BRN",
        0x22 => "BHI",
        0x23 => "BLS",
        0x24 => "BCC",
        0x25 => "BCS",
        0x26 => "BNE",
        0x27 => "BEQ",
        0x28 => "BVC",
        0x29 => "BVS",
        0x2A => "BPL",
        0x2B => "BMI",
        0x2C => "BGE",
        0x2D => "BLT",
        0x2E => "BGT",
        0x2F => "BLE",
        0x30 => "LEAX",
        0x31 => "LEAY",
        0x32 => "LEAS",
        0x33 => "LEAU",
        0x34 => "PSHS",
        0x35 => "PULS",
        0x36 => "PSHU",
        0x37 => "PULU",
        0x39 => "RTS",
        0x3A => "ABX",
        0x3B => "RTI",
        0x3C => "CWAI",
        0x3D => "MUL",
        0x3F => "SWI",
        0x40 => "NEGA",
        0x43 => "COMA",
        0x44 => "LSRA",
        0x46 => "RORA",
        0x47 => "ASRA",
        0x48 => "ASLA",
        0x49 => "ROLA",
        0x4A => "DECA",
        0x4C => "INCA",
        0x4D => "TSTA",
        0x4F => "CLRA",
        0x50 => "NEGB",
        0x53 => "COMB",
        0x54 => "LSRB",
        0x56 => "RORB",
        0x57 => "ASRB",
        0x58 => "ASLB",
        0x59 => "ROLB",
        0x5A => "DECB",
        0x5C => "INCB",
        0x5D => "TSTB",
        0x5F => "CLRB",
        0x60 => "NEG indexed",
        0x63 => "COM indexed",
        0x64 => "LSR indexed",
        0x66 => "ROR indexed",
        0x67 => "ASR indexed",
        0x68 => "ASL indexed",
        0x69 => "ROL indexed",
        0x6A => "DEC indexed",
        0x6C => "INC indexed",
        0x6D => "TST indexed",
        0x6E => "JMP indexed",
        0x6F => "CLR indexed",
        0x70 => "NEG extended",
        0x73 => "COM extended",
        0x74 => "LSR extended",
        0x76 => "ROR extended",
        0x77 => "ASR extended",
        0x78 => "ASL extended",
        0x79 => "ROL extended",
        0x7A => "DEC extended",
        0x7C => "INC extended",
        0x7D => "TST extended",
        0x7E => "JMP extended",
        0x7F => "CLR extended",
        0x80 => "SUBA #",
        0x81 => "CMPA #",
        0x82 => "SBCA #",
        0x83 => "SUBD #",
        0x84 => "ANDA #",
        0x85 => "BITA #",
        0x86 => "LDA #",
        0x88 => "EORA #",
        0x89 => "ADCA #",
        0x8A => "ORA #",
        0x8B => "ADDA #",
        0x8C => "CMPX #",
        0x8D => "BSR",
        0x8E => "LDX #",
        0x90 => "SUBA direct",
        0x91 => "CMPA direct",
        0x92 => "SBCA direct",
        0x93 => "SUBD direct",
        0x94 => "ANDA direct",
        0x95 => "BITA direct",
        0x96 => "LDA direct",
        0x97 => "STA direct",
        0x98 => "EORA direct",
        0x99 => "ADCA direct",
        0x9A => "ORA direct",
        0x9B => "ADDA direct",
        0x9C => "CMPX direct",
        0x9D => "JSR direct",
        0x9E => "LDX direct",
        0x9F => "STX direct",
        0xA0 => "SUBA indexed",
        0xA1 => "CMPA indexed",
        0xA2 => "SBCA indexed",
        0xA3 => "SUBD indexed",
        0xA4 => "ANDA indexed",
        0xA5 => "BITA indexed",
        0xA6 => "LDA indexed",
        0xA7 => "STA indexed",
        0xA8 => "EORA indexed",
        0xA9 => "ADCA indexed",
        0xAA => "ORA indexed",
        0xAB => "ADDA indexed",
        0xAC => "CMPX indexed",
        0xAD => "JSR indexed",
        0xAE => "LDX indexed",
        0xAF => "STX indexed",
        0xB0 => "SUBA extended",
        0xB1 => "CMPA extended",
        0xB2 => "SBCA extended",
        0xB3 => "SUBD extended",
        0xB4 => "ANDA extended",
        0xB5 => "BITA extended",
        0xB6 => "LDA extended",
        0xB7 => "STA extended",
        0xB8 => "EORA extended",
        0xB9 => "ADCA extended",
        0xBA => "ORA extended",
        0xBB => "ADDA extended",
        0xBC => "CMPX extended",
        0xBD => "JSR extended",
        0xBE => "LDX extended",
        0xBF => "STX extended",
        0xC0 => "SUBB #",
        0xC1 => "CMPB #",
        0xC2 => "SBCB #",
        0xC3 => "ADDD #",
        0xC4 => "ANDB #",
        0xC5 => "BITB #",
        0xC6 => "LDB #",
        0xC8 => "EORB #",
        0xC9 => "ADCB #",
        0xCA => "ORB #",
        0xCB => "ADDB #",
        0xCC => "LDD #",
        0xCE => "LDU #",
        0xD0 => "SUBB direct",
        0xD1 => "CMPB direct",
        0xD2 => "SBCB direct",
        0xD3 => "ADDD direct",
        0xD4 => "ANDB direct",
        0xD5 => "BITB direct",
        0xD6 => "LDB direct",
        0xD7 => "STB direct",
        0xD8 => "EORB direct",
        0xD9 => "ADCB direct",
        0xDA => "ORB direct",
        0xDB => "ADDB direct",
        0xDC => "LDD direct",
        0xDD => "STD direct",
        0xDE => "LDU direct",
        0xDF => "STU direct",
        0xE0 => "SUBB indexed",
        0xE1 => "CMPB indexed",
        0xE2 => "SBCB indexed",
        0xE3 => "ADDD indexed",
        0xE4 => "ANDB indexed",
        0xE5 => "BITB indexed",
        0xE6 => "LDB indexed",
        0xE7 => "STB indexed",
        0xE8 => "EORB indexed",
        0xE9 => "ADCB indexed",
        0xEA => "ORB indexed",
        0xEB => "ADDB indexed",
        0xEC => "LDD indexed",
        0xED => "STD indexed",
        0xEE => "LDU indexed",
        0xEF => "STU indexed",
        0xF0 => "SUBB extended",
        0xF1 => "CMPB extended",
        0xF2 => "SBCB extended",
        0xF3 => "ADDD extended",
        0xF4 => "ANDB extended",
        0xF5 => "BITB extended",
        0xF6 => "LDB extended",
        0xF7 => "STB extended",
        0xF8 => "EORB extended",
        0xF9 => "ADCB extended",
        0xFA => "ORB extended",
        0xFB => "ADDB extended",
        0xFC => "LDD extended",
        0xFD => "STD extended",
        0xFE => "LDU extended",
        0xFF => "STU extended",
        _ => "???",
    }
}

fn mnemonic_page2(op: u8) -> &'static str {
    match op {
        0x21 => "LBRN",
        0x22 => "LBHI",
        0x23 => "LBLS",
        0x24 => "LBCC",
        0x25 => "LBCS",
        0x26 => "LBNE",
        0x27 => "LBEQ",
        0x28 => "LBVC",
        0x29 => "LBVS",
        0x2A => "LBPL",
        0x2B => "LBMI",
        0x2C => "LBGE",
        0x2D => "LBLT",
        0x2E => "LBGT",
        0x2F => "LBLE",
        0x3F => "SWI2",
        0x83 => "CMPD #",
        0x8C => "CMPY #",
        0x8E => "LDY #",
        0x93 => "CMPD direct",
        0x9C => "CMPY direct",
        0x9E => "LDY direct",
        0x9F => "STY direct",
        0xA3 => "CMPD indexed",
        0xAC => "CMPY indexed",
        0xAE => "LDY indexed",
        0xAF => "STY indexed",
        0xB3 => "CMPD extended",
        0xBC => "CMPY extended",
        0xBE => "LDY extended",
        0xBF => "STY extended",
        0xCE => "LDS #",
        0xDE => "LDS direct",
        0xDF => "STS direct",
        0xEE => "LDS indexed",
        0xEF => "STS indexed",
        0xFE => "LDS extended",
        0xFF => "STS extended",
        _ => "???",
    }
}

fn mnemonic_page3(op: u8) -> &'static str {
    match op {
        0x3F => "SWI3",
        0x83 => "CMPU #",
        0x8C => "CMPS #",
        0x93 => "CMPU direct",
        0x9C => "CMPS direct",
        0xA3 => "CMPU indexed",
        0xAC => "CMPS indexed",
        0xB3 => "CMPU extended",
        0xBC => "CMPS extended",
        _ => "???",
    }
}
