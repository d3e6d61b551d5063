use phosphor_core::device::memory::Memory;
use phosphor_core::device::vdg::{Vdg, VdgMode};

/// Invariant #10: for every (sam_mode, pia_mode) pair in the documented
/// table, `compose()` returns exactly the specified mode.
#[test]
fn mode_composition_table_alpha_and_semigraphics() {
    assert_eq!(Vdg::compose(0b000, 0b00000), VdgMode::AlphaInternal);
    assert_eq!(Vdg::compose(0b000, 0b00001), VdgMode::AlphaExternal);
    assert_eq!(Vdg::compose(0b010, 0b00000), VdgMode::SemiGraphics8);
    assert_eq!(Vdg::compose(0b100, 0b00000), VdgMode::SemiGraphics12);
    assert_eq!(Vdg::compose(0b110, 0b00000), VdgMode::SemiGraphics24);
}

#[test]
fn mode_composition_table_graphics() {
    // pia_mode bit 4 (^G) = 1 enables graphics; bits 1..3 select GM[2:0].
    let g = |gm: u8| 0b10000 | (gm << 1);
    assert_eq!(Vdg::compose(0, g(0b000)), VdgMode::Graphics1C);
    assert_eq!(Vdg::compose(0, g(0b001)), VdgMode::Graphics1R);
    assert_eq!(Vdg::compose(0, g(0b010)), VdgMode::Graphics2C);
    assert_eq!(Vdg::compose(0, g(0b011)), VdgMode::Graphics2R);
    assert_eq!(Vdg::compose(0, g(0b100)), VdgMode::Graphics3C);
    assert_eq!(Vdg::compose(0, g(0b101)), VdgMode::Graphics3R);
    assert_eq!(Vdg::compose(0, g(0b110)), VdgMode::Graphics6C);
    assert_eq!(Vdg::compose(0, g(0b111)), VdgMode::Graphics6R);
}

#[test]
fn sam_mode_7_is_always_dma_regardless_of_pia_bits() {
    assert_eq!(Vdg::compose(0b111, 0b00000), VdgMode::Dma);
    assert_eq!(Vdg::compose(0b111, 0b11111), VdgMode::Dma);
}

#[test]
fn resolution_table_matches_spec() {
    assert_eq!(VdgMode::AlphaInternal.resolution(), (256, 192));
    assert_eq!(VdgMode::Graphics1C.resolution(), (64, 64));
    assert_eq!(VdgMode::Graphics1R.resolution(), (128, 64));
    assert_eq!(VdgMode::Graphics2C.resolution(), (128, 64));
    assert_eq!(VdgMode::Graphics2R.resolution(), (128, 96));
    assert_eq!(VdgMode::Graphics3C.resolution(), (128, 96));
    assert_eq!(VdgMode::Graphics3R.resolution(), (128, 192));
    assert_eq!(VdgMode::Graphics6C.resolution(), (128, 192));
    assert_eq!(VdgMode::Graphics6R.resolution(), (256, 192));
}

#[test]
fn render_alpha_internal_produces_nonblank_output_for_nonzero_glyphs() {
    let mut memory = Memory::new();
    // Fill the default text page with a repeating non-space glyph code.
    for addr in 0x0400u16..0x0400 + 32 * 16 {
        memory.write(addr, 0x01);
    }
    let mut vdg = Vdg::new();
    vdg.set_video_offset((0x0400u16 >> 9) as u8);

    let (w, h) = VdgMode::AlphaInternal.resolution();
    let mut fb = vec![0u8; (w * h) as usize];
    let (rw, rh) = vdg.render(&memory, &mut fb);
    assert_eq!((rw, rh), (w, h));
    assert!(fb.iter().any(|&px| px != 0), "expected some non-background pixels");
}

#[test]
fn render_graphics_3r_doubles_pixel_width_relative_to_1r() {
    let mut memory = Memory::new();
    // A single 0xFF byte at the base address should light up the first
    // 8 (undoubled) or 16 (doubled) pixels of the top row.
    memory.write(0, 0xFF);

    let mut vdg_1r = Vdg::new();
    vdg_1r.set_pia_mode(0b10000 | (0b001 << 1)); // Graphics1R
    let (w1, h1) = VdgMode::Graphics1R.resolution();
    let mut fb1 = vec![0u8; (w1 * h1) as usize];
    vdg_1r.render(&memory, &mut fb1);
    let lit_1r = fb1[..w1 as usize].iter().filter(|&&p| p != 0).count();

    let mut vdg_3r = Vdg::new();
    vdg_3r.set_pia_mode(0b10000 | (0b101 << 1)); // Graphics3R
    let (w3, h3) = VdgMode::Graphics3R.resolution();
    let mut fb3 = vec![0u8; (w3 * h3) as usize];
    vdg_3r.render(&memory, &mut fb3);
    let lit_3r = fb3[..w3 as usize].iter().filter(|&&p| p != 0).count();

    assert_eq!(lit_1r, 8);
    assert_eq!(lit_3r, 16, "3R must double each bit's pixel width");
}
