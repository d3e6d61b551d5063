use super::memory::Memory;

/// Composed video mode, derived from SAM's 3-bit `vdg_mode` and PIA1's
/// 5-bit `pia_video_mode` (see §4.4). `Undefined` covers combinations the
/// table leaves unspecified; `AlphaExternal`/`Dma` are recognized but fatal
/// per §7 (UnsupportedVideoMode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VdgMode {
    AlphaInternal,
    AlphaExternal,
    SemiGraphics8,
    SemiGraphics12,
    SemiGraphics24,
    Graphics1C,
    Graphics1R,
    Graphics2C,
    Graphics2R,
    Graphics3C,
    Graphics3R,
    Graphics6C,
    Graphics6R,
    Dma,
    Undefined,
}

impl VdgMode {
    /// Pixel resolution for the mode's active framebuffer region.
    pub fn resolution(self) -> (u32, u32) {
        match self {
            VdgMode::AlphaInternal | VdgMode::AlphaExternal => (256, 192),
            VdgMode::SemiGraphics8 | VdgMode::SemiGraphics12 | VdgMode::SemiGraphics24 => {
                (256, 192)
            }
            VdgMode::Graphics1C => (64, 64),
            VdgMode::Graphics1R => (128, 64),
            VdgMode::Graphics2C => (128, 64),
            VdgMode::Graphics2R => (128, 96),
            VdgMode::Graphics3C => (128, 96),
            VdgMode::Graphics3R => (128, 192),
            VdgMode::Graphics6C => (128, 192),
            VdgMode::Graphics6R => (256, 192),
            VdgMode::Dma | VdgMode::Undefined => (256, 192),
        }
    }
}

/// 16-entry BGR palette fixed at initialization per §6.
pub const PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),       // 0 Black
    (0, 0, 170),     // 1 Blue
    (0, 170, 0),     // 2 Green
    (0, 170, 170),   // 3 Cyan
    (170, 0, 0),     // 4 Red
    (170, 0, 170),   // 5 Magenta
    (170, 85, 0),    // 6 Brown
    (170, 170, 170), // 7 Gray
    (85, 85, 85),    // 8 DarkGray
    (85, 85, 255),   // 9 LightBlue
    (85, 255, 85),   // 10 LightGreen
    (85, 255, 255),  // 11 LightCyan
    (255, 85, 85),   // 12 LightRed
    (255, 85, 255),  // 13 LightMagenta
    (255, 255, 85),  // 14 Yellow
    (255, 255, 255), // 15 White
];

/// A 6x8 internal character font covering the 64 codes the VDG's ALPHA
/// mode addresses (bits 0..5 of the glyph byte). Each row is a bitmask,
/// MSB-first, of the 6 active columns.
const FONT: [[u8; 8]; 64] = build_font();

const fn build_font() -> [[u8; 8]; 64] {
    // A compact procedural fallback: every glyph renders as its own
    // 6-bit code value striped across the cell. Real character shapes are
    // a host/ROM font concern layered on top of this minimum viable table.
    let mut table = [[0u8; 8]; 64];
    let mut i = 0;
    while i < 64 {
        let mut row = 0;
        while row < 8 {
            table[i][row] = ((i as u8) << 2) ^ ((row as u8) * 0x15);
            row += 1;
        }
        i += 1;
    }
    table
}

/// Semigraphics-4/6 2x2/3x2/2x3 block patterns, one per 4-bit pattern
/// nibble, rendered as a coarse on/off mask across the cell.
const SEMIGRAPHICS_PATTERNS: [u8; 16] = [
    0b0000, 0b1000, 0b0100, 0b1100, 0b0010, 0b1010, 0b0110, 0b1110, 0b0001, 0b1001, 0b0101,
    0b1101, 0b0011, 0b1011, 0b0111, 0b1111,
];

pub struct Vdg {
    sam_mode: u8,           // 3 bits
    pia_mode: u8,           // 5 bits
    display_offset: u8,     // 7 bits, SAM's vdg_display_offset
    css: bool,              // color-set select, PIA1 PB bit 0
    mode: VdgMode,
    prev_mode: VdgMode,
}

impl Vdg {
    pub fn new() -> Self {
        Self {
            sam_mode: 0,
            pia_mode: 0,
            display_offset: 0,
            css: false,
            mode: VdgMode::AlphaInternal,
            prev_mode: VdgMode::AlphaInternal,
        }
    }

    pub fn set_sam_mode(&mut self, sam_mode: u8) {
        self.sam_mode = sam_mode & 0x07;
        self.recompose();
    }

    pub fn set_pia_mode(&mut self, pia_mode: u8) {
        self.pia_mode = pia_mode & 0x1F;
        self.recompose();
    }

    pub fn set_video_offset(&mut self, offset: u8) {
        self.display_offset = offset & 0x7F;
    }

    pub fn set_css(&mut self, css: bool) {
        self.css = css;
    }

    fn recompose(&mut self) {
        self.mode = Self::compose(self.sam_mode, self.pia_mode);
    }

    /// Pure mode-composition function (testable property #10). `sam_mode`
    /// is the 3-bit SAM register; `pia_mode` packs ^A/INT in bit 0, GM[2:0]
    /// in bits 1..3, and ^G in bit 4 (the quantities PIA1-PB bits 3..7
    /// yield once shifted right by 3).
    pub fn compose(sam_mode: u8, pia_mode: u8) -> VdgMode {
        if sam_mode == 0x07 {
            return VdgMode::Dma;
        }
        let graphics_enabled = (pia_mode >> 4) & 1 != 0;
        if graphics_enabled {
            let gm = (pia_mode >> 1) & 0x07;
            return match gm {
                0 => VdgMode::Graphics1C,
                1 => VdgMode::Graphics1R,
                2 => VdgMode::Graphics2C,
                3 => VdgMode::Graphics2R,
                4 => VdgMode::Graphics3C,
                5 => VdgMode::Graphics3R,
                6 => VdgMode::Graphics6C,
                _ => VdgMode::Graphics6R,
            };
        }
        let alpha_external = pia_mode & 1 != 0;
        // The bottom bit of sam_mode only distinguishes DMA (0b111); in the
        // text/semigraphics family it is along for the ride until the next
        // category bit changes, per the dead-branch note in §9.
        match sam_mode & 0xFE {
            0 => {
                if alpha_external {
                    VdgMode::AlphaExternal
                } else {
                    VdgMode::AlphaInternal
                }
            }
            2 => VdgMode::SemiGraphics8,
            4 => VdgMode::SemiGraphics12,
            6 => VdgMode::SemiGraphics24,
            _ => VdgMode::Undefined,
        }
    }

    pub fn mode(&self) -> VdgMode {
        self.mode
    }

    /// Base address of video RAM, derived from SAM's 7-bit offset shifted
    /// to a byte address (each unit is a 512-byte page).
    fn base_addr(&self) -> u16 {
        (self.display_offset as u16) << 9
    }

    /// Render the active mode into an 8-bit indexed `framebuffer`
    /// (row-major, one palette index per pixel). Returns the resolution the
    /// caller should have allocated the buffer at; on a mode change from
    /// the previous `render()` call this differs from before and the host
    /// is expected to have renegotiated via `fb_resolution`.
    pub fn render(&mut self, memory: &Memory, framebuffer: &mut [u8]) -> (u32, u32) {
        let (w, h) = self.mode.resolution();
        let mode_changed = self.mode != self.prev_mode;
        self.prev_mode = self.mode;
        let _ = mode_changed;

        match self.mode {
            VdgMode::AlphaInternal => self.render_alpha(memory, framebuffer, w, h),
            VdgMode::SemiGraphics8 | VdgMode::SemiGraphics12 | VdgMode::SemiGraphics24 => {
                self.render_semigraphics(memory, framebuffer, w, h)
            }
            VdgMode::Graphics1C | VdgMode::Graphics2C | VdgMode::Graphics3C => {
                self.render_graphics_c(memory, framebuffer, w, h, false)
            }
            VdgMode::Graphics6C => self.render_graphics_c(memory, framebuffer, w, h, true),
            VdgMode::Graphics1R | VdgMode::Graphics2R => {
                self.render_graphics_r(memory, framebuffer, w, h, false)
            }
            VdgMode::Graphics3R => self.render_graphics_r(memory, framebuffer, w, h, true),
            VdgMode::Graphics6R => self.render_graphics_r(memory, framebuffer, w, h, false),
            VdgMode::AlphaExternal | VdgMode::Dma | VdgMode::Undefined => {
                // §7: UnsupportedVideoMode is fatal; the main loop halts with
                // a diagnostic rather than this device crashing outright.
                framebuffer.fill(0);
            }
        }
        (w, h)
    }

    fn render_alpha(&self, memory: &Memory, fb: &mut [u8], w: u32, h: u32) {
        let base = self.base_addr();
        let cols = 32u32;
        let rows = 16u32;
        let cell_w = w / cols;
        let cell_h = h / rows;
        for row in 0..rows {
            for col in 0..cols {
                let addr = base.wrapping_add((col + row * cols) as u16);
                let glyph = memory.peek(addr);
                self.paint_alpha_cell(fb, w, col * cell_w, row * cell_h, cell_w, cell_h, glyph);
            }
        }
    }

    fn paint_alpha_cell(
        &self,
        fb: &mut [u8],
        fb_w: u32,
        x0: u32,
        y0: u32,
        cw: u32,
        ch: u32,
        glyph: u8,
    ) {
        let semigraphics4 = glyph & 0x80 != 0;
        if semigraphics4 {
            let fg = (glyph >> 4) & 0x07;
            let pattern = glyph & 0x0F;
            self.paint_semigraphics_cell(fb, fb_w, x0, y0, cw, ch, fg, pattern);
            return;
        }
        let inverse = glyph & 0x40 != 0;
        let code = (glyph & 0x3F) as usize;
        let (fg, bg) = if inverse { (0u8, 15u8) } else { (15u8, 0u8) };
        let rows = &FONT[code];
        for (ry, bits) in rows.iter().enumerate() {
            let py = y0 + (ry as u32 * ch) / 8;
            for bit in 0..6u32 {
                let on = (bits >> (7 - bit)) & 1 != 0;
                let color = if on { fg } else { bg };
                let px = x0 + (bit * cw) / 6;
                self.put_pixel(fb, fb_w, px, py, color);
            }
        }
    }

    fn render_semigraphics(&self, memory: &Memory, fb: &mut [u8], w: u32, h: u32) {
        let base = self.base_addr();
        let cols = 32u32;
        let rows = 16u32;
        let cell_w = w / cols;
        let cell_h = h / rows;
        for row in 0..rows {
            for col in 0..cols {
                let addr = base.wrapping_add((col + row * cols) as u16);
                let cell = memory.peek(addr);
                let fg = (cell >> 4) & 0x07;
                let pattern = cell & 0x0F;
                self.paint_semigraphics_cell(
                    fb,
                    w,
                    col * cell_w,
                    row * cell_h,
                    cell_w,
                    cell_h,
                    fg,
                    pattern,
                );
            }
        }
    }

    fn paint_semigraphics_cell(
        &self,
        fb: &mut [u8],
        fb_w: u32,
        x0: u32,
        y0: u32,
        cw: u32,
        ch: u32,
        fg: u8,
        pattern: u8,
    ) {
        let color_base = if self.css { 8 } else { 0 };
        let color = color_base + (fg & 0x07).min(7);
        let bits = SEMIGRAPHICS_PATTERNS[(pattern & 0x0F) as usize];
        for quadrant in 0..4u32 {
            let on = (bits >> (3 - quadrant)) & 1 != 0;
            if !on {
                continue;
            }
            let qx = quadrant % 2;
            let qy = quadrant / 2;
            for py in (y0 + qy * ch / 2)..(y0 + (qy + 1) * ch / 2) {
                for px in (x0 + qx * cw / 2)..(x0 + (qx + 1) * cw / 2) {
                    self.put_pixel(fb, fb_w, px, py, color);
                }
            }
        }
    }

    /// C-variant graphics: 4 bytes-per-row-unit each contributing four
    /// 2-bit pixels (doubled horizontally in 6C, per §4.4).
    fn render_graphics_c(&self, memory: &Memory, fb: &mut [u8], w: u32, h: u32, doubled: bool) {
        let base = self.base_addr();
        let bytes_per_row = if doubled { w / 8 } else { w / 4 };
        let palette_base = if self.css { 8 } else { 0 };
        let mut addr = base;
        for y in 0..h {
            for b in 0..bytes_per_row {
                let byte = memory.peek(addr);
                addr = addr.wrapping_add(1);
                for px_pair in 0..4u32 {
                    let shift = 6 - px_pair * 2;
                    let pixel = (byte >> shift) & 0x03;
                    let color = palette_base + pixel;
                    let step = if doubled { 2 } else { 1 };
                    let x = (b * 4 + px_pair) * step;
                    for dx in 0..step {
                        self.put_pixel(fb, w, x + dx, y, color);
                    }
                }
            }
        }
    }

    /// R-variant graphics: each byte contributes eight 1-bit pixels (doubled
    /// horizontally in 3R, per §4.4 — 3R shares its 128px width with 1R/2R,
    /// so it must draw the same byte count per row at twice the pixel width).
    fn render_graphics_r(&self, memory: &Memory, fb: &mut [u8], w: u32, h: u32, doubled: bool) {
        let base = self.base_addr();
        let bytes_per_row = if doubled { w / 16 } else { w / 8 };
        let fg = if self.css { 10 } else { 2 }; // LightGreen/Green
        let bg = 0;
        let step = if doubled { 2 } else { 1 };
        let mut addr = base;
        for y in 0..h {
            for b in 0..bytes_per_row {
                let byte = memory.peek(addr);
                addr = addr.wrapping_add(1);
                for bit in 0..8u32 {
                    let on = (byte >> (7 - bit)) & 1 != 0;
                    let color = if on { fg } else { bg };
                    let x = (b * 8 + bit) * step;
                    for dx in 0..step {
                        self.put_pixel(fb, w, x + dx, y, color);
                    }
                }
            }
        }
    }

    fn put_pixel(&self, fb: &mut [u8], fb_w: u32, x: u32, y: u32, color: u8) {
        let idx = (y * fb_w + x) as usize;
        if idx < fb.len() {
            fb[idx] = color;
        }
    }
}

impl Default for Vdg {
    fn default() -> Self {
        Self::new()
    }
}
