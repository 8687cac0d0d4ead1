use alloc::boxed::Box;
use bit_field::BitField;
use bitfield::bitfield;

pub const VRAM_SIZE: usize = 0x10000;
pub const CRAM_SIZE: usize = 0x80;
pub const VSRAM_SIZE: usize = 0x80;
pub const REG_COUNT: usize = 0x20;

/// Dirty resolution for VRAM: one bit covers this many bytes.
pub const VRAM_DIRTY_BLOCK: usize = 0x100;

pub const REG_AUTO_INCREMENT: usize = 0x0F;
pub const REG_DMA_LEN_L: usize = 0x13;
pub const REG_DMA_LEN_H: usize = 0x14;
pub const REG_DMA_SRC_L: usize = 0x15;
pub const REG_DMA_SRC_M: usize = 0x16;
pub const REG_DMA_SRC_H: usize = 0x17;

bitfield! {
    /// High byte of the DMA source address (register 0x17). Bits 7-6 select
    /// the transfer mode; bits 6-0 feed the top of the 23-bit source
    /// address. Bit 6 belongs to both fields, exactly as the hardware
    /// decodes it.
    pub struct DmaSourceHigh(u8);
    impl Debug;
    pub u8, mode, _: 7, 6;
    pub u8, addr_high, _: 6, 0;
}

/// One "changed since the renderer last looked" flag per region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtySummary {
    pub vram: bool,
    pub cram: bool,
    pub vsram: bool,
    pub reg: bool,
}

/// Multi-resolution change tracking. The write primitives in [`BankStore`]
/// only ever set bits here; clearing them is the renderer's job.
#[derive(Debug)]
pub struct DirtyFlags {
    /// One bit per 256-byte VRAM block.
    pub vram: [u8; VRAM_SIZE / VRAM_DIRTY_BLOCK / 8],
    /// One bit per CRAM byte.
    pub cram: [u8; CRAM_SIZE / 8],
    /// One bit per register.
    pub reg: [u8; REG_COUNT / 8],
    pub summary: DirtySummary,
}

impl DirtyFlags {
    fn all_set() -> Self {
        Self {
            vram: [0xFF; VRAM_SIZE / VRAM_DIRTY_BLOCK / 8],
            cram: [0xFF; CRAM_SIZE / 8],
            reg: [0xFF; REG_COUNT / 8],
            summary: DirtySummary {
                vram: true,
                cram: true,
                vsram: true,
                reg: true,
            },
        }
    }

    /// Mark everything as changed, forcing a full external redraw.
    pub fn set_all(&mut self) {
        *self = Self::all_set();
    }

    /// Renderer-side acknowledgement: forget all recorded changes.
    pub fn clear(&mut self) {
        self.vram.fill(0);
        self.cram.fill(0);
        self.reg.fill(0);
        self.summary = DirtySummary::default();
    }

    pub fn vram_block(&self, block: usize) -> bool {
        self.vram[(block >> 3) & 0x1F].get_bit(block & 7)
    }

    pub fn cram_byte(&self, addr: usize) -> bool {
        self.cram[(addr >> 3) & 0x0F].get_bit(addr & 7)
    }

    pub fn reg_byte(&self, index: usize) -> bool {
        self.reg[(index >> 3) & 0x03].get_bit(index & 7)
    }

    pub fn mark_all_vram(&mut self) {
        self.vram.fill(0xFF);
        self.summary.vram = true;
    }

    pub fn mark_all_cram(&mut self) {
        self.cram.fill(0xFF);
        self.summary.cram = true;
    }

    fn mark_vram_block(&mut self, block: usize) {
        self.vram[(block >> 3) & 0x1F].set_bit(block & 7, true);
        self.summary.vram = true;
    }

    fn mark_cram_byte(&mut self, addr: usize) {
        self.cram[(addr >> 3) & 0x0F].set_bit(addr & 7, true);
        self.summary.cram = true;
    }

    fn mark_reg_byte(&mut self, index: usize) {
        self.reg[(index >> 3) & 0x03].set_bit(index & 7, true);
        self.summary.reg = true;
    }
}

/// The three memory banks plus the register file, with their dirty bitmap.
///
/// All mutation funnels through the `poke_*`/`write_reg` primitives so the
/// dirty bitmap can never go stale. A byte-identical write is a complete
/// no-op: no store, no dirty bit.
#[derive(Debug)]
pub struct BankStore {
    pub vram: Box<[u8; VRAM_SIZE]>,
    pub cram: [u8; CRAM_SIZE],
    pub vsram: [u8; VSRAM_SIZE],
    pub reg: [u8; REG_COUNT],
    pub dirty: DirtyFlags,
}

impl BankStore {
    pub fn new() -> Self {
        Self {
            // heap allocation to keep the owning struct small
            vram: Box::new([0; VRAM_SIZE]),
            cram: [0; CRAM_SIZE],
            vsram: [0; VSRAM_SIZE],
            reg: [0; REG_COUNT],
            dirty: DirtyFlags::all_set(),
        }
    }

    pub fn reset(&mut self) {
        self.vram.fill(0);
        self.cram.fill(0);
        self.vsram.fill(0);
        self.reg.fill(0);
        self.dirty.set_all();
    }

    pub fn poke_vram(&mut self, addr: u16, d: u8) {
        let addr = addr as usize;
        if self.vram[addr] != d {
            self.dirty.mark_vram_block(addr / VRAM_DIRTY_BLOCK);
            self.vram[addr] = d;
        }
    }

    pub fn poke_cram(&mut self, addr: u16, d: u8) {
        let addr = (addr & 0x7F) as usize;
        if self.cram[addr] != d {
            self.dirty.mark_cram_byte(addr);
            self.cram[addr] = d;
        }
    }

    /// VSRAM changes are only tracked at whole-bank resolution.
    pub fn poke_vsram(&mut self, addr: u16, d: u8) {
        let addr = (addr & 0x7F) as usize;
        if self.vsram[addr] != d {
            self.dirty.summary.vsram = true;
            self.vsram[addr] = d;
        }
    }

    /// Store a register byte. The store is unconditional; the dirty bit is
    /// only set when the value actually changed.
    pub fn write_reg(&mut self, index: u8, d: u8) {
        let index = (index & 0x1F) as usize;
        if self.reg[index] != d {
            self.dirty.mark_reg_byte(index);
        }
        self.reg[index] = d;
    }

    pub fn auto_increment(&self) -> u16 {
        self.reg[REG_AUTO_INCREMENT] as u16
    }

    /// DMA length in words, from registers 0x14:0x13.
    pub fn dma_len(&self) -> u16 {
        ((self.reg[REG_DMA_LEN_H] as u16) << 8) | self.reg[REG_DMA_LEN_L] as u16
    }

    /// 23-bit DMA source byte address, from registers 0x17:0x16:0x15.
    pub fn dma_addr(&self) -> u32 {
        let high = DmaSourceHigh(self.reg[REG_DMA_SRC_H]);
        ((high.addr_high() as u32) << 17)
            | ((self.reg[REG_DMA_SRC_M] as u32) << 9)
            | ((self.reg[REG_DMA_SRC_L] as u32) << 1)
    }

    pub fn dma_mode(&self) -> u8 {
        DmaSourceHigh(self.reg[REG_DMA_SRC_H]).mode()
    }
}

impl Default for BankStore {
    fn default() -> Self {
        Self::new()
    }
}
