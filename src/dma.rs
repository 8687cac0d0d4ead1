// DMA engine. Modes 0/1 copy from the external bus, mode 3 copies out of
// VRAM itself, and mode 2 latches a fill that the next data-port write
// supplies the pattern for. All destination writes reuse the data-port
// word path, so the odd-address VRAM byte swap, dirty tracking, and
// auto-increment behave exactly like straight port writes.

use log::debug;

use crate::vdp_bus::Vdp;

/// External byte source for DMA modes 0/1. The system bus answers
/// synchronously; the core never retries or fails a source read.
pub trait DmaSource {
    fn read_byte(&mut self, address: u32) -> u8;
}

/// A mode-2 fill latched at command completion, waiting for the data-port
/// write that supplies the fill value. Stays latched until the next first
/// command word, so each write while armed re-runs the fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFill {
    /// Repetition count, captured from the length registers when the
    /// command completed.
    pub length: u16,
}

impl Vdp {
    /// Run the transfer for a just-completed command with the DMA bit set.
    /// A zero length is a valid no-op in every mode.
    pub(crate) fn run_dma(&mut self, source: &mut impl DmaSource) {
        let len = self.store.dma_len();
        let mut src = self.store.dma_addr();

        match self.store.dma_mode() {
            0 | 1 => {
                debug!(
                    "dma: copy {} words from bus {:#08X} to {:#06X}",
                    len, src, self.address
                );
                for _ in 0..len {
                    let hi = source.read_byte(src);
                    let lo = source.read_byte(src.wrapping_add(1));
                    src = src.wrapping_add(2);
                    self.put_word(((hi as u16) << 8) | lo as u16);
                }
            }
            2 => {
                // no transfer yet; the next data-port write triggers it
                self.pending_fill = Some(PendingFill { length: len });
                debug!("dma: fill armed, {} words", len);
            }
            3 => {
                debug!(
                    "dma: copy {} words from vram {:#06X} to {:#06X}",
                    len,
                    src & 0xFFFF,
                    self.address
                );
                for _ in 0..len {
                    let hi = self.store.vram[(src & 0xFFFF) as usize];
                    let lo = self.store.vram[(src.wrapping_add(1) & 0xFFFF) as usize];
                    src = src.wrapping_add(2);
                    self.put_word(((hi as u16) << 8) | lo as u16);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn dma_fill_word(&mut self, fill: PendingFill, value: u16) {
        debug!("dma: filling {} words with {:#06X}", fill.length, value);
        for _ in 0..fill.length {
            self.put_word(value);
        }
    }

    pub(crate) fn dma_fill_byte(&mut self, fill: PendingFill, value: u8) {
        debug!("dma: filling {} bytes with {:#04X}", fill.length, value);
        for _ in 0..fill.length {
            self.put_byte(value);
        }
    }
}
