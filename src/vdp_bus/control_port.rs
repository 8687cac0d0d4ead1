// Control-port command protocol.
//
// A command is 32 bits, written as two 16-bit words:
//
//   CD1 CD0 A13 ... A00      first word
//   CD5 CD4 CD3 CD2 ? ? A15 A14   second word (low byte)
//
// The low 14 address bits and CD1-CD0 are committed as soon as the first
// word arrives; the second word merges in the top two address bits and
// CD4-CD2, and its bit 7 (CD5) arms DMA. A pending command can be
// cancelled, but not rolled back, by any data-port access or a control-port
// read.

use crate::dma::DmaSource;

/// Data-port write destination, decoded from the code register. The match
/// arms are the exact CD bit patterns the hardware responds to; any other
/// value leaves the data port inert for writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    Vram,
    Cram,
    Vsram,
}

impl WriteTarget {
    pub fn decode(code: u8) -> Option<Self> {
        match code {
            0x04 => Some(WriteTarget::Vram),
            0x0C => Some(WriteTarget::Cram),
            0x14 => Some(WriteTarget::Vsram),
            _ => None,
        }
    }
}

/// Data-port read source. Reads use a different CD encoding than writes;
/// note that the cleared code register (0x00) is the VRAM-read pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSource {
    Vram,
    Cram,
    Vsram,
}

impl ReadSource {
    pub fn decode(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(ReadSource::Vram),
            0x20 => Some(ReadSource::Cram),
            0x10 => Some(ReadSource::Vsram),
            _ => None,
        }
    }
}

impl super::Vdp {
    /// Control-port write. Completing a command whose second word set the
    /// DMA bit starts the transfer immediately, except for fill mode, which
    /// waits for the next data-port write.
    pub fn submit_command(&mut self, word: u16, source: &mut impl DmaSource) {
        if self.command_pending {
            // second word: the top two address bits merge into the low 14
            // committed by the first word
            self.address = (self.address & 0x3FFF) | ((word & 0x0003) << 14);

            // CD4-CD2 merge without clearing bits already set
            self.code |= (word & 0x0070) as u8;

            self.dma_armed = (word & 0x0080) != 0;
            self.command_pending = false;

            if self.dma_armed {
                self.run_dma(source);
            }
        } else {
            // first word: low 14 address bits and CD1-CD0 replace outright
            self.address = (self.address & 0xC000) | (word & 0x3FFF);
            self.code = ((word & 0xC000) >> 12) as u8;
            self.dma_armed = false;
            self.pending_fill = None;
            self.command_pending = true;
        }
    }

    /// Called by the owning system on any data-port access or control-port
    /// read. The first word's effects stay committed; only the phase
    /// resets.
    pub fn cancel_pending_command(&mut self) {
        self.command_pending = false;
    }
}
