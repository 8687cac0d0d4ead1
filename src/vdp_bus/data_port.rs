// Data-port engine: masked, granularity-aware port reads and writes with
// address auto-increment. All stores go through the BankStore poke
// primitives, the single point of dirty-bitmap maintenance.

use super::control_port::{ReadSource, WriteTarget};

impl super::Vdp {
    /// Data-port word write. An armed fill consumes the value as the fill
    /// pattern instead of storing it once; after a completed transfer
    /// command (modes 0/1/3) writes are swallowed until the next command.
    pub fn port_write_word(&mut self, value: u16) {
        if let Some(fill) = self.pending_fill {
            self.dma_fill_word(fill, value);
            return;
        }
        if self.dma_armed {
            return;
        }
        self.put_word(value);
    }

    /// Data-port byte write; same fill/armed interception as word writes.
    pub fn port_write_byte(&mut self, value: u8) {
        if let Some(fill) = self.pending_fill {
            self.dma_fill_byte(fill, value);
            return;
        }
        if self.dma_armed {
            return;
        }
        self.put_byte(value);
    }

    /// Write one word at the cursor, then auto-increment. Shared by the
    /// port path and the DMA engine.
    pub(crate) fn put_word(&mut self, value: u16) {
        match WriteTarget::decode(self.code) {
            Some(WriteTarget::Vram) => {
                if self.address & 1 != 0 {
                    // odd boundary: the hardware stores the low byte first
                    self.store.poke_vram(self.address, value as u8);
                    self.store
                        .poke_vram(self.address.wrapping_add(1), (value >> 8) as u8);
                } else {
                    self.store.poke_vram(self.address, (value >> 8) as u8);
                    self.store
                        .poke_vram(self.address.wrapping_add(1), value as u8);
                }
            }
            Some(WriteTarget::Cram) => {
                self.store.poke_cram(self.address, (value >> 8) as u8);
                self.store
                    .poke_cram(self.address.wrapping_add(1), value as u8);
            }
            Some(WriteTarget::Vsram) => {
                self.store.poke_vsram(self.address, (value >> 8) as u8);
                self.store
                    .poke_vsram(self.address.wrapping_add(1), value as u8);
            }
            None => {}
        }
        self.advance_cursor();
    }

    pub(crate) fn put_byte(&mut self, value: u8) {
        match WriteTarget::decode(self.code) {
            Some(WriteTarget::Vram) => self.store.poke_vram(self.address, value),
            Some(WriteTarget::Cram) => self.store.poke_cram(self.address, value),
            Some(WriteTarget::Vsram) => self.store.poke_vsram(self.address, value),
            None => {}
        }
        self.advance_cursor();
    }

    /// Data-port word read, big-endian from the cursor. Never touches the
    /// dirty bitmap. An undecodable source reads as zero; the cursor still
    /// advances.
    pub fn port_read_word(&mut self) -> u16 {
        let result = match ReadSource::decode(self.code) {
            Some(ReadSource::Vram) => {
                let hi = self.store.vram[self.address as usize];
                let lo = self.store.vram[self.address.wrapping_add(1) as usize];
                ((hi as u16) << 8) | lo as u16
            }
            Some(ReadSource::Cram) => {
                let hi = self.store.cram[(self.address & 0x7F) as usize];
                let lo = self.store.cram[(self.address.wrapping_add(1) & 0x7F) as usize];
                ((hi as u16) << 8) | lo as u16
            }
            Some(ReadSource::Vsram) => {
                let hi = self.store.vsram[(self.address & 0x7F) as usize];
                let lo = self.store.vsram[(self.address.wrapping_add(1) & 0x7F) as usize];
                ((hi as u16) << 8) | lo as u16
            }
            None => 0,
        };
        self.advance_cursor();
        result
    }

    pub fn port_read_byte(&mut self) -> u8 {
        let result = match ReadSource::decode(self.code) {
            Some(ReadSource::Vram) => self.store.vram[self.address as usize],
            Some(ReadSource::Cram) => self.store.cram[(self.address & 0x7F) as usize],
            Some(ReadSource::Vsram) => self.store.vsram[(self.address & 0x7F) as usize],
            None => 0,
        };
        self.advance_cursor();
        result
    }

    fn advance_cursor(&mut self) {
        self.address = self.address.wrapping_add(self.store.auto_increment());
    }
}
