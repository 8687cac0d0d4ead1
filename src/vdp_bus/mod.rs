// VDP bus core: the bank store, the two-word command protocol, and the
// data-port engine. Rendering consumes the dirty bitmap from outside; the
// host CPU model drives the ports and answers DMA source reads.

pub mod banks;
pub mod control_port;
pub mod data_port;


pub use banks::{BankStore, DirtyFlags, DirtySummary};
pub use control_port::{ReadSource, WriteTarget};

use crate::dma::PendingFill;

/// The VDP port/memory core. Exclusively owned by the machine driving the
/// emulated bus; every operation runs to completion before returning.
#[derive(Debug)]
pub struct Vdp {
    pub store: BankStore,

    /// 16-bit cursor for all data-port accesses. The low 14 bits are
    /// committed by the first command word, the top two by the second.
    pub(crate) address: u16,
    /// Operation code register (the CD bits). Selects which bank the data
    /// port targets and in which direction; cleared by register writes.
    pub(crate) code: u8,
    /// False: the next control-port word starts a command. True: it
    /// completes one.
    pub(crate) command_pending: bool,
    /// Set by bit 7 of a completing command word, cleared by the next
    /// first word.
    pub(crate) dma_armed: bool,
    pub(crate) pending_fill: Option<PendingFill>,
}

impl Vdp {
    pub fn new() -> Self {
        Self {
            store: BankStore::new(),
            address: 0,
            code: 0,
            command_pending: false,
            dma_armed: false,
            pending_fill: None,
        }
    }

    /// Zero all banks and registers, mark every dirty bit, and drop any
    /// in-flight protocol state.
    pub fn reset(&mut self) {
        self.command_pending = false;
        self.code = 0;
        self.address = 0;
        self.dma_armed = false;
        self.pending_fill = None;
        self.store.reset();
    }

    /// Register-port write. The store is unconditional; writing any VDP
    /// register also clears the code register, so the data port stays inert
    /// until a new command arrives.
    pub fn write_register(&mut self, index: u8, value: u8) {
        self.store.write_reg(index, value);
        self.code = 0;
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn command_pending(&self) -> bool {
        self.command_pending
    }

    pub fn dma_armed(&self) -> bool {
        self.dma_armed
    }
}

impl Default for Vdp {
    fn default() -> Self {
        Self::new()
    }
}
