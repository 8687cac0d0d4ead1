//! Deliberate-corruption debug utilities.
//!
//! None of this is hardware behavior. Every mutation goes through the
//! core's public write primitives, so dirty tracking and the code-register
//! side effects stay exactly as they are for legitimate traffic.

use log::info;
use rand::Rng;

use crate::vdp_bus::banks::{CRAM_SIZE, VRAM_SIZE};
use crate::vdp_bus::Vdp;

const SPRITE_COUNT: u16 = 80;
const SPRITE_ENTRY_SIZE: u16 = 8;

/// Move all VRAM contents one byte toward lower addresses.
pub fn shift_vram_up(vdp: &mut Vdp) {
    info!("shifting vram up by 1 byte");
    for i in 0..VRAM_SIZE - 1 {
        let d = vdp.store.vram[i + 1];
        vdp.store.poke_vram(i as u16, d);
    }
}

/// Move all VRAM contents one byte toward higher addresses.
pub fn shift_vram_down(vdp: &mut Vdp) {
    info!("shifting vram down by 1 byte");
    for i in (1..VRAM_SIZE).rev() {
        let d = vdp.store.vram[i - 1];
        vdp.store.poke_vram(i as u16, d);
    }
}

/// Shift VRAM down by a random 0-63 bytes and zero the gap.
pub fn shift_vram_down_random<R: Rng>(vdp: &mut Vdp, rng: &mut R) {
    let shift = rng.gen_range(0..64usize);
    info!("shifting vram down by {} bytes", shift);
    for i in (shift..VRAM_SIZE).rev() {
        let d = vdp.store.vram[i - shift];
        vdp.store.poke_vram(i as u16, d);
    }
    for i in 0..shift {
        vdp.store.poke_vram(i as u16, 0);
    }
}

/// Randomly swap CRAM entries. Color swaps without touching tile data.
pub fn randomize_cram<R: Rng>(vdp: &mut Vdp, rng: &mut R) {
    info!("randomizing cram");
    for i in 0..CRAM_SIZE as u16 {
        let j = rng.gen_range(0..CRAM_SIZE as u16);
        let a = vdp.store.cram[i as usize];
        let b = vdp.store.cram[j as usize];
        vdp.store.poke_cram(i, b);
        vdp.store.poke_cram(j, a);
    }
    vdp.store.dirty.mark_all_cram();
}

/// Scramble the sprite attribute table: random positions, sizes, broken
/// link chains, swapped and rewritten entries. Occasionally relocates the
/// table itself through the sprite-base register.
pub fn scramble_sprite_table<R: Rng>(vdp: &mut Vdp, rng: &mut R) {
    // sprite attribute table base, in units of 0x200 (register 5)
    let base = ((vdp.store.reg[5] & 0x7F) as u16) << 9;
    info!("scrambling sprite table at {:#06X}", base);

    for _ in 0..SPRITE_COUNT {
        let sprite = rng.gen_range(0..SPRITE_COUNT);
        let entry = base.wrapping_add(sprite * SPRITE_ENTRY_SIZE);

        match rng.gen_range(0..6u8) {
            0 => {
                // fling the sprite to a random vertical position
                let y = rng.gen_range(0..1024u16);
                vdp.store.poke_vram(entry, (y >> 8) as u8);
                vdp.store.poke_vram(entry.wrapping_add(1), y as u8);
            }
            1 => {
                // random size and link, breaks the sprite chain
                vdp.store.poke_vram(entry.wrapping_add(2), rng.gen::<u8>());
                vdp.store.poke_vram(entry.wrapping_add(3), rng.gen::<u8>());
            }
            2 => {
                // random tile pattern and attributes
                vdp.store.poke_vram(entry.wrapping_add(4), rng.gen::<u8>());
                vdp.store.poke_vram(entry.wrapping_add(5), rng.gen::<u8>());
            }
            3 => {
                // random horizontal position
                let x = rng.gen_range(0..1024u16);
                vdp.store.poke_vram(entry.wrapping_add(6), (x >> 8) as u8);
                vdp.store.poke_vram(entry.wrapping_add(7), x as u8);
            }
            4 => {
                // swap with another whole entry
                let other = base.wrapping_add(rng.gen_range(0..SPRITE_COUNT) * SPRITE_ENTRY_SIZE);
                for off in 0..SPRITE_ENTRY_SIZE {
                    let a = entry.wrapping_add(off);
                    let b = other.wrapping_add(off);
                    let va = vdp.store.vram[a as usize];
                    let vb = vdp.store.vram[b as usize];
                    vdp.store.poke_vram(a, vb);
                    vdp.store.poke_vram(b, va);
                }
            }
            _ => {
                // rewrite the whole entry
                for off in 0..SPRITE_ENTRY_SIZE {
                    vdp.store.poke_vram(entry.wrapping_add(off), rng.gen::<u8>());
                }
            }
        }
    }

    // sometimes scramble the table base register too, keeping bit 7
    if rng.gen_range(0..10u8) == 0 {
        let new_base = rng.gen_range(0..128u8);
        let keep = vdp.store.reg[5] & 0x80;
        vdp.write_register(5, keep | new_base);
        info!("also scrambled the sprite table base register");
    }

    vdp.store.dirty.mark_all_vram();
}

/// Corrupt a single random VRAM byte.
pub fn corrupt_vram_byte<R: Rng>(vdp: &mut Vdp, rng: &mut R) {
    let addr = rng.gen::<u16>();
    let old = vdp.store.vram[addr as usize];
    let new = rng.gen::<u8>();
    vdp.store.poke_vram(addr, new);
    info!(
        "corrupted vram at {:#06X}: {:#04X} -> {:#04X}",
        addr, old, new
    );
}

/// Nudge one of the scroll registers (0-3) by a small random amount. Goes
/// through the register port, so the code register is cleared like any
/// register write.
pub fn fuzz_scroll_register<R: Rng>(vdp: &mut Vdp, rng: &mut R) {
    let index = rng.gen_range(0..4u8);
    let delta = rng.gen_range(-10..=10i16) as u8;
    let old = vdp.store.reg[index as usize];
    let new = old.wrapping_add(delta);
    vdp.write_register(index, new);
    info!(
        "fuzzed scroll register {}: {:#04X} -> {:#04X}",
        index, old, new
    );
}

/// Bitwise-invert all of VRAM.
pub fn invert_vram(vdp: &mut Vdp) {
    info!("inverting vram contents");
    for addr in 0..VRAM_SIZE {
        let d = vdp.store.vram[addr];
        vdp.store.poke_vram(addr as u16, !d);
    }
}
