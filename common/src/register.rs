//! Register cells.
//!
//! A hardware register is modelled as a cell holding one unsigned word.
//! Plain integers act as in-memory cells (handy for simulation and tests),
//! while [`Volatile`] is overlaid on a memory-mapped register and performs
//! every access with volatile loads and stores.

use core::cell::UnsafeCell;
use core::fmt;
use core::ops::{BitAnd, BitOr, Not, Shl, Shr};
use core::ptr::{read_volatile, write_volatile};

/// Unsigned integer type usable as a register word.
pub trait Word:
    Copy
    + Eq
    + fmt::Debug
    + fmt::Binary
    + Into<u64>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// Width of the word in bits.
    const BITS: u32;
    /// All bits clear.
    const ZERO: Self;
    /// Only bit 0 set.
    const ONE: Self;
    /// All bits set.
    const MAX: Self;

    /// Word with exactly `count` low bits set.
    ///
    /// `count` saturates at [`Word::BITS`], so a full-width mask never
    /// overflows the shift.
    #[inline]
    fn low_mask(count: u32) -> Self {
        if count >= Self::BITS {
            Self::MAX
        } else {
            !(Self::MAX << count)
        }
    }

    /// Word with only bit `n` set. `n` must be below [`Word::BITS`].
    #[inline]
    fn bit(n: u32) -> Self {
        Self::ONE << n
    }

    /// Check whether bit `n` is set. `n` must be below [`Word::BITS`].
    #[inline]
    fn is_set(self, n: u32) -> bool {
        (self >> n) & Self::ONE != Self::ZERO
    }
}

/// A single register cell.
///
/// Reads take `&self` so that read-only registers can be shared; writes
/// take `&mut self`, which gives each writer exclusive access for as long
/// as it holds the cell.
pub trait Register {
    /// Word type stored in the register.
    type Word: Word;

    /// Load the current register value.
    fn read(&self) -> Self::Word;

    /// Store a new register value.
    fn write(&mut self, value: Self::Word);

    /// Read the register, transform the value and write it back.
    ///
    /// This is a plain read followed by a write. It is not atomic: anything
    /// that touches the same register in between (an interrupt handler, for
    /// example) has its update overwritten. Callers sharing a register must
    /// serialize access themselves.
    #[inline]
    fn modify<F>(&mut self, f: F)
    where
        F: FnOnce(Self::Word) -> Self::Word,
    {
        let value = self.read();
        self.write(f(value));
    }
}

macro_rules! impl_word {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Word for $ty {
                const BITS: u32 = <$ty>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$ty>::MAX;
            }

            impl Register for $ty {
                type Word = $ty;

                #[inline]
                fn read(&self) -> $ty {
                    *self
                }

                #[inline]
                fn write(&mut self, value: $ty) {
                    *self = value;
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64);

/// Memory-mapped register cell.
///
/// Every access goes through [`read_volatile`] / [`write_volatile`], so the
/// compiler never caches, merges or elides register traffic.
#[repr(transparent)]
pub struct Volatile<W: Word> {
    value: UnsafeCell<W>,
}

impl<W: Word> Volatile<W> {
    /// Create a cell backed by ordinary memory.
    pub const fn new(value: W) -> Self {
        Self {
            value: UnsafeCell::new(value),
        }
    }

    /// View the register at `addr` as a read-only cell.
    ///
    /// # Safety
    ///
    /// `addr` must be a valid, suitably aligned and mapped register address
    /// for a `W`-sized access, and must stay valid for `'a`.
    pub unsafe fn from_addr<'a>(addr: usize) -> &'a Self {
        // SAFETY: validity and alignment are guaranteed by the caller
        unsafe { &*(addr as *const Self) }
    }

    /// View the register at `addr` as a writable cell.
    ///
    /// # Safety
    ///
    /// Same requirements as [`Volatile::from_addr`]. In addition, no other
    /// reference to the same register may be alive for `'a`.
    pub unsafe fn from_addr_mut<'a>(addr: usize) -> &'a mut Self {
        // SAFETY: validity, alignment and uniqueness are guaranteed by the caller
        unsafe { &mut *(addr as *mut Self) }
    }
}

impl<W: Word> Register for Volatile<W> {
    type Word = W;

    #[inline]
    fn read(&self) -> W {
        // SAFETY: the cell always points at a live, aligned W
        unsafe { read_volatile(self.value.get()) }
    }

    #[inline]
    fn write(&mut self, value: W) {
        // SAFETY: `&mut self` guarantees exclusive access to the cell
        unsafe { write_volatile(self.value.get(), value) }
    }
}

impl<W: Word> fmt::Debug for Volatile<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Volatile({:#b})", self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_mask_covers_requested_bits() {
        assert_eq!(u8::low_mask(0), 0);
        assert_eq!(u8::low_mask(1), 0b1);
        assert_eq!(u8::low_mask(5), 0b1_1111);
        assert_eq!(u8::low_mask(8), 0xFF);
        assert_eq!(u16::low_mask(12), 0x0FFF);
        assert_eq!(u32::low_mask(32), u32::MAX);
        assert_eq!(u64::low_mask(64), u64::MAX);
        assert_eq!(u64::low_mask(63), u64::MAX >> 1);
    }

    #[test]
    fn low_mask_saturates_past_width() {
        assert_eq!(u8::low_mask(9), 0xFF);
        assert_eq!(u16::low_mask(100), u16::MAX);
    }

    #[test]
    fn bit_helpers() {
        assert_eq!(u8::bit(0), 0b1);
        assert_eq!(u8::bit(7), 0b1000_0000);
        assert!(0b0100u8.is_set(2));
        assert!(!0b0100u8.is_set(1));
        assert!(u32::MAX.is_set(31));
    }

    #[test]
    fn plain_cell_read_write_modify() {
        let mut reg: u16 = 0x00F0;
        assert_eq!(reg.read(), 0x00F0);

        reg.write(0x1234);
        assert_eq!(reg, 0x1234);

        reg.modify(|v| v | 0x8000);
        assert_eq!(reg, 0x9234);
    }

    #[test]
    fn volatile_cell_read_write_modify() {
        let mut reg = Volatile::new(0b1010_0000u8);
        assert_eq!(reg.read(), 0b1010_0000);

        reg.write(0b0000_0011);
        assert_eq!(reg.read(), 0b0000_0011);

        reg.modify(|v| v << 2);
        assert_eq!(reg.read(), 0b0000_1100);
    }

    #[test]
    fn volatile_overlay_on_address() {
        let mut backing: u32 = 0xDEAD_0000;
        let addr = &mut backing as *mut u32 as usize;

        {
            // SAFETY: `backing` is a live, aligned u32 with no other borrows
            let reg = unsafe { Volatile::<u32>::from_addr_mut(addr) };
            reg.modify(|v| v | 0xBEEF);
        }

        // SAFETY: as above, read-only view
        let reg = unsafe { Volatile::<u32>::from_addr(addr) };
        assert_eq!(reg.read(), 0xDEAD_BEEF);
        assert_eq!(backing, 0xDEAD_BEEF);
    }
}
