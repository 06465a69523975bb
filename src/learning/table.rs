use super::tally::Tally;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::io::Read;
use std::io::Write;
use std::marker::PhantomData;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

/// A value that fits in one atomic 32-bit table slot,
/// whose all-zero bit pattern is the untrained value.
pub trait Slot: Copy + Default + PartialEq + Send + Sync + 'static {
    fn pack(self) -> u32;
    fn unpack(bits: u32) -> Self;
    fn write<W: Write>(self, writer: &mut W) -> std::io::Result<()>;
    fn read<R: Read>(reader: &mut R) -> std::io::Result<Self>;
}

impl Slot for f32 {
    fn pack(self) -> u32 {
        self.to_bits()
    }
    fn unpack(bits: u32) -> Self {
        f32::from_bits(bits)
    }
    fn write<W: Write>(self, writer: &mut W) -> std::io::Result<()> {
        writer.write_f32::<BE>(self)
    }
    fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        reader.read_f32::<BE>()
    }
}

impl Slot for Tally {
    fn pack(self) -> u32 {
        u32::from(self)
    }
    fn unpack(bits: u32) -> Self {
        Tally::from(bits)
    }
    fn write<W: Write>(self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u16::<BE>(self.sum())?;
        writer.write_u16::<BE>(self.count())
    }
    fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let sum = reader.read_u16::<BE>()?;
        let count = reader.read_u16::<BE>()?;
        Ok(Tally::new(sum, count))
    }
}

/// A flat array of values shared by every training worker.
///
/// Each slot is an `AtomicU32` and every read-modify-write is a
/// compare-and-swap loop, so concurrent updates to the same slot are
/// serialized rather than lost. Bootstrap reads taken before an update
/// may still be stale, which the learners tolerate.
///
/// The backing memory is requested zeroed, so pages of a full-size
/// table are only committed once a game actually visits them.
pub struct Table<V: Slot> {
    slots: Vec<AtomicU32>,
    value: PhantomData<V>,
}

const _: () = assert!(std::mem::size_of::<AtomicU32>() == std::mem::size_of::<u32>());
const _: () = assert!(std::mem::align_of::<AtomicU32>() == std::mem::align_of::<u32>());

impl<V: Slot> Table<V> {
    pub fn new(len: usize) -> Self {
        let mut zeros = std::mem::ManuallyDrop::new(vec![0u32; len]);
        let (ptr, len, cap) = (zeros.as_mut_ptr(), zeros.len(), zeros.capacity());
        // SAFETY: AtomicU32 has the size, alignment, and bit validity of u32,
        // and the allocation is handed over whole without being dropped twice.
        let slots = unsafe { Vec::from_raw_parts(ptr as *mut AtomicU32, len, cap) };
        Self {
            slots,
            value: PhantomData,
        }
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub fn get(&self, i: usize) -> V {
        V::unpack(self.slots[i].load(Ordering::Relaxed))
    }
    pub fn set(&self, i: usize, value: V) {
        self.slots[i].store(value.pack(), Ordering::Relaxed);
    }
    /// atomically replaces the value at `i` with `f` of its current value
    pub fn update<F>(&self, i: usize, f: F)
    where
        F: Fn(V) -> V,
    {
        let _ = self.slots[i].fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
            Some(f(V::unpack(bits)).pack())
        });
    }
    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.slots
            .iter()
            .map(|slot| V::unpack(slot.load(Ordering::Relaxed)))
    }
    /// number of slots that have moved off the untrained value
    pub fn visited(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.load(Ordering::Relaxed) != 0)
            .count()
    }
}
