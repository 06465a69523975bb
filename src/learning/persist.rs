use super::rates::Rates;
use super::table::Slot;
use super::table::Table;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

/// Format version written in every weights header.
pub const VERSION: u32 = 2;

/// version, alpha, gamma, length
const HEADER_BYTES: u64 = 4 + 4 + 4 + 8;
/// every slot kind is stored in its packed 32-bit width
const SLOT_BYTES: u64 = 4;

/// Errors raised while reading or writing a weights file.
#[derive(Debug)]
pub enum PersistError {
    /// no file at the path; callers usually start fresh
    Missing,
    /// the header names a format version we do not read
    Version(u32),
    /// the header names a table length other than ours
    Length(u64),
    Io(std::io::Error),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "weights file not found"),
            Self::Version(v) => write!(f, "cannot load weights version {} (expected {})", v, VERSION),
            Self::Length(n) => write!(f, "cannot load weights of length {}", n),
            Self::Io(e) => write!(f, "weights i/o: {}", e),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::Missing,
            _ => Self::Io(e),
        }
    }
}

/// logs roughly once per percent of `total`
fn progress(verb: &str, i: usize, total: usize) {
    let step = (total / 100).max(1);
    if i % step == 0 {
        log::debug!("{:<12}{:>3}%", verb, i * 100 / total.max(1));
    }
}

/// Writes the header `{version, alpha, gamma, length}` and then every
/// slot of every table in order, all big-endian.
pub fn save<V: Slot>(path: &Path, rates: &Rates, tables: &[&Table<V>]) -> Result<(), PersistError> {
    log::info!("{:<32}{:<32}", "saving      weights", path.display());
    let total = tables.iter().map(|t| t.len()).sum::<usize>();
    let ref mut writer = BufWriter::new(File::create(path)?);
    writer.write_u32::<BE>(VERSION)?;
    writer.write_f32::<BE>(rates.alpha())?;
    writer.write_f32::<BE>(rates.gamma())?;
    writer.write_u64::<BE>(total as u64)?;
    for (i, value) in tables.iter().flat_map(|t| t.values()).enumerate() {
        progress("saving", i, total);
        value.write(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a file written by [`save`] into tables of matching total length,
/// restoring the learning rate and discount from its header.
///
/// The header and the file size are checked before any slot is written,
/// so a truncated file leaves the tables and rates untouched. A device
/// error in the middle of the body can still leave the tables partly
/// overwritten; the rates are only restored once every slot is read.
pub fn load<V: Slot>(path: &Path, rates: &Rates, tables: &[&Table<V>]) -> Result<(), PersistError> {
    log::info!("{:<32}{:<32}", "loading     weights", path.display());
    let total = tables.iter().map(|t| t.len()).sum::<usize>();
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    let ref mut reader = BufReader::new(file);
    let version = reader.read_u32::<BE>()?;
    if version != VERSION {
        return Err(PersistError::Version(version));
    }
    let alpha = reader.read_f32::<BE>()?;
    let gamma = reader.read_f32::<BE>()?;
    let length = reader.read_u64::<BE>()?;
    if length != total as u64 {
        return Err(PersistError::Length(length));
    }
    let stored = size.saturating_sub(HEADER_BYTES) / SLOT_BYTES;
    if stored != length {
        return Err(PersistError::Length(stored));
    }
    let mut i = 0;
    for table in tables {
        for j in 0..table.len() {
            progress("loading", i, total);
            table.set(j, V::read(reader)?);
            i += 1;
        }
    }
    rates.set_alpha(alpha);
    rates.set_gamma(gamma);
    Ok(())
}
