//! Memory measurement.
//!
//! [`ProcMeminfo`] reads the Linux `/proc/meminfo` table. Other sources can
//! implement [`MemoryProbe`].

use std::path::{Path, PathBuf};

use beacon_core::{Error, Result};

/// Bytes of memory at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemorySnapshot {
    /// Total memory in bytes.
    pub total: u64,
    /// Memory available for new allocations, in bytes.
    pub free: u64,
}

impl MemorySnapshot {
    /// `total - free`, never negative.
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }
}

/// Source of memory measurements.
pub trait MemoryProbe: Send + Sync {
    /// Take a snapshot.
    fn snapshot(&self) -> Result<MemorySnapshot>;
}

/// Reads `MemTotal` and `MemAvailable` (or `MemFree`) from a meminfo file.
#[derive(Clone, Debug)]
pub struct ProcMeminfo {
    path: PathBuf,
}

impl ProcMeminfo {
    /// Location on Linux.
    pub const DEFAULT_PATH: &'static str = "/proc/meminfo";

    /// Probe reading [`Self::DEFAULT_PATH`].
    pub fn new() -> Self {
        Self::with_path(Self::DEFAULT_PATH)
    }

    /// Probe reading an arbitrary meminfo-formatted file.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File this probe reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ProcMeminfo {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcMeminfo {
    fn snapshot(&self) -> Result<MemorySnapshot> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| Error::io_with_path(e, &self.path))?;
        parse_meminfo(&text)
    }
}

/// Parse meminfo text into a snapshot.
///
/// Values carry a `kB` unit in practice; unitless values are taken as bytes.
pub fn parse_meminfo(text: &str) -> Result<MemorySnapshot> {
    let mut total = None;
    let mut available = None;
    let mut free = None;

    for line in text.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key.trim() {
            "MemTotal" => &mut total,
            "MemAvailable" => &mut available,
            "MemFree" => &mut free,
            _ => continue,
        };
        *slot = Some(parse_amount(key, rest)?);
    }

    let total = total.ok_or_else(|| Error::probe("MemTotal not reported"))?;
    if total == 0 {
        return Err(Error::probe("MemTotal reported as zero"));
    }
    let free = available
        .or(free)
        .ok_or_else(|| Error::probe("neither MemAvailable nor MemFree reported"))?;

    Ok(MemorySnapshot {
        total,
        free: free.min(total),
    })
}

fn parse_amount(key: &str, rest: &str) -> Result<u64> {
    let mut parts = rest.split_whitespace();
    let value: u64 = parts
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| Error::probe(format!("unreadable value for {}", key.trim())))?;
    let multiplier = match parts.next() {
        Some(unit) if unit.eq_ignore_ascii_case("kB") => 1024,
        Some(unit) if unit.eq_ignore_ascii_case("MB") => 1024 * 1024,
        _ => 1,
    };
    Ok(value.saturating_mul(multiplier))
}
