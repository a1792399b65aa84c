//! Scalar conversions between backend-native and portable representations
//!
//! Desktop search SDKs hand out UTF-16 strings, 64-bit integers split into
//! 32-bit halves, and FILETIME timestamps (100ns ticks since 1601-01-01).
//! Everything that leaves the adapter is a `String`, `i64` or `u64`.

use chrono::{DateTime, Utc};

/// FILETIME ticks per second (100ns resolution)
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Seconds between 1601-01-01 and 1970-01-01
pub const EPOCH_DIFFERENCE_SECS: u64 = 11_644_473_600;

/// Decode a backend wide string into UTF-8.
///
/// Stops at the first NUL. Unpaired surrogates are replaced with U+FFFD,
/// so a single bad code unit never fails the whole call.
pub fn wide_to_string(wide: &[u16]) -> String {
    let end = wide.iter().position(|&unit| unit == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..end])
}

/// Owned, NUL-terminated UTF-16 buffer handed to the backend.
///
/// Lives for a single query call and is released on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideString {
    buf: Vec<u16>,
}

impl WideString {
    pub fn new(text: &str) -> Self {
        // UTF-16 never needs more units than UTF-8 has bytes
        let mut buf = Vec::with_capacity(text.len() + 1);
        buf.extend(text.encode_utf16());
        buf.push(0);
        Self { buf }
    }

    /// Pointer to the first code unit, valid while `self` is alive
    pub fn as_ptr(&self) -> *const u16 {
        self.buf.as_ptr()
    }

    /// Code units without the terminator
    pub fn as_slice(&self) -> &[u16] {
        &self.buf[..self.buf.len() - 1]
    }

    /// Code units including the terminator
    pub fn as_slice_with_nul(&self) -> &[u16] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_string_lossy(&self) -> String {
        wide_to_string(self.as_slice())
    }
}

impl From<&str> for WideString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Signed 64-bit value delivered as two 32-bit halves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LargeInteger {
    pub low: u32,
    pub high: i32,
}

impl LargeInteger {
    pub const fn from_i64(value: i64) -> Self {
        Self {
            low: value as u32,
            high: (value >> 32) as i32,
        }
    }

    /// Shift-and-or; identical to reinterpreting the native 64-bit value.
    pub const fn to_i64(self) -> i64 {
        ((self.high as i64) << 32) | self.low as i64
    }
}

/// Timestamp in 100ns ticks since 1601-01-01 UTC, split into halves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileTime {
    pub low: u32,
    pub high: u32,
}

impl FileTime {
    pub const fn from_ticks(ticks: u64) -> Self {
        Self {
            low: ticks as u32,
            high: (ticks >> 32) as u32,
        }
    }

    /// Inverse of [`FileTime::to_unix_millis`] for building fixtures.
    ///
    /// Saturates at the largest representable FILETIME.
    pub const fn from_unix_millis(millis: u64) -> Self {
        let seconds = (millis / 1000).saturating_add(EPOCH_DIFFERENCE_SECS);
        let sub_second_ticks = (millis % 1000) * (TICKS_PER_SECOND / 1000);
        Self::from_ticks(
            seconds
                .saturating_mul(TICKS_PER_SECOND)
                .saturating_add(sub_second_ticks),
        )
    }

    pub const fn ticks(self) -> u64 {
        ((self.high as u64) << 32) | self.low as u64
    }

    pub fn to_unix_millis(self) -> u64 {
        filetime_ticks_to_unix_millis(self.ticks())
    }
}

/// Convert FILETIME ticks to milliseconds since the Unix epoch.
///
/// Truncates to whole seconds first, so the result is always a multiple of
/// 1000. Timestamps before 1970 clamp to `0`.
pub fn filetime_ticks_to_unix_millis(ticks: u64) -> u64 {
    (ticks / TICKS_PER_SECOND)
        .saturating_sub(EPOCH_DIFFERENCE_SECS)
        .saturating_mul(1000)
}

/// Unix milliseconds as a UTC timestamp, for display
pub fn unix_millis_to_datetime(millis: u64) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(millis).ok()?;
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1970-01-01T00:00:00Z in FILETIME ticks
    const UNIX_EPOCH_TICKS: u64 = 116_444_736_000_000_000;

    #[test]
    fn test_unix_epoch_converts_to_zero() {
        assert_eq!(filetime_ticks_to_unix_millis(UNIX_EPOCH_TICKS), 0);
        assert_eq!(FileTime::from_ticks(UNIX_EPOCH_TICKS).to_unix_millis(), 0);
    }

    #[test]
    fn test_known_date_converts() {
        // 2021-01-01T00:00:00Z
        let ticks = (1_609_459_200 + EPOCH_DIFFERENCE_SECS) * TICKS_PER_SECOND;
        assert_eq!(filetime_ticks_to_unix_millis(ticks), 1_609_459_200_000);
    }

    #[test]
    fn test_sub_second_ticks_truncate() {
        let ticks = UNIX_EPOCH_TICKS + TICKS_PER_SECOND - 1;
        assert_eq!(filetime_ticks_to_unix_millis(ticks), 0);
        assert_eq!(filetime_ticks_to_unix_millis(ticks + 1), 1000);
    }

    #[test]
    fn test_pre_epoch_clamps_to_zero() {
        assert_eq!(filetime_ticks_to_unix_millis(0), 0);
        assert_eq!(filetime_ticks_to_unix_millis(UNIX_EPOCH_TICKS - TICKS_PER_SECOND), 0);
    }

    #[test]
    fn test_filetime_halves() {
        let ft = FileTime { low: 0xD53E_8000, high: 0x019D_B1DE };
        assert_eq!(ft.ticks(), UNIX_EPOCH_TICKS);
        assert_eq!(FileTime::from_ticks(UNIX_EPOCH_TICKS), ft);
    }

    #[test]
    fn test_filetime_from_unix_millis() {
        let ft = FileTime::from_unix_millis(1_609_459_200_000);
        assert_eq!(ft.to_unix_millis(), 1_609_459_200_000);
        assert_eq!(FileTime::from_unix_millis(0).ticks(), UNIX_EPOCH_TICKS);
    }

    #[test]
    fn test_filetime_from_huge_unix_millis_saturates() {
        assert_eq!(FileTime::from_unix_millis(u64::MAX).ticks(), u64::MAX);
        let ft = FileTime::from_unix_millis(9_000_000_000_000_000);
        assert_eq!(ft.ticks(), u64::MAX);
        assert_eq!(ft.to_unix_millis(), filetime_ticks_to_unix_millis(u64::MAX));
    }

    #[test]
    fn test_large_integer_combines_halves() {
        assert_eq!(LargeInteger { low: 0, high: 1 }.to_i64(), 1 << 32);
        assert_eq!(LargeInteger { low: 42, high: 0 }.to_i64(), 42);
        assert_eq!(LargeInteger { low: u32::MAX, high: -1 }.to_i64(), -1);
        assert_eq!(LargeInteger::from_i64(-1), LargeInteger { low: u32::MAX, high: -1 });
        assert_eq!(LargeInteger::from_i64(5_000_000_000).to_i64(), 5_000_000_000);
    }

    #[test]
    fn test_wide_to_string_stops_at_nul() {
        let wide: Vec<u16> = "report.txt\0garbage".encode_utf16().collect();
        assert_eq!(wide_to_string(&wide), "report.txt");
    }

    #[test]
    fn test_wide_to_string_replaces_lone_surrogate() {
        let wide = [b'a' as u16, 0xD800, b'b' as u16];
        assert_eq!(wide_to_string(&wide), "a\u{FFFD}b");
    }

    #[test]
    fn test_wide_to_string_non_ascii() {
        let wide: Vec<u16> = "Résumé 📄.pdf".encode_utf16().collect();
        assert_eq!(wide_to_string(&wide), "Résumé 📄.pdf");
    }

    #[test]
    fn test_wide_string_is_nul_terminated() {
        let wide = WideString::new("*.txt");
        assert_eq!(wide.len(), 5);
        assert_eq!(wide.as_slice_with_nul().last(), Some(&0));
        assert_eq!(wide.as_slice_with_nul().len(), 6);
        assert_eq!(wide.to_string_lossy(), "*.txt");
    }

    #[test]
    fn test_empty_wide_string() {
        let wide = WideString::from("");
        assert!(wide.is_empty());
        assert_eq!(wide.as_slice_with_nul(), &[0]);
    }

    #[test]
    fn test_unix_millis_to_datetime() {
        let dt = unix_millis_to_datetime(1_609_459_200_000).unwrap();
        assert_eq!(dt.to_rfc3339(), "2021-01-01T00:00:00+00:00");
        assert!(unix_millis_to_datetime(u64::MAX).is_none());
    }
}
