/// Byte-count parsing and formatting.
///
/// All internal sizes are `u64` bytes. Floating point only appears while
/// parsing a fractional expression like `1.5G` and at the display boundary.
use crate::error::SizeParseError;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

/// Parse a human size expression into a byte count.
///
/// Accepts an optional trailing unit letter (`K`, `M`, `G`, `T`, any case)
/// with binary multipliers. The numeric part may be fractional when a unit is
/// present (`1.5G`); the product is truncated toward zero. Without a unit the
/// whole text must be a plain integer byte count.
pub fn parse_size(text: &str) -> Result<u64, SizeParseError> {
    let upper = text.trim().to_ascii_uppercase();
    let Some(unit) = upper.chars().last() else {
        return Err(SizeParseError::new(text, "empty size"));
    };

    let multiplier = match unit {
        'K' => KIB,
        'M' => MIB,
        'G' => GIB,
        'T' => TIB,
        _ => {
            if upper.starts_with('-') {
                return Err(SizeParseError::new(text, "size must not be negative"));
            }
            return upper
                .parse::<u64>()
                .map_err(|_| SizeParseError::new(text, "expected an integer byte count"));
        }
    };

    let number: f64 = upper[..upper.len() - 1]
        .trim()
        .parse()
        .map_err(|_| SizeParseError::new(text, "expected a number before the unit"))?;

    if !number.is_finite() {
        return Err(SizeParseError::new(text, "size must be finite"));
    }
    if number < 0.0 {
        return Err(SizeParseError::new(text, "size must not be negative"));
    }

    let bytes = (number * multiplier as f64).trunc();
    // 2^64 is exactly representable; anything at or above it cannot fit.
    if bytes >= u64::MAX as f64 {
        return Err(SizeParseError::new(text, "size is too large"));
    }
    Ok(bytes as u64)
}

/// Format a byte count into a human-readable string.
///
/// Binary units (1 KB = 1024 B), labelled with the short forms users expect.
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", b / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1} MB", b / MIB as f64)
    } else if bytes < TIB {
        format!("{:.2} GB", b / GIB as f64)
    } else {
        format!("{:.2} TB", b / TIB as f64)
    }
}

/// Format a count with thousands separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
