// ── Unit conversion ──
//
// The host models brightness and saturation as 0-100 percentages; the
// bridge wants 0-255. The conversion is `round(pct / 100 * 255)` with
// half rounded away from zero, so 50 maps to 128 (not 127). Hue needs
// no conversion -- both sides use 0-65535.

/// Convert a 0-100 percentage to the bridge's 0-255 range.
///
/// Inputs above 100 are clamped to 100. Rounds half away from zero:
/// `percent_to_bridge(50) == 128`.
pub fn percent_to_bridge(pct: u8) -> u8 {
    let pct = u32::from(pct.min(100));
    u8::try_from((pct * 255 + 50) / 100).unwrap_or(u8::MAX)
}
