/// timestep.rs
/// Host step sizes and dt sanitising.
///
/// The host may call `advance` at any rate. Each call is clamped to
/// `max_dt` so a long frame stall cannot tunnel bodies through walls.

/// Step the CLI and benches drive the match with (60 Hz)
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Clamp a host-supplied dt into `(0, max_dt]`.
///
/// Returns `None` for a non-finite or non-positive dt; that tick is a no-op.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> Option<f32> {
    if !dt.is_finite() || dt <= 0.0 {
        return None;
    }
    Some(dt.min(max_dt))
}

/// Ticks needed to cover `seconds` at `dt`.
pub fn ticks_for(seconds: f32, dt: f32) -> u64 {
    if !(seconds > 0.0) || !(dt > 0.0) {
        return 0;
    }
    (seconds / dt).ceil() as u64
}
