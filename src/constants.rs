//! # Constants and type definitions for the orbit editor
//!
//! This module centralizes the **numeric constants**, **default tuning values**, and
//! **type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angular constants and unit conversions (degrees ↔ radians)
//! - Default values backing [`EditorParams`](crate::params::EditorParams)
//! - Type aliases documenting the units of the canonical orbit fields
//!
//! The simulation works in meters, seconds and meters per second. Angles of the
//! canonical orbit are stored in **degrees**, except the mean anomaly which is in
//! **radians**.

// -------------------------------------------------------------------------------------------------
// Angular constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Full turn in degrees, used by the normalized graphical form
pub const FULL_TURN_DEG: f64 = 360.0;

/// Tolerance below which an orbit is treated as circular or equatorial
pub const EPS: f64 = 1e-11;

// -------------------------------------------------------------------------------------------------
// Default tuning values
// -------------------------------------------------------------------------------------------------

/// Lowest altitude reported by the simple (altitude-only) form
pub const MIN_SIMPLE_ALTITUDE: Meter = 1000.0;

/// Fraction of the raw sphere of influence used as the graphical outer bound
pub const SOI_SCALE: f64 = 0.95;

/// Outer bound used when the scaled sphere of influence is unusable (Jool apoapsis is ~7.2e10 m)
pub const SOI_CEILING: Meter = 200_000_000_000.0;

/// Clearance above the atmosphere used as the graphical inner bound
pub const GRAPHICAL_SURFACE_MARGIN: Meter = 1000.0;

/// Clearance above the atmosphere used when a semi-major axis must be invented
pub const FALLBACK_ALTITUDE_MARGIN: Meter = 10_000.0;

/// Distance of the eccentricity slider end point from the `tan` asymptote at π/2
pub const ECCENTRICITY_ASYMPTOTE_OFFSET: f64 = 0.001;

/// Stretch applied to the normalized mean anomaly of hyperbolic orbits
pub const HYPERBOLIC_MEAN_ANOMALY_STRETCH: f64 = 5.0;

/// Number of physics frames the host keeps vessels packed after a teleport
pub const HOLD_UNPACK_FRAMES: u32 = 60;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;

/// Angle in radians
pub type Radian = f64;

/// Length in meters
pub type Meter = f64;

/// Simulation time in seconds (universal time)
pub type Seconds = f64;

/// Speed in meters per second
pub type MeterPerSecond = f64;
