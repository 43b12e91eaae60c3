//! # Editor tuning parameters
//!
//! [`EditorParams`] gathers every numeric knob used by the parameterization converter
//! and the orbit committer. The defaults reproduce the historical editor behaviour;
//! [`EditorParamsBuilder`] lets a host override them with validation.
//!
//! ```rust
//! use orbit_editor::params::EditorParams;
//!
//! let params = EditorParams::builder()
//!     .min_simple_altitude(5_000.0)
//!     .hold_unpack_frames(120)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.hold_unpack_frames, 120);
//! ```
use std::cmp::Ordering::{Equal, Greater, Less};

use serde::{Deserialize, Serialize};

use crate::constants::{
    Meter, ECCENTRICITY_ASYMPTOTE_OFFSET, FALLBACK_ALTITUDE_MARGIN, GRAPHICAL_SURFACE_MARGIN,
    HOLD_UNPACK_FRAMES, HYPERBOLIC_MEAN_ANOMALY_STRETCH, MIN_SIMPLE_ALTITUDE, SOI_CEILING,
    SOI_SCALE,
};
use crate::editor_errors::EditorError;

/// Configuration of the orbit editor.
///
/// Fields
/// -----------------
/// * `min_simple_altitude` – floor applied to the altitude reported by the simple form (m).
/// * `soi_scale` – fraction of the raw sphere of influence used as the graphical outer bound.
/// * `soi_ceiling` – replacement outer bound when the scaled sphere of influence is non-finite,
///   negative or larger than this value (m).
/// * `graphical_surface_margin` – clearance above the atmosphere defining the graphical inner bound (m).
/// * `fallback_altitude_margin` – clearance above the atmosphere used when a non-finite
///   semi-major axis has to be replaced (m).
/// * `eccentricity_asymptote_offset` – distance kept from π/2 by the eccentricity slider.
/// * `hyperbolic_mean_anomaly_stretch` – stretch factor of the hyperbolic mean-anomaly slider.
/// * `hold_unpack_frames` – physics frames the host is asked to keep vessels packed after a commit.
///
/// Defaults
/// -----------------
/// * `min_simple_altitude`: 1000 m
/// * `soi_scale`: 0.95
/// * `soi_ceiling`: 2e11 m
/// * `graphical_surface_margin`: 1000 m
/// * `fallback_altitude_margin`: 10000 m
/// * `eccentricity_asymptote_offset`: 0.001
/// * `hyperbolic_mean_anomaly_stretch`: 5
/// * `hold_unpack_frames`: 60
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorParams {
    pub min_simple_altitude: Meter,
    pub soi_scale: f64,
    pub soi_ceiling: Meter,
    pub graphical_surface_margin: Meter,
    pub fallback_altitude_margin: Meter,
    pub eccentricity_asymptote_offset: f64,
    pub hyperbolic_mean_anomaly_stretch: f64,
    pub hold_unpack_frames: u32,
}

impl EditorParams {
    /// Construct a new [`EditorParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`EditorParamsBuilder`] initialized with the default values.
    pub fn builder() -> EditorParamsBuilder {
        EditorParamsBuilder::new()
    }

    /// Upper end of the eccentricity slider angle, `π/2 − offset`.
    pub fn eccentricity_slider_span(&self) -> f64 {
        std::f64::consts::FRAC_PI_2 - self.eccentricity_asymptote_offset
    }
}

impl Default for EditorParams {
    fn default() -> Self {
        EditorParams {
            min_simple_altitude: MIN_SIMPLE_ALTITUDE,
            soi_scale: SOI_SCALE,
            soi_ceiling: SOI_CEILING,
            graphical_surface_margin: GRAPHICAL_SURFACE_MARGIN,
            fallback_altitude_margin: FALLBACK_ALTITUDE_MARGIN,
            eccentricity_asymptote_offset: ECCENTRICITY_ASYMPTOTE_OFFSET,
            hyperbolic_mean_anomaly_stretch: HYPERBOLIC_MEAN_ANOMALY_STRETCH,
            hold_unpack_frames: HOLD_UNPACK_FRAMES,
        }
    }
}

/// Builder for [`EditorParams`], with validation.
#[derive(Debug, Clone)]
pub struct EditorParamsBuilder {
    params: EditorParams,
}

impl Default for EditorParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: EditorParams::default(),
        }
    }

    pub fn min_simple_altitude(mut self, v: Meter) -> Self {
        self.params.min_simple_altitude = v;
        self
    }
    pub fn soi_scale(mut self, v: f64) -> Self {
        self.params.soi_scale = v;
        self
    }
    pub fn soi_ceiling(mut self, v: Meter) -> Self {
        self.params.soi_ceiling = v;
        self
    }
    pub fn graphical_surface_margin(mut self, v: Meter) -> Self {
        self.params.graphical_surface_margin = v;
        self
    }
    pub fn fallback_altitude_margin(mut self, v: Meter) -> Self {
        self.params.fallback_altitude_margin = v;
        self
    }
    pub fn eccentricity_asymptote_offset(mut self, v: f64) -> Self {
        self.params.eccentricity_asymptote_offset = v;
        self
    }
    pub fn hyperbolic_mean_anomaly_stretch(mut self, v: f64) -> Self {
        self.params.hyperbolic_mean_anomaly_stretch = v;
        self
    }
    pub fn hold_unpack_frames(mut self, v: u32) -> Self {
        self.params.hold_unpack_frames = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Return true iff a < b and comparable (i.e., not NaN).
    #[inline]
    fn lt(a: f64, b: f64) -> bool {
        a.partial_cmp(&b) == Some(Less)
    }

    /// Finalize the builder and produce an [`EditorParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `min_simple_altitude >= 0`, `graphical_surface_margin >= 0`,
    ///   `fallback_altitude_margin >= 0`.
    /// * `0 < soi_scale`, `0 < soi_ceiling` and `soi_ceiling` finite.
    /// * `0 < eccentricity_asymptote_offset < π/2`, so the slider never reaches the asymptote.
    /// * `hyperbolic_mean_anomaly_stretch > 0`, otherwise the hyperbolic slider cannot be inverted.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(EditorParams)` if all values are valid.
    /// * `Err(EditorError::InvalidEditorParameter)` naming the first rule that failed.
    pub fn build(self) -> Result<EditorParams, EditorError> {
        let p = &self.params;

        if !Self::ge0(p.min_simple_altitude)
            || !Self::ge0(p.graphical_surface_margin)
            || !Self::ge0(p.fallback_altitude_margin)
        {
            return Err(EditorError::InvalidEditorParameter(
                "altitude margins must be non-negative".into(),
            ));
        }
        if !Self::gt0(p.soi_scale) {
            return Err(EditorError::InvalidEditorParameter(
                "soi_scale must be > 0".into(),
            ));
        }
        if !Self::gt0(p.soi_ceiling) || !p.soi_ceiling.is_finite() {
            return Err(EditorError::InvalidEditorParameter(
                "soi_ceiling must be finite and > 0".into(),
            ));
        }
        if !Self::gt0(p.eccentricity_asymptote_offset)
            || !Self::lt(
                p.eccentricity_asymptote_offset,
                std::f64::consts::FRAC_PI_2,
            )
        {
            return Err(EditorError::InvalidEditorParameter(
                "eccentricity_asymptote_offset must lie in (0, π/2)".into(),
            ));
        }
        if !Self::gt0(p.hyperbolic_mean_anomaly_stretch) {
            return Err(EditorError::InvalidEditorParameter(
                "hyperbolic_mean_anomaly_stretch must be > 0".into(),
            ));
        }

        Ok(self.params)
    }
}
