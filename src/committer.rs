//! # Orbit committer
//!
//! Applies a [`CanonicalOrbit`] to a live entity of the [`Universe`] and keeps the
//! dependent state consistent.
//!
//! ## Vessels
//!
//! 1. The new position at the current time must lie inside the raw sphere of influence
//!    of the new reference body. Otherwise a single error popup is shown and nothing
//!    is modified.
//! 2. The vessel is marked as flying (not landed, not splashed, no landing site) and its
//!    launch clamps are destroyed.
//! 3. The host is asked to keep vessels packed and every unpacked vessel is put on
//!    rails. These calls are best-effort: failures are logged and ignored.
//! 4. The orbit is hard-set and the driver cache is resynchronized.
//! 5. Vessel SOI-change listeners are notified when the reference body changed.
//!
//! ## Bodies
//!
//! The new parent may be neither the body itself nor one of its descendants. After the
//! hard-set the body is moved between the children lists of its old and new parents and
//! its cached state is refreshed.
//!
//! ## Detached drivers
//!
//! Hard-set only.
//!
//! ## Hard-set
//!
//! The new state is evaluated first; an element set without a finite state at the
//! current time is rejected with [`EditorError::NonFiniteState`] before any field is
//! written. The elements and μ are then overwritten, the record is re-initialized and
//! updated to the current time, and the driver's reference-body listener runs once if the
//! reference body changed.
use log::{debug, info, warn};

use crate::{
    body::BodyId,
    constants::Seconds,
    driver::OrbitDriver,
    editor_errors::EditorError,
    host::Host,
    orbit::CanonicalOrbit,
    params::EditorParams,
    universe::{OrbitingEntity, SoiChange, Universe},
    vessel::VesselId,
};

/// Popup shown when a vessel would be placed outside the sphere of influence.
pub const OUTSIDE_SOI_MESSAGE: &str = "Destination position was above the sphere of influence";

/// Apply `orbit` to `entity`.
///
/// Arguments
/// ---------
/// * `universe` – the simulation model, mutated in place.
/// * `host` – clock, physics and UI collaborator.
/// * `params` – editor configuration (only `hold_unpack_frames` is read here).
/// * `entity` – the entity whose orbit is replaced.
/// * `orbit` – sanitized canonical elements, as produced by the parameterization forms.
///
/// Errors
/// ------
/// * `UnknownEntity` / `UnknownBody` for missing ids.
/// * `OutsideSphereOfInfluence` if a vessel would leave the sphere of influence.
/// * `ReferenceBodyCycle` if a body would orbit itself or one of its descendants.
/// * `NonFiniteState` if the orbit has no finite state at the current time.
///
/// Nothing is modified when an error is returned.
pub fn commit<H: Host + ?Sized>(
    universe: &mut Universe,
    host: &mut H,
    params: &EditorParams,
    entity: OrbitingEntity,
    orbit: CanonicalOrbit,
) -> Result<(), EditorError> {
    let now = host.universal_time();
    debug!(
        "Committing orbit to {} ({}) at UT {now}:\n{orbit}",
        entity,
        universe.entity_label(entity)
    );
    match entity {
        OrbitingEntity::Vessel(id) => commit_vessel(universe, host, params, id, orbit, now),
        OrbitingEntity::Body(id) => commit_body(universe, id, orbit, now),
        OrbitingEntity::Detached(_) => {
            let mu = universe.body(orbit.reference_body)?.gravitational_parameter;
            hard_set(universe.driver_mut(entity)?, orbit, mu, now)?;
            Ok(())
        }
    }
}

fn commit_vessel<H: Host + ?Sized>(
    universe: &mut Universe,
    host: &mut H,
    params: &EditorParams,
    id: VesselId,
    orbit: CanonicalOrbit,
    now: Seconds,
) -> Result<(), EditorError> {
    universe.vessel(id)?;
    let body = universe.body(orbit.reference_body)?;
    let mu = body.gravitational_parameter;
    let state = orbit.state_at(mu, now).ok_or(EditorError::NonFiniteState)?;

    let distance = state.position.norm();
    if distance > body.sphere_of_influence {
        host.error_popup(OUTSIDE_SOI_MESSAGE);
        return Err(EditorError::OutsideSphereOfInfluence {
            distance,
            soi: body.sphere_of_influence,
        });
    }

    let vessel = universe.vessel_mut(id)?;
    vessel.landed = false;
    vessel.splashed = false;
    vessel.landed_at.clear();
    let clamps = vessel.destroy_launch_clamps();
    if !clamps.is_empty() {
        info!(
            "Destroyed {} launch clamp(s) of vessel '{}'",
            clamps.len(),
            vessel.name
        );
    }

    if let Err(e) = host.hold_vessel_unpack(params.hold_unpack_frames) {
        warn!("Could not hold vessel unpacking: {e}");
    }
    for other in universe.vessels_mut().filter(|v| !v.packed) {
        if let Err(e) = host.go_on_rails(other) {
            warn!("Could not put vessel '{}' on rails: {e}", other.name);
        }
    }

    let driver = &mut universe.vessel_mut(id)?.orbit_driver;
    let old_body = hard_set(driver, orbit, mu, now)?;
    driver.resync_from_orbit();

    if old_body != orbit.reference_body {
        universe.fire_vessel_soi_changed(&SoiChange {
            vessel: id,
            from: old_body,
            to: orbit.reference_body,
        });
    }
    Ok(())
}

fn commit_body(
    universe: &mut Universe,
    id: BodyId,
    orbit: CanonicalOrbit,
    now: Seconds,
) -> Result<(), EditorError> {
    universe.driver(OrbitingEntity::Body(id))?;
    let new_parent = orbit.reference_body;
    let mu = universe.body(new_parent)?.gravitational_parameter;
    if universe.is_within(new_parent, id) {
        return Err(EditorError::ReferenceBodyCycle(format!(
            "{} cannot orbit {}",
            universe.entity_label(OrbitingEntity::Body(id)),
            universe.entity_label(OrbitingEntity::Body(new_parent)),
        )));
    }

    let old_parent = hard_set(universe.driver_mut(OrbitingEntity::Body(id))?, orbit, mu, now)?;

    if old_parent != new_parent {
        universe
            .body_mut(old_parent)?
            .orbiting_bodies
            .retain(|child| *child != id);
        let children = &mut universe.body_mut(new_parent)?.orbiting_bodies;
        if !children.contains(&id) {
            children.push(id);
        }
        info!(
            "Moved body #{} from body #{} to body #{}",
            id.0, old_parent.0, new_parent.0
        );
    }
    universe.body_mut(id)?.cb_update();
    Ok(())
}

/// Overwrite the orbit of `driver` and return the previous reference body.
///
/// Errors
/// ------
/// * `NonFiniteState` if `orbit` cannot be evaluated at `now`. The driver is untouched.
pub(crate) fn hard_set(
    driver: &mut OrbitDriver,
    orbit: CanonicalOrbit,
    mu: f64,
    now: Seconds,
) -> Result<BodyId, EditorError> {
    orbit.state_at(mu, now).ok_or(EditorError::NonFiniteState)?;

    let live = &mut driver.orbit;
    let old_body = live.reference_body();
    live.elements = orbit;
    live.mu = mu;
    live.init();
    if !live.update_from_ut(now) {
        // Unreachable after the state check above.
        warn!("Orbit of '{}' could not be updated to UT {now}", driver.name);
    }

    if old_body != orbit.reference_body {
        driver.notify_reference_body_change(orbit.reference_body);
    }
    Ok(old_body)
}
