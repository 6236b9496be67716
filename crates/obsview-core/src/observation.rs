//! Observation documents and their conversion into projection bundles.
//!
//! An observation is one camera snapshot: a rigid pose, clip bounds, an image
//! aspect ratio and a reference to the image (or mask) it captured. Ingestion
//! is pure: it validates a record and derives the matrices the compositor
//! needs, without touching scene state or loading the image.

use crate::error::ObservationError;
use crate::projection::ObservationFrustum;
use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Vec3Record {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3Record> for Vec3 {
    fn from(v: Vec3Record) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// One observation as authored by the producing tool. Mirrors the JSON exactly.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    pub camera_position: Vec3Record,
    /// Euler angles in radians, intrinsic XYZ order.
    pub camera_rotation: Vec3Record,
    pub camera_width: f32,
    pub camera_height: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub map: String,
}

impl ObservationRecord {
    /// Reject records whose numbers would produce non-finite matrices.
    pub fn validate(&self) -> Result<(), ObservationError> {
        let components = [
            ("cameraPosition.x", self.camera_position.x),
            ("cameraPosition.y", self.camera_position.y),
            ("cameraPosition.z", self.camera_position.z),
            ("cameraRotation.x", self.camera_rotation.x),
            ("cameraRotation.y", self.camera_rotation.y),
            ("cameraRotation.z", self.camera_rotation.z),
            ("cameraNear", self.camera_near),
            ("cameraFar", self.camera_far),
        ];
        for (field, value) in components {
            if !value.is_finite() {
                return Err(ObservationError::NonFinite {
                    field,
                    value: value as f64,
                });
            }
        }
        for (field, value) in [
            ("cameraWidth", self.camera_width),
            ("cameraHeight", self.camera_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ObservationError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.camera_near <= 0.0 || self.camera_far <= self.camera_near {
            return Err(ObservationError::ClipRange {
                near: self.camera_near as f64,
                far: self.camera_far as f64,
            });
        }
        if self.map.trim().is_empty() {
            return Err(ObservationError::MissingMap);
        }
        Ok(())
    }
}

/// Parse an uploaded document: either a single record or an array of records.
pub fn parse_document(text: &str) -> Result<Vec<ObservationRecord>, ObservationError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let records = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<ObservationRecord>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    if records.is_empty() {
        return Err(ObservationError::Empty);
    }
    Ok(records)
}

/// Rotation for intrinsic XYZ Euler angles (radians): `Rx * Ry * Rz`.
#[inline]
pub fn euler_xyz_to_quat(angles: Vec3) -> Quat {
    Quat::from_rotation_x(angles.x) * Quat::from_rotation_y(angles.y) * Quat::from_rotation_z(angles.z)
}

/// Everything the compositor needs to project one observation.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationBundle {
    pub position: Vec3,
    /// Single source of truth for the observation's orientation. Both the
    /// transform below and the overlay quad are built from it.
    pub rotation: Quat,
    /// Observation pose: translation * rotation * unit scale.
    pub transform: Mat4,
    /// World to observation eye space (inverse of `transform`).
    pub view: Mat4,
    pub projection: Mat4,
    pub frustum: ObservationFrustum,
    /// Image reference, resolved by the host.
    pub texture: String,
    pub width: f32,
    pub height: f32,
    pub aspect: f32,
}

/// Validate a record and derive its projection bundle.
pub fn ingest(record: &ObservationRecord) -> Result<ObservationBundle, ObservationError> {
    record.validate()?;

    let position: Vec3 = record.camera_position.into();
    let rotation = euler_xyz_to_quat(record.camera_rotation.into());
    // Scale stays fixed at 1 so the reprojected image is never distorted.
    let transform = Mat4::from_scale_rotation_translation(Vec3::ONE, rotation, position);
    let view = Mat4::from_quat(rotation.conjugate()) * Mat4::from_translation(-position);

    let aspect = record.camera_width / record.camera_height;
    if !aspect.is_finite() {
        return Err(ObservationError::NonFinite {
            field: "aspect",
            value: aspect as f64,
        });
    }
    let frustum = ObservationFrustum::from_aspect(aspect, record.camera_near, record.camera_far);
    let projection = frustum.matrix();
    // Finite inputs can still overflow once combined.
    require_finite("projection", &projection)?;
    require_finite("view", &view)?;

    Ok(ObservationBundle {
        position,
        rotation,
        transform,
        view,
        projection,
        frustum,
        texture: record.map.clone(),
        width: record.camera_width,
        height: record.camera_height,
        aspect,
    })
}

fn require_finite(field: &'static str, m: &Mat4) -> Result<(), ObservationError> {
    match m.to_cols_array().into_iter().find(|v| !v.is_finite()) {
        Some(value) => Err(ObservationError::NonFinite {
            field,
            value: value as f64,
        }),
        None => Ok(()),
    }
}

/// Parse and ingest a whole document. Nothing is returned unless every record is valid.
pub fn ingest_document(text: &str) -> Result<Vec<ObservationBundle>, ObservationError> {
    parse_document(text)?.iter().map(ingest).collect()
}
