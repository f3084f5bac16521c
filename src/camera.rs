//! Orthographic framing of a viewport.

use nalgebra::{Isometry3, Orthographic3, Point3, Vector3};

use crate::{bounds::positive, settings::Real, Error};

/// An orthographic camera looking down -z at the origin, sized to its viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    pub left: Real,
    pub right: Real,
    pub top: Real,
    pub bottom: Real,
    pub near: Real,
    pub far: Real,
    /// Distance of the eye from the origin along +z.
    pub distance: Real,
    /// Values above 1 magnify the scene.
    pub zoom: Real,
}

impl OrthoCamera {
    pub const NEAR: Real = 0.01;
    pub const FAR: Real = 6000.0;
    pub const DISTANCE: Real = 4000.0;
    pub const ZOOM: Real = 0.8;
    /// Portion of the shorter viewport half-dimension a unit mesh should cover.
    pub const MODEL_FILL: Real = 0.66;

    /// A camera framing a `width` × `height` viewport.
    ///
    /// # Errors
    ///
    /// Fails like [resize](Self::resize).
    pub fn new(width: Real, height: Real) -> Result<Self, Error<Real>> {
        let mut res = Self {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near: Self::NEAR,
            far: Self::FAR,
            distance: Self::DISTANCE,
            zoom: Self::ZOOM,
        };
        res.resize(width, height)?;
        Ok(res)
    }

    /// Reframe the camera for a viewport of a new size.
    ///
    /// # Errors
    ///
    /// [`NonPositiveDimension`](crate::InvalidArgument::NonPositiveDimension) if either side isn't
    /// finite and positive. The camera is left as it was.
    pub fn resize(&mut self, width: Real, height: Real) -> Result<(), Error<Real>> {
        let width = positive("viewport width", width)?;
        let height = positive("viewport height", height)?;
        self.left = -width / 2.0;
        self.right = width / 2.0;
        self.top = height / 2.0;
        self.bottom = -height / 2.0;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> Real {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.top - self.bottom
    }

    /// The projection matrix, with the frustum shrunk by [zoom](Self::zoom).
    pub fn projection(&self) -> Orthographic3<Real> {
        let cx = (self.left + self.right) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;
        let dx = self.width() / (2.0 * self.zoom);
        let dy = self.height() / (2.0 * self.zoom);
        Orthographic3::new(cx - dx, cx + dx, cy - dy, cy + dy, self.near, self.far)
    }

    /// The world-to-camera transform.
    pub fn view(&self) -> Isometry3<Real> {
        Isometry3::look_at_rh(
            &Point3::new(0.0, 0.0, self.distance),
            &Point3::origin(),
            &Vector3::y(),
        )
    }

    /// Uniform scale applied to meshes so that the scene fills the viewport.
    pub fn model_scale(&self) -> Real {
        self.width().min(self.height()) / 2.0 * Self::MODEL_FILL
    }
}
