//! The set of co-registered targets for one augmentation call.

use crate::error::{AugmentError, Result};
use crate::raster::{Element, Raster};

use super::{BoundingBox, BoxScheme, Keypoint};

/// Kinds of target a bundle can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Image,
    Mask,
    BoundingBoxes,
    Keypoints,
}

/// An image and the annotations that must move with it.
///
/// `T` is the image sample type and `M` the mask label type.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetBundle<T: Element = u8, M: Element = u8> {
    pub image: Raster<T>,
    pub mask: Option<Raster<M>>,
    pub bboxes: Option<Vec<BoundingBox>>,
    pub keypoints: Option<Vec<Keypoint>>,
    /// Units of `bboxes`.
    pub bbox_scheme: BoxScheme,
}

impl<T: Element, M: Element> TargetBundle<T, M> {
    /// Create a bundle holding only an image.
    pub fn new(image: Raster<T>) -> Self {
        Self {
            image,
            mask: None,
            bboxes: None,
            keypoints: None,
            bbox_scheme: BoxScheme::default(),
        }
    }

    pub fn with_mask(mut self, mask: Raster<M>) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_bboxes(mut self, bboxes: Vec<BoundingBox>) -> Self {
        self.bboxes = Some(bboxes);
        self
    }

    pub fn with_keypoints(mut self, keypoints: Vec<Keypoint>) -> Self {
        self.keypoints = Some(keypoints);
        self
    }

    pub fn with_bbox_scheme(mut self, scheme: BoxScheme) -> Self {
        self.bbox_scheme = scheme;
        self
    }

    /// Target kinds present in this bundle, image first.
    pub fn present_targets(&self) -> Vec<TargetKind> {
        let mut kinds = vec![TargetKind::Image];
        if self.mask.is_some() {
            kinds.push(TargetKind::Mask);
        }
        if self.bboxes.is_some() {
            kinds.push(TargetKind::BoundingBoxes);
        }
        if self.keypoints.is_some() {
            kinds.push(TargetKind::Keypoints);
        }
        kinds
    }

    /// Check that the mask is a single-channel raster on the image's grid.
    ///
    /// # Errors
    ///
    /// [`AugmentError::DimensionMismatch`] if the extents differ, and
    /// [`AugmentError::InvalidParameter`] if the mask has several channels.
    pub fn validate(&self) -> Result<()> {
        let Some(mask) = &self.mask else {
            return Ok(());
        };
        if !self.image.same_extent(mask) {
            return Err(AugmentError::DimensionMismatch {
                image: self.image.dimensions(),
                mask: mask.dimensions(),
            });
        }
        if mask.channels() != 1 {
            return Err(AugmentError::InvalidParameter(format!(
                "mask must have one channel, got {}",
                mask.channels()
            )));
        }
        Ok(())
    }
}
