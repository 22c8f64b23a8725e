//! Apply one set of params to every target of a bundle.

use log::warn;

use super::WarpOptions;
use crate::error::{AugmentError, Result};
use crate::geometry::WarpGeometry;
use crate::params::TransformParams;
use crate::raster::Element;
use crate::targets::{map_bbox_in_scheme, map_keypoint, Keypoint, TargetBundle};
use crate::warp::resample;

/// Build the geometry once and push every present target through it.
///
/// The caller validates the bundle first; nothing here mutates `bundle`.
pub(crate) fn warp_bundle<T: Element, M: Element>(
    bundle: &TargetBundle<T, M>,
    params: &TransformParams,
    options: &WarpOptions,
) -> Result<TargetBundle<T, M>> {
    let source = bundle.image.dimensions();
    let WarpGeometry { matrix, canvas } = params.geometry(source.0, source.1)?;

    let image = resample(
        &bundle.image,
        &matrix,
        canvas,
        options.interpolation,
        options.border_mode,
        &options.border_value,
    )?;

    let mask = bundle
        .mask
        .as_ref()
        .map(|mask| {
            resample(
                mask,
                &matrix,
                canvas,
                options.mask_interpolation,
                options.border_mode,
                &options.mask_value,
            )
        })
        .transpose()?;

    let bboxes = bundle.bboxes.as_ref().map(|boxes| {
        boxes
            .iter()
            .map(|bbox| map_bbox_in_scheme(bbox, &matrix, source, canvas, bundle.bbox_scheme))
            .collect()
    });

    let keypoints = bundle.keypoints.as_ref().map(|keypoints| {
        if params.rotation_angle().is_none() && keypoints.iter().any(Keypoint::has_orientation) {
            warn!(
                "{}",
                AugmentError::UnsupportedTarget(
                    "keypoint angle and scale under affine transform, reset to 0".to_string()
                )
            );
        }
        keypoints
            .iter()
            .map(|keypoint| map_keypoint(keypoint, &matrix, params))
            .collect()
    });

    Ok(TargetBundle {
        image,
        mask,
        bboxes,
        keypoints,
        bbox_scheme: bundle.bbox_scheme,
    })
}
