use std::marker::PhantomData;

use bytemuck::Pod;
use glam::{uvec2, UVec2, Vec4};
use log::{debug, trace};

use crate::utils;

/// Runs a per-texel kernel over a whole texture level.
#[derive(Debug)]
pub struct CameraComputePass<P> {
    label: String,
    _params: PhantomData<P>,
}

impl<P> CameraComputePass<P>
where
    P: Pod,
{
    pub fn builder(label: impl ToString) -> CameraPassBuilder<P> {
        CameraPassBuilder {
            label: label.to_string(),
            _params: Default::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Calls `kernel` for each texel of `target`, which must be `size.x` x
    /// `size.y` texels big.
    pub fn run(
        &self,
        size: UVec2,
        params: &P,
        target: &mut [Vec4],
        kernel: impl Fn(UVec2, &P) -> Vec4,
    ) {
        assert_eq!(
            (size.x as usize) * (size.y as usize),
            target.len(),
            "pass `{}` got a target of unexpected size",
            self.label
        );

        trace!("Running pass: {}; size={}x{}", self.label, size.x, size.y);

        utils::measure(&self.label, || {
            for (idx, texel) in target.iter_mut().enumerate() {
                let idx = idx as u32;

                *texel = kernel(uvec2(idx % size.x, idx / size.x), params);
            }
        });
    }
}

pub struct CameraPassBuilder<P> {
    label: String,
    _params: PhantomData<P>,
}

impl<P> CameraPassBuilder<P>
where
    P: Pod,
{
    pub fn build(self) -> CameraComputePass<P> {
        debug!("Initializing pass: {}", self.label);

        CameraComputePass {
            label: self.label,
            _params: PhantomData,
        }
    }
}
