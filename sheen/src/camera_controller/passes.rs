use log::debug;

use crate::Camera;

macro_rules! passes {
    ([ $( $name:ident => $class:ident, )* ]) => {
        $( mod $name; )*
        $( pub use self::$name::*; )*

        #[derive(Debug)]
        pub struct CameraPasses {
            $( pub $name: $class, )*
        }

        impl CameraPasses {
            pub fn new(camera: &Camera) -> Self {
                debug!("Initializing camera passes");

                Self {
                    $( $name: $class::new(camera), )*
                }
            }
        }
    };
}

passes!([
    back_face_depth => BackFaceDepthPreparingPass,
    composition => CompositionPass,
    mip_pyramid => MipPyramidPass,
    ray_marching => RayMarchingPass,
    reprojection => ReprojectionPass,
    resolving => ResolvingPass,
]);
