//! 编辑器侧辅助：特色图片尺寸校验
pub mod featured_image;

pub use self::featured_image::{
    minimum_featured_image_dimensions, validate_featured_image, FeaturedImage,
    FeaturedImageIssue, ImageDimensions,
};
