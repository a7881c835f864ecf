//! 特色图片校验
//! 最小宽度 1200，按 16:9 推出最小高度 675

use serde::{Deserialize, Serialize};

/// 最小宽度
pub const FEATURED_IMAGE_MINIMUM_WIDTH: u32 = 1200;
/// 宽高比 16:9
pub const FEATURED_IMAGE_ASPECT_RATIO: (u32, u32) = (16, 9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// 编辑器中选中的特色图片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeaturedImageIssue {
    /// 未设置特色图片
    Missing,
    /// 尺寸不足
    TooSmall {
        actual: ImageDimensions,
        minimum: ImageDimensions,
    },
}

/// 特色图片最小尺寸
pub fn minimum_featured_image_dimensions() -> ImageDimensions {
    let (ratio_w, ratio_h) = FEATURED_IMAGE_ASPECT_RATIO;
    ImageDimensions {
        width: FEATURED_IMAGE_MINIMUM_WIDTH,
        height: FEATURED_IMAGE_MINIMUM_WIDTH * ratio_h / ratio_w,
    }
}

/// 校验特色图片，返回发现的问题；无问题时为空
pub fn validate_featured_image(image: Option<&FeaturedImage>) -> Vec<FeaturedImageIssue> {
    let Some(image) = image else {
        return vec![FeaturedImageIssue::Missing];
    };

    let minimum = minimum_featured_image_dimensions();
    if image.width < minimum.width || image.height < minimum.height {
        return vec![FeaturedImageIssue::TooSmall {
            actual: ImageDimensions {
                width: image.width,
                height: image.height,
            },
            minimum,
        }];
    }
    Vec::new()
}
