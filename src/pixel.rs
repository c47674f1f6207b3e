//! # 像素缓冲模块
//!
//! 定义编解码器操作的内存像素网格。像素以 32 位 ARGB
//! (`A<<24 | R<<16 | G<<8 | B`) 按行主序存储，与容器格式
//! (PNG、BMP 等) 无关。与 `image` crate 的转换只发生在边界处。

use image::{Rgba, RgbaImage};

/// 按行主序存储的 `width * height` ARGB 像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl PixelBuffer {
    /// 用同一颜色填满整个缓冲。
    pub fn filled(width: u32, height: u32, argb: u32) -> Self {
        Self {
            width,
            height,
            data: vec![argb; width as usize * height as usize],
        }
    }

    /// 由原始 ARGB 数据构建缓冲。
    /// 数据长度不等于 `width * height` 时返回 `None`。
    pub fn from_raw(width: u32, height: u32, data: Vec<u32>) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 像素总数。
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 读取 `(x, y)` 处的像素。坐标必须在网格范围内。
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// 覆写 `(x, y)` 处的像素。坐标必须在网格范围内。
    pub fn set(&mut self, x: u32, y: u32, argb: u32) {
        self.data[y as usize * self.width as usize + x as usize] = argb;
    }

    pub fn as_raw(&self) -> &[u32] {
        &self.data
    }

    /// 由 `image` crate 解码出的 RGBA 图像转换而来。
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let data = img
            .pixels()
            .map(|pixel| {
                let [r, g, b, a] = pixel.0;
                u32::from(a) << 24 | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
            })
            .collect();

        Self {
            width: img.width(),
            height: img.height(),
            data,
        }
    }

    /// 转换回 RGBA 图像，以便用无损格式保存。
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let argb = self.get(x, y);
            *pixel = Rgba([
                (argb >> 16) as u8,
                (argb >> 8) as u8,
                argb as u8,
                (argb >> 24) as u8,
            ]);
        }
        img
    }
}
