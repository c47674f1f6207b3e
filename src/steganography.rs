//! # 隐写核心模块
//!
//! 负载只写入蓝色通道的最低有效位，每个像素承载 1 bit。
//! 嵌入帧依次为：4 字节小端序长度前缀、负载本身、3 字节结尾标记；
//! 每个字节都从最低位开始写入，像素按行主序遍历。

use crate::constants::{BITS_PER_PIXEL, END_MARKER, LENGTH_PREFIX_BYTES};
use crate::error::StegoError;
use crate::pixel::PixelBuffer;

/// 解码结果：恢复出的文本以及结尾标记是否完好。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// 为 `false` 时文本仍被完整恢复，但图像可能已被篡改。
    pub marker_verified: bool,
}

/// 给定尺寸的图像在蓝色通道策略下能承载的最大帧字节数。
pub fn capacity_bytes(width: u32, height: u32) -> usize {
    width as usize * height as usize * BITS_PER_PIXEL / 8
}

/// 把 `message` 嵌入 `pixels` 的副本并返回该副本，原缓冲保持不变。
pub fn encode(pixels: &PixelBuffer, message: &str) -> Result<PixelBuffer, StegoError> {
    let payload = message.as_bytes();
    let required = LENGTH_PREFIX_BYTES + payload.len() + END_MARKER.len();
    let available = capacity_bytes(pixels.width(), pixels.height());

    if required > available {
        return Err(StegoError::CapacityExceeded { required, available });
    }

    let mut doctored = pixels.clone();
    let mut cursor = 0;
    let length = (payload.len() as u32).to_le_bytes();

    for &byte in length.iter().chain(payload).chain(&END_MARKER) {
        embed_byte(&mut doctored, &mut cursor, byte);
    }

    Ok(doctored)
}

/// 从 `pixels` 中恢复嵌入的文本。
///
/// 结尾标记不匹配不会中断提取：已恢复的负载仍会返回，
/// 只是 `marker_verified` 为 `false`，由调用者决定是否信任。
pub fn decode(pixels: &PixelBuffer) -> Result<Decoded, StegoError> {
    let mut cursor = 0;

    let mut length = [0u8; LENGTH_PREFIX_BYTES];
    for byte in &mut length {
        *byte = extract_byte(pixels, &mut cursor)?;
    }
    let declared = u32::from_le_bytes(length);

    // 长度前缀按有符号 32 位解释，符号位被置位即视为无效。
    if declared > i32::MAX as u32 {
        return Err(StegoError::InvalidLength);
    }

    let capacity = capacity_bytes(pixels.width(), pixels.height());
    if declared as usize > capacity {
        return Err(StegoError::LengthExceedsCapacity {
            declared: declared as usize,
            capacity,
        });
    }

    if declared == 0 {
        return Err(StegoError::EmptyMessage);
    }

    let mut payload = Vec::with_capacity(declared as usize);
    for _ in 0..declared {
        payload.push(extract_byte(pixels, &mut cursor)?);
    }

    let mut marker = [0u8; END_MARKER.len()];
    for byte in &mut marker {
        *byte = extract_byte(pixels, &mut cursor)?;
    }

    let text = String::from_utf8(payload)?;

    Ok(Decoded {
        text,
        marker_verified: marker == END_MARKER,
    })
}

/// 把一个字节从最低位开始写入 `cursor` 起的 8 个像素的蓝色通道低位。
/// 调用前容量已经检查过，`cursor` 不会越界。
fn embed_byte(pixels: &mut PixelBuffer, cursor: &mut usize, byte: u8) {
    for bit in 0..8 {
        let x = (*cursor % pixels.width() as usize) as u32;
        let y = (*cursor / pixels.width() as usize) as u32;
        let pixel = pixels.get(x, y);
        let low = u32::from((byte >> bit) & 1);
        pixels.set(x, y, (pixel & !1) | low);
        *cursor += 1;
    }
}

/// 从 `cursor` 起的 8 个像素的蓝色通道低位重组一个字节。
/// 每次访问像素前都先检查边界。
fn extract_byte(pixels: &PixelBuffer, cursor: &mut usize) -> Result<u8, StegoError> {
    let mut byte = 0u8;
    for bit in 0..8 {
        if *cursor >= pixels.len() {
            return Err(StegoError::TruncatedImage);
        }
        let x = (*cursor % pixels.width() as usize) as u32;
        let y = (*cursor / pixels.width() as usize) as u32;
        byte |= ((pixels.get(x, y) & 1) as u8) << bit;
        *cursor += 1;
    }
    Ok(byte)
}
