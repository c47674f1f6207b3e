//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `recover` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、像素缓冲转换、调用核心编解码器
//! 以及向用户报告结果。核心编解码器本身不做任何 I/O。

use crate::cli::{HideArgs, RecoverArgs};
use crate::error::StegoError;
use crate::pixel::PixelBuffer;
use crate::steganography;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本文件、把图像解码为像素缓冲、调用编码器嵌入文本，
/// 最后把结果以无损格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和覆盖开关的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像文件。
/// * 文本文件为空、不可读或不是合法 UTF-8。
/// * 图像没有足够的空间隐藏文本。
/// * 无法写入目标图像文件（有损格式未编译进本工具，无法被选中）。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| default_output(&args.image, "doctored_", "png"));
    ensure_writable(&dest, args.force)?;

    let picture = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = fs::read_to_string(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        !text.is_empty(),
        "The text file is empty, there is nothing to hide: {}",
        args.text.to_string_lossy().red().bold()
    );

    let pixels = PixelBuffer::from_rgba_image(&picture.to_rgba8());

    let doctored = match steganography::encode(&pixels, &text) {
        Ok(buffer) => buffer,
        Err(StegoError::CapacityExceeded { required, available }) => anyhow::bail!(
            "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        Err(err) => return Err(err.into()),
    };

    doctored.to_rgba_image().save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用解码器恢复文本长度和内容，
/// 最后将恢复的文本写入目标文本文件。结尾标记不匹配时仍会保存文本，
/// 但会先打印一条警告。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和覆盖开关的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像文件。
/// * 图像中没有可识别的隐藏信息，或隐藏的信息为空。
/// * 嵌入的数据被截断或不是合法 UTF-8。
/// * 无法写入目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .text
        .unwrap_or_else(|| default_output(&args.image, "recovered_", "txt"));
    ensure_writable(&dest, args.force)?;

    let picture = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let pixels = PixelBuffer::from_rgba_image(&picture.to_rgba8());

    let decoded = match steganography::decode(&pixels) {
        Ok(decoded) => decoded,
        Err(StegoError::InvalidLength | StegoError::LengthExceedsCapacity { .. }) => {
            anyhow::bail!(
                "No hidden message was found in the image: {}",
                args.image.to_string_lossy().red().bold()
            )
        }
        Err(StegoError::EmptyMessage) => anyhow::bail!(
            "The message hidden in '{}' is empty, there is nothing to save.",
            args.image.to_string_lossy().red().bold()
        ),
        Err(err) => {
            return Err(anyhow::Error::new(err).context(format!(
                "Failed to recover the hidden text from: {}",
                args.image.to_string_lossy().red().bold()
            )));
        }
    };

    if !decoded.marker_verified {
        println!(
            "{}",
            "Warning: the end marker did not match, the recovered text may be corrupted."
                .yellow()
                .bold()
        );
    }

    fs::write(&dest, &decoded.text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 在输入文件旁生成带前缀的默认输出路径，如 doctored_photo.png。
fn default_output(origin: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = origin
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    origin.with_file_name(format!("{prefix}{stem}.{extension}"))
}

/// 覆盖保护：目标文件已存在且未指定 `--force` 时拒绝执行。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse {} to overwrite it.",
        path.to_string_lossy().red().bold(),
        "--force".green().bold()
    );
    Ok(())
}
