//! # 命令处理逻辑模块
//!
//! 包含处理 `encode`、`decode` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调图像 I/O、调用核心隐写算法以及向用户报告结果。
//! 图像在编码和解码两侧都统一展开为 RGBA8 采样序列，
//! 保证往返时核心算法看到完全相同的字节序列。

use crate::channel::{capacity, embed_message, extract_message};
use crate::cli::{CapacityArgs, DecodeArgs, EncodeArgs};
use crate::constants::{BITS_PER_CHAR, LOSSLESS_EXTENSIONS, SENTINEL};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};

/// 打开图像文件并展开为扁平的 RGBA8 采样缓冲区。
fn load_samples(path: &Path) -> Result<RgbaImage> {
    let picture = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    Ok(picture.to_rgba8())
}

/// 根据输入图像路径生成默认的输出路径 `veiled_<原文件名>.png`。
fn default_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map_or_else(|| "image".to_string(), |s| s.to_string_lossy().into_owned());

    image.with_file_name(format!("veiled_{stem}.png"))
}

/// 确保输出路径使用无损格式扩展名。
/// 有损格式会在压缩时破坏最低有效位，导致隐藏的消息悄然丢失，
/// 因此对其它扩展名发出警告并改存为 PNG。
fn lossless_dest(dest: PathBuf) -> PathBuf {
    let is_lossless = dest
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| LOSSLESS_EXTENSIONS.contains(&ext.as_str()));

    if is_lossless {
        return dest;
    }

    let redirected = dest.with_extension("png");
    eprintln!(
        "{} {} may not preserve the hidden message, saving as {} instead.",
        "Warning:".yellow().bold(),
        dest.to_string_lossy().yellow(),
        redirected.to_string_lossy().green()
    );

    redirected
}

/// 拒绝在未给出 `--force` 时覆盖已存在的输出文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );

    Ok(())
}

/// 处理 'encode' 命令的执行逻辑。
///
/// 负责读取并展开图像、检查隐写空间是否足够、调用核心算法写入消息比特和哨兵，
/// 最后将结果图像保存到无损格式的目标路径。
///
/// # Arguments
///
/// * `args` - 包含输入图像、消息文本和输出路径的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 图像没有足够的采样来容纳消息和哨兵。
/// * 消息中含有码点超出 0-255 的字符。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let mut picture = load_samples(&args.image)?;

    let required_space = args.message.chars().count() * BITS_PER_CHAR + SENTINEL.len();
    let available_space = capacity(&picture);

    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the message. \nRequired: {} bits, Available: {} bits",
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    embed_message(&args.message, &mut picture).with_context(|| {
        format!(
            "Failed to hide the message in: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let dest = lossless_dest(args.dest.unwrap_or_else(|| default_dest(&args.image)));
    ensure_writable(&dest, args.force)?;

    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'decode' 命令的执行逻辑。
///
/// 负责读取并展开经过隐写的图像、调用核心算法定位哨兵并还原消息，
/// 最后将消息打印到终端或写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入图像和可选输出路径的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 图像中不存在哨兵序列，即没有隐藏的消息。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法写入到目标文本文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let picture = load_samples(&args.image)?;

    let message = extract_message(&picture).with_context(|| {
        format!(
            "Failed to recover a message from '{}'. \nThe image may not contain a hidden message or was saved in a lossy format.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    match args.output {
        Some(path) => {
            ensure_writable(&path, args.force)?;

            fs::write(&path, &message).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;

            println!(
                "The message has been successfully recovered and saved: {}",
                path.to_string_lossy().green().bold()
            );
        }
        None => {
            println!("Decoded message: {}", message.green().bold());
        }
    }

    Ok(())
}

/// 处理 'capacity' 命令的执行逻辑。
///
/// 报告图像展开后的载荷比特数，以及扣除哨兵开销后最多可隐藏的字符数。
///
/// # Errors
///
/// 无法读取或解码输入的图像文件时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_samples(&args.image)?;

    let total_bits = capacity(&picture);
    let max_chars = total_bits.saturating_sub(SENTINEL.len()) / BITS_PER_CHAR;

    println!(
        "{} holds {} payload bits: up to {} characters after the {}-bit terminator.",
        args.image.to_string_lossy().green().bold(),
        total_bits.to_string().green().bold(),
        max_chars.to_string().green().bold(),
        SENTINEL.len()
    );

    Ok(())
}
