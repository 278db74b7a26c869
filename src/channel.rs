//! # LSB 信道模块
//!
//! 负责把比特序列写入像素采样序列的最低有效位，以及反向读出。
//! 采样序列是图像解码后的扁平字节序列 (逐行、逐通道交错)，
//! 写入只改动每个被触及采样的最低位，高 7 位保持不变。

use crate::codec;
use crate::constants::SENTINEL;
use crate::error::StegoError;

/// 返回采样序列可以承载的载荷比特数。每个采样承载 1 bit。
pub fn capacity(samples: &[u8]) -> usize {
    samples.len()
}

/// 将比特序列写入采样序列的最低有效位。
///
/// 第 `i` 个比特写入第 `i` 个采样；索引大于等于比特数的采样不会被触及。
///
/// # Errors
///
/// 如果比特数超过 [`capacity`]，返回 [`StegoError::InsufficientCapacity`]，
/// 此时采样序列保持原样，不会发生部分写入。
pub fn embed_bits(bits: &[u8], samples: &mut [u8]) -> Result<(), StegoError> {
    if bits.len() > capacity(samples) {
        return Err(StegoError::InsufficientCapacity {
            required: bits.len(),
            available: capacity(samples),
        });
    }

    for (sample, &bit) in samples.iter_mut().zip(bits) {
        *sample = (*sample & 0xFE) | bit;
    }

    Ok(())
}

/// 按顺序读出每个采样的最低有效位。结果长度等于采样数，不会失败。
pub fn read_bits(samples: &[u8]) -> Vec<u8> {
    samples.iter().map(|&sample| sample & 1).collect()
}

/// 在采样序列中隐藏一条消息：比特展开后附加哨兵序列，再写入最低位。
///
/// # Errors
///
/// 消息含有码点超出 0-255 的字符时返回 [`StegoError::UnsupportedCharacter`]；
/// 消息比特流 (含哨兵) 超出容量时返回 [`StegoError::InsufficientCapacity`]，
/// 两种情况下采样序列都保持原样。
pub fn embed_message(message: &str, samples: &mut [u8]) -> Result<(), StegoError> {
    let mut bits = codec::text_to_bits(message)?;
    bits.extend_from_slice(&SENTINEL);
    embed_bits(&bits, samples)
}

/// 从采样序列中提取隐藏的消息。
///
/// 逐比特扫描最低位序列，以哨兵序列的首次出现作为消息边界。
/// 匹配可以从任意比特偏移开始，与编码端变长消息后的非对齐哨兵位置对应。
/// 消息自身比特中恰好含有哨兵模式时会在该处提前截断，这是该格式的固有性质。
///
/// # Errors
///
/// 哨兵序列不存在时返回 [`StegoError::NoHiddenMessage`]。
/// 哨兵匹配位置之前的比特数不是 8 的整数倍 (巧合匹配，并非真正的隐写载荷)
/// 时同样返回 [`StegoError::NoHiddenMessage`]，对使用者而言两者无法区分。
pub fn extract_message(samples: &[u8]) -> Result<String, StegoError> {
    let bits = read_bits(samples);

    let boundary = bits
        .windows(SENTINEL.len())
        .position(|window| window == SENTINEL)
        .ok_or(StegoError::NoHiddenMessage)?;

    codec::bits_to_text(&bits[..boundary]).map_err(|_| StegoError::NoHiddenMessage)
}
