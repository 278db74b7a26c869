/// 标记隐藏消息结束的 16 位哨兵序列 (`1111111111111110`)。
/// 编码时附加在消息比特流之后，解码时扫描其首次出现以定位消息边界。
pub const SENTINEL: [u8; 16] = [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0];

/// 隐写单个字符所需的比特数。
/// 每个字符按 `u8` (8 bits) 处理，每个像素采样的最低位存储 1 bit，
/// 因此每个字符占用 8 个像素采样。
pub const BITS_PER_CHAR: usize = 8;

/// 可以安全保存隐写结果的无损图像格式扩展名。
/// 有损格式 (如 JPEG) 会在压缩时破坏最低有效位中的隐藏数据。
pub const LOSSLESS_EXTENSIONS: [&str; 6] = ["png", "bmp", "tiff", "tif", "webp", "qoi"];
