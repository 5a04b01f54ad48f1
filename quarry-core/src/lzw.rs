//! LZW (Lempel–Ziv–Welch) byte-string codec.
//!
//! A 12-bit variable-dictionary compressor used to store raw document
//! bodies. Every frame is a sequence of fixed-width codes packed
//! least-significant-bit first and terminated by a sentinel code; the
//! dictionary is rebuilt from scratch on every call and never shared.
//!
//! ## Frame format
//!
//! - Codes 0–255 are the byte alphabet; slots from `first_free_code` up to
//!   `max_code` are assigned to longer strings as the input is scanned.
//! - Codes are `code_bits` wide, packed LSB-first into the byte stream; a
//!   trailing partial byte is emitted if bits remain.
//! - `end_code` terminates the frame. The empty input compresses to just
//!   the terminator.
//!
//! Compression is infallible. Decompression reports malformed frames
//! (out-of-range codes, invalid back-references, missing terminator) as
//! [`CodecError`]; `decompress(compress(x)) == x` holds for every byte
//! string `x`.

use std::collections::HashMap;

use quarry_types::CodecError;

/// Codec parameters. The defaults describe the 12-bit frame used by the
/// document store; they are configurable but rarely changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwOptions {
    /// Width of each emitted code in the packed stream.
    pub code_bits: u32,
    /// First dictionary slot past the byte alphabet.
    pub first_free_code: u16,
    /// Terminator code appended to every frame.
    pub end_code: u16,
    /// Dictionary slots stop being assigned once this code is reached.
    pub max_code: u16,
}

impl Default for LzwOptions {
    fn default() -> Self {
        Self {
            code_bits: 12,
            first_free_code: 256,
            end_code: 4095,
            max_code: 4095,
        }
    }
}

/// LZW compressor/decompressor.
///
/// State is purely per-call; one instance can serve any number of frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lzw {
    options: LzwOptions,
}

impl Lzw {
    /// Creates a codec with the default 12-bit parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with custom parameters.
    pub const fn with_options(options: LzwOptions) -> Self {
        Self { options }
    }

    /// Returns the active options.
    #[inline(always)]
    pub const fn options(&self) -> &LzwOptions {
        &self.options
    }

    /// Compresses `input` into a terminated LZW frame. Infallible.
    pub fn compress(&self, input: &[u8]) -> Vec<u8> {
        let mut dict: HashMap<Vec<u8>, u16> = HashMap::with_capacity(4096);
        for byte in 0..=255u8 {
            dict.insert(vec![byte], byte as u16);
        }

        let mut next_code = self.options.first_free_code;
        let mut prefix: Vec<u8> = Vec::new();
        let mut codes: Vec<u16> = Vec::new();

        for &byte in input {
            if prefix.is_empty() {
                prefix.push(byte);
                continue;
            }

            let mut extended = prefix.clone();
            extended.push(byte);

            if dict.contains_key(&extended) {
                prefix = extended;
                continue;
            }

            if let Some(&code) = dict.get(&prefix) {
                codes.push(code);
            }
            if next_code < self.options.max_code {
                dict.insert(extended, next_code);
                next_code += 1;
            }
            prefix.clear();
            prefix.push(byte);
        }

        if !prefix.is_empty() {
            if let Some(&code) = dict.get(&prefix) {
                codes.push(code);
            }
        }

        codes.push(self.options.end_code);
        self.pack_codes(&codes)
    }

    /// Decompresses a frame produced by [`compress`](Self::compress).
    ///
    /// An empty stream decodes to the empty string. A frame that ends
    /// without the terminator, references an unassigned code, or makes an
    /// invalid back-reference is malformed.
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let codes = self.unpack_codes(data);
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut dict: Vec<Vec<u8>> = (0..=255u8).map(|byte| vec![byte]).collect();
        let mut next_code = self.options.first_free_code;

        let first = codes[0];
        if first == self.options.end_code {
            return Ok(Vec::new());
        }
        if first as usize >= dict.len() {
            return Err(CodecError::CodeOutOfRange {
                code: first,
                next_code,
            });
        }

        let mut prefix = dict[first as usize].clone();
        let mut output = prefix.clone();
        let mut terminated = false;

        for &code in &codes[1..] {
            if code == self.options.end_code {
                terminated = true;
                break;
            }

            let entry = if (code as usize) < dict.len() {
                dict[code as usize].clone()
            } else if code == next_code && next_code < self.options.max_code {
                // KwKwK: the code names the entry this very emission is
                // about to define, so it must be prefix + prefix[0].
                let mut entry = prefix.clone();
                entry.push(prefix[0]);
                entry
            } else if code == next_code {
                return Err(CodecError::InvalidBackReference);
            } else {
                return Err(CodecError::CodeOutOfRange { code, next_code });
            };

            output.extend_from_slice(&entry);

            if next_code < self.options.max_code {
                let mut assigned = prefix.clone();
                assigned.push(entry[0]);
                dict.push(assigned);
                next_code += 1;
            }
            prefix = entry;
        }

        if !terminated {
            return Err(CodecError::MissingTerminator);
        }
        Ok(output)
    }

    /// Packs codes LSB-first at `code_bits` per code.
    fn pack_codes(&self, codes: &[u16]) -> Vec<u8> {
        let mask = (1u32 << self.options.code_bits) - 1;
        let mut out = Vec::with_capacity((codes.len() * self.options.code_bits as usize) / 8 + 1);
        let mut buffer: u32 = 0;
        let mut bits: u32 = 0;

        for &code in codes {
            buffer |= (code as u32 & mask) << bits;
            bits += self.options.code_bits;
            while bits >= 8 {
                out.push((buffer & 0xFF) as u8);
                buffer >>= 8;
                bits -= 8;
            }
        }
        if bits > 0 {
            out.push((buffer & 0xFF) as u8);
        }
        out
    }

    /// Unpacks a byte stream back into codes; the dual of
    /// [`pack_codes`](Self::pack_codes). Leftover bits shorter than one
    /// code are dropped.
    fn unpack_codes(&self, data: &[u8]) -> Vec<u16> {
        let mask = (1u32 << self.options.code_bits) - 1;
        let mut codes = Vec::with_capacity(data.len() * 8 / self.options.code_bits as usize + 1);
        let mut buffer: u32 = 0;
        let mut bits: u32 = 0;

        for &byte in data {
            buffer |= (byte as u32) << bits;
            bits += 8;
            while bits >= self.options.code_bits {
                codes.push((buffer & mask) as u16);
                buffer >>= self.options.code_bits;
                bits -= self.options.code_bits;
            }
        }
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(input: &[u8]) {
        let codec = Lzw::new();
        let compressed = codec.compress(input);
        let decompressed = codec.decompress(&compressed).expect("valid frame");
        assert_eq!(decompressed, input);
    }

    #[test]
    fn roundtrip_text() {
        roundtrip(b"the quick brown fox jumps over the lazy dog");
        roundtrip(b"to be or not to be that is the question");
    }

    #[test]
    fn roundtrip_empty() {
        let codec = Lzw::new();
        let compressed = codec.compress(b"");
        // The empty string compresses to just the packed terminator.
        assert_eq!(compressed, vec![0xFF, 0x0F]);
        assert_eq!(codec.decompress(&compressed).expect("valid frame"), b"");
    }

    #[test]
    fn empty_stream_decodes_to_empty() {
        assert_eq!(Lzw::new().decompress(&[]).expect("empty frame"), b"");
    }

    #[test]
    fn roundtrip_all_byte_values() {
        let input: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
        roundtrip(&input);
    }

    #[test]
    fn roundtrip_kwkwk_runs() {
        // Runs of a single byte hit the KwKwK decode case immediately.
        roundtrip(b"aaaaaaaaaa");
        roundtrip(b"abababababababab");
    }

    #[test]
    fn long_repetitive_input_shrinks() {
        let input = vec![b'a'; 20_000];
        let codec = Lzw::new();
        let compressed = codec.compress(&input);
        assert!(compressed.len() < input.len());
        assert_eq!(codec.decompress(&compressed).expect("valid frame"), input);
    }

    #[test]
    fn dictionary_exhaustion_roundtrip() {
        // High-entropy input fills all 4096 dictionary slots well before
        // the end; the tail is coded with the frozen dictionary.
        let input: Vec<u8> = (0..60_000u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8)
            .collect();
        roundtrip(&input);
    }

    #[test]
    fn out_of_range_code_is_malformed() {
        let codec = Lzw::new();
        let frame = codec.pack_codes(&[300, codec.options.end_code]);
        assert_eq!(
            codec.decompress(&frame),
            Err(CodecError::CodeOutOfRange {
                code: 300,
                next_code: 256,
            })
        );
    }

    #[test]
    fn missing_terminator_is_malformed() {
        let codec = Lzw::new();
        let frame = codec.pack_codes(&[b'h' as u16, b'i' as u16]);
        assert_eq!(codec.decompress(&frame), Err(CodecError::MissingTerminator));
    }

    #[test]
    fn forward_reference_is_malformed() {
        let codec = Lzw::new();
        // 400 is far past next_code (256) on the second position.
        let frame = codec.pack_codes(&[b'a' as u16, 400, codec.options.end_code]);
        assert!(matches!(
            codec.decompress(&frame),
            Err(CodecError::CodeOutOfRange { code: 400, .. })
        ));
    }

    #[test]
    fn custom_narrow_options() {
        let codec = Lzw::with_options(LzwOptions {
            code_bits: 10,
            first_free_code: 256,
            end_code: 1023,
            max_code: 1023,
        });
        let input = b"narrow codes still round trip, narrow codes still round trip";
        let compressed = codec.compress(input);
        assert_eq!(
            codec.decompress(&compressed).expect("valid frame"),
            input.to_vec()
        );
    }
}
