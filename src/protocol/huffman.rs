// src/protocol/huffman.rs
//! Static prefix code applied to every launcher datagram.
//!
//! Layout of an encoded datagram:
//!
//! ```text
//! +----------------------+---------------------------------+
//! | header (1 byte)      | code words, LSB-first per byte  |
//! +----------------------+---------------------------------+
//! ```
//!
//! The header holds the number of padding bits (0..=7) in the last byte.
//! A header of `0xFF` means the body is stored uncompressed.

use lazy_static::lazy_static;

use super::huffman_table::SYMBOL_FREQUENCIES;
use crate::error::CodecError;

pub const RAW_MARKER: u8 = 0xFF;
const MAX_PADDING_BITS: u8 = 7;

lazy_static! {
    static ref LAUNCHER_CODEC: HuffmanCodec = HuffmanCodec::from_frequencies(&SYMBOL_FREQUENCIES);
}

pub fn encode(input: &[u8]) -> Vec<u8> {
    LAUNCHER_CODEC.encode(input)
}

pub fn decode(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    LAUNCHER_CODEC.decode(input)
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Leaf(u8),
    Branch { zero: usize, one: usize },
}

// Bit `i` of `bits` is emitted `i`-th, starting at the root branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeWord {
    pub bits: u32,
    pub len: u8,
}

#[derive(Debug)]
pub struct HuffmanCodec {
    nodes: Vec<Node>,
    root: usize,
    codes: [CodeWord; 256],
}

impl HuffmanCodec {
    // Merge order matches the server: each round scans live slots in index
    // order for the two lightest (strict `<`, lower slot wins a tie). The
    // lightest is the `1` child, the runner-up the `0` child, and the merged
    // node takes the lightest's slot.
    pub fn from_frequencies(frequencies: &[f32]) -> Self {
        let mut nodes: Vec<Node> = (0..=255u8).take(frequencies.len()).map(Node::Leaf).collect();
        let mut slots: Vec<Option<(f32, usize)>> = frequencies
            .iter()
            .take(nodes.len())
            .enumerate()
            .map(|(symbol, &freq)| Some((freq, symbol)))
            .collect();

        for _ in 1..slots.len() {
            let (mut lightest, mut runner_up) = (None, None);
            let (mut min1, mut min2) = (f32::MAX, f32::MAX);
            for (slot, entry) in slots.iter().enumerate() {
                let Some((freq, _)) = *entry else { continue };
                if freq < min1 {
                    runner_up = lightest;
                    min2 = min1;
                    lightest = Some(slot);
                    min1 = freq;
                } else if freq < min2 {
                    runner_up = Some(slot);
                    min2 = freq;
                }
            }
            let (Some(a), Some(b)) = (lightest, runner_up) else {
                break;
            };
            let (Some((freq_one, one)), Some((freq_zero, zero))) = (slots[a], slots[b]) else {
                break;
            };
            nodes.push(Node::Branch { zero, one });
            slots[a] = Some((freq_zero + freq_one, nodes.len() - 1));
            slots[b] = None;
        }
        let root = nodes.len().saturating_sub(1);

        let mut codes = [CodeWord::default(); 256];
        let mut stack = vec![(root, CodeWord::default())];
        while let Some((index, code)) = stack.pop() {
            match nodes.get(index) {
                Some(Node::Leaf(symbol)) => codes[*symbol as usize] = code,
                Some(Node::Branch { zero, one }) => {
                    debug_assert!(code.len < 32, "code word longer than 32 bits");
                    stack.push((*zero, CodeWord { bits: code.bits, len: code.len + 1 }));
                    stack.push((
                        *one,
                        CodeWord { bits: code.bits | (1 << code.len), len: code.len + 1 },
                    ));
                }
                None => {}
            }
        }

        Self { nodes, root, codes }
    }

    pub fn code_word(&self, symbol: u8) -> CodeWord {
        self.codes[symbol as usize]
    }

    pub fn encode(&self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(input.len() + 1);
        out.push(0);

        let mut current: u8 = 0;
        let mut used: u8 = 0;
        for &symbol in input {
            let code = self.codes[symbol as usize];
            for i in 0..code.len {
                if (code.bits >> i) & 1 == 1 {
                    current |= 1 << used;
                }
                used += 1;
                if used == 8 {
                    out.push(current);
                    current = 0;
                    used = 0;
                }
            }
        }
        if used > 0 {
            out.push(current);
            out[0] = 8 - used;
        }

        // Incompressible input goes out as-is behind the raw marker.
        if out.len() > input.len() {
            let mut raw = Vec::with_capacity(input.len() + 1);
            raw.push(RAW_MARKER);
            raw.extend_from_slice(input);
            return raw;
        }
        out
    }

    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let (&header, body) = input.split_first().ok_or(CodecError::EmptyPayload)?;
        if header == RAW_MARKER {
            return Ok(body.to_vec());
        }
        if header > MAX_PADDING_BITS || (body.is_empty() && header != 0) {
            return Err(CodecError::InvalidHeader(header));
        }

        let total_bits = body.len() * 8 - header as usize;
        let mut out = Vec::with_capacity(body.len() * 2);
        let mut node = self.root;
        for bit_index in 0..total_bits {
            let bit = (body[bit_index / 8] >> (bit_index % 8)) & 1;
            node = match self.nodes[node] {
                Node::Branch { zero, one } => {
                    if bit == 0 {
                        zero
                    } else {
                        one
                    }
                }
                Node::Leaf(_) => self.root,
            };
            if let Node::Leaf(symbol) = self.nodes[node] {
                out.push(symbol);
                node = self.root;
            }
        }

        if node != self.root {
            return Err(CodecError::IncompleteSymbol { decoded: out.len() });
        }
        Ok(out)
    }
}
