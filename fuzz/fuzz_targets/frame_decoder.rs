//! Fuzz target for FrameDecoder
//!
//! Feeds arbitrary byte chunks through the decoder to find:
//! - panics on any input or chunking
//! - frames that depend on where reads were split
//! - a cap that fails to trip on oversized input
//!
//! The decoder should NEVER panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use parley_proto::{DELIMITER, Frame, FrameDecoder, RawFrame};

#[derive(Debug, Arbitrary)]
struct Input {
    chunks: Vec<Vec<u8>>,
    small_cap: u8,
}

/// Decode `chunks` in order; stop at the first error.
fn decode(decoder: &mut FrameDecoder, chunks: &[Vec<u8>]) -> (Vec<RawFrame>, bool) {
    let mut frames = Vec::new();
    for chunk in chunks {
        decoder.extend(chunk);
        loop {
            match decoder.next_frame() {
                Ok(Some(frame)) => frames.push(frame),
                Ok(None) => break,
                Err(_) => return (frames, true),
            }
        }
    }
    (frames, false)
}

fuzz_target!(|input: Input| {
    let whole: Vec<u8> = input.chunks.concat();

    // Without a cap, chunking must not change the frames.
    let (chunked, failed) =
        decode(&mut FrameDecoder::with_max_frame_size(usize::MAX), &input.chunks);
    let (single, _) = decode(&mut FrameDecoder::with_max_frame_size(usize::MAX), &[whole]);
    assert!(!failed);
    assert_eq!(chunked, single);

    for frame in &chunked {
        // Emitted frames never contain a delimiter and parsing never panics.
        assert!(!frame.as_bytes().windows(DELIMITER.len()).any(|w| w == DELIMITER));
        let _ = Frame::parse(frame);
    }

    // With a small cap, the decoder must fail rather than buffer without bound.
    let cap = usize::from(input.small_cap);
    let mut capped = FrameDecoder::with_max_frame_size(cap);
    let (_, failed) = decode(&mut capped, &input.chunks);
    if !failed {
        assert!(capped.buffered_len() <= cap);
    }
});
