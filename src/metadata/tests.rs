use super::tags::read_tags;
use super::*;
use crate::error::ExtractError;

/// A tag-less 16-bit mono PCM WAV holding `samples` zero samples at 8 kHz.
fn silent_wav(samples: u32) -> Vec<u8> {
    let sample_rate: u32 = 8_000;
    let data_len = samples * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + data_len as usize, 0);
    out
}

#[test]
fn read_tags_rejects_garbage() {
    assert!(read_tags(b"definitely not audio").is_err());
}

#[test]
fn empty_file_is_malformed() {
    let err = read_tags(&[]).unwrap_err();
    assert!(matches!(err, ExtractError::Malformed(_)));
    assert_eq!(err.to_string(), "malformed file: empty file");

    let blob = AudioBlob::new("empty.mp3", "audio/mpeg", Vec::<u8>::new());
    let result = async_io::block_on(LoftyExtractor.extract(&blob));
    assert!(matches!(result, Err(ExtractError::Malformed(_))));
}

#[test]
fn read_tags_on_untagged_wav_yields_empty_fields() {
    let tags = read_tags(&silent_wav(8_000)).unwrap();
    assert_eq!(tags.title, None);
    assert_eq!(tags.artist, None);
    assert_eq!(tags.album, None);
    assert!(tags.cover.is_none());
}

#[test]
fn lofty_extractor_reads_from_the_blob_without_touching_it() {
    let bytes = silent_wav(800);
    let blob = AudioBlob::new("tone.wav", "audio/wav", bytes.clone());

    let result = async_io::block_on(LoftyExtractor.extract(&blob));
    assert!(result.is_ok());
    assert_eq!(blob.bytes(), bytes.as_slice());
}
