//! Output formatting module
//!
//! Renders extracted metadata for the terminal.

use std::fmt::Write;

use anyhow::Result;

use crate::torrent::TorrentMetadata;

/// Format bytes to human readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Plain-text summary, optionally followed by every piece hash
pub fn render_text(metadata: &TorrentMetadata, show_pieces: bool) -> String {
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "Name: {}", metadata.name());
    let _ = writeln!(out, "Announce URL: {}", metadata.announce());
    let _ = writeln!(
        out,
        "File Size: {} bytes ({})",
        metadata.length(),
        format_bytes(metadata.length())
    );
    let _ = writeln!(
        out,
        "Piece Length: {} bytes ({})",
        metadata.piece_length(),
        format_bytes(metadata.piece_length())
    );
    let _ = writeln!(out, "Number of Pieces: {}", metadata.piece_count());
    let _ = writeln!(out, "Info Hash: {}", metadata.info_hash_hex());

    if show_pieces {
        let _ = writeln!(out, "Pieces:");
        for (index, hash) in metadata.piece_hashes().iter().enumerate() {
            let _ = writeln!(out, "  {:>6}  {}", index, hex::encode(hash));
        }
    }

    out
}

/// Pretty-printed JSON document
pub fn render_json(metadata: &TorrentMetadata) -> Result<String> {
    Ok(serde_json::to_string_pretty(metadata)?)
}
