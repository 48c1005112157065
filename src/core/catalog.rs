//! Song catalog input and enriched output.
//!
//! Both ends are plain CSV with a header row. The loader selects two columns
//! by header name and drops incomplete rows; the writer emits every
//! accumulated row in one go, after the batch loop has finished.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::core::enrich::EnrichedRow;
use crate::core::metadata::MetadataRecord;
use crate::error::{CatalogError, FileSystemError, Result};

/// One song to look up: title plus original artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub track_name: String,
    pub artist_name: String,
}

impl CatalogRow {
    pub fn new(track_name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            track_name: track_name.into(),
            artist_name: artist_name.into(),
        }
    }
}

pub const ORIGINAL_TRACK_COLUMN: &str = "original_track_name";
pub const ORIGINAL_ARTIST_COLUMN: &str = "original_artist_name";

pub fn load_catalog(path: &Path, title_column: &str, artist_column: &str) -> Result<Vec<CatalogRow>> {
    if !path.exists() {
        return Err(FileSystemError::PathNotFound { path: path.to_path_buf() }.into());
    }

    let file = File::open(path)?;
    let rows = read_catalog(file, path, title_column, artist_column)?;
    info!("Loaded {} catalog rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse a catalog from any reader. `source` is only used in error messages.
pub fn read_catalog<R: Read>(
    reader: R,
    source: &Path,
    title_column: &str,
    artist_column: &str,
) -> Result<Vec<CatalogRow>> {
    let read_error = |e: csv::Error| CatalogError::Read {
        path: source.to_path_buf(),
        source: e,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(read_error)?.clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| CatalogError::MissingColumn {
                path: source.to_path_buf(),
                column: name.to_string(),
            })
    };
    let title_idx = column_index(title_column)?;
    let artist_idx = column_index(artist_column)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for record in csv_reader.records() {
        let record = record.map_err(read_error)?;
        let title = record.get(title_idx).map(str::trim).unwrap_or("");
        let artist = record.get(artist_idx).map(str::trim).unwrap_or("");

        if title.is_empty() || artist.is_empty() {
            dropped += 1;
            continue;
        }

        rows.push(CatalogRow::new(title, artist));
    }

    if dropped > 0 {
        debug!("Dropped {} catalog rows with a missing title or artist", dropped);
    }

    Ok(rows)
}

pub fn save_enriched<M: MetadataRecord>(path: &Path, rows: &[EnrichedRow<M>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_enriched(file, rows).map_err(|e| CatalogError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Saved {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Header is always the two original columns plus every provider column.
/// Rows without a match leave the provider cells empty.
pub fn write_enriched<M: MetadataRecord, W: Write>(writer: W, rows: &[EnrichedRow<M>]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![ORIGINAL_TRACK_COLUMN, ORIGINAL_ARTIST_COLUMN];
    header.extend_from_slice(M::COLUMNS);
    csv_writer.write_record(&header)?;

    let blanks = vec![""; M::COLUMNS.len()];
    for row in rows {
        let mut record = vec![row.original_track_name.as_str(), row.original_artist_name.as_str()];
        match &row.metadata {
            Some(metadata) => record.extend(metadata.values()),
            None => record.extend_from_slice(&blanks),
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::{SpotifyMetadata, YoutubeMetadata};
    use crate::error::EnrichError;
    use std::path::PathBuf;

    fn parse(content: &str) -> Result<Vec<CatalogRow>> {
        read_catalog(content.as_bytes(), &PathBuf::from("test.csv"), "SONG TITLE", "ORIGINAL ARTIST")
    }

    #[test]
    fn test_selects_configured_columns() {
        let rows = parse(
            "ID,SONG TITLE,ORIGINAL ARTIST,GENRE\n\
             1,Imagine,John Lennon,Rock\n\
             2,\"Hello, Goodbye\",The Beatles,Pop\n",
        )
        .unwrap();

        assert_eq!(
            rows,
            vec![
                CatalogRow::new("Imagine", "John Lennon"),
                CatalogRow::new("Hello, Goodbye", "The Beatles"),
            ]
        );
    }

    #[test]
    fn test_drops_rows_with_missing_values() {
        let rows = parse(
            "SONG TITLE,ORIGINAL ARTIST\n\
             Imagine,John Lennon\n\
             ,Queen\n\
             Yesterday,\n\
             \"  \",Someone\n\
             Truncated\n\
             Jolene,Dolly Parton\n",
        )
        .unwrap();

        assert_eq!(
            rows,
            vec![
                CatalogRow::new("Imagine", "John Lennon"),
                CatalogRow::new("Jolene", "Dolly Parton"),
            ]
        );
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = parse("TITLE,ARTIST\nImagine,John Lennon\n").unwrap_err();
        match err {
            EnrichError::Catalog(CatalogError::MissingColumn { column, .. }) => {
                assert_eq!(column, "SONG TITLE");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_catalog(Path::new("/nonexistent/catalog.csv"), "SONG TITLE", "ORIGINAL ARTIST")
            .unwrap_err();
        assert!(matches!(err, EnrichError::FileSystem(FileSystemError::PathNotFound { .. })));
    }

    #[test]
    fn test_write_matched_and_unmatched_rows() {
        let rows = vec![
            EnrichedRow {
                original_track_name: "Imagine".to_string(),
                original_artist_name: "John Lennon".to_string(),
                metadata: Some(SpotifyMetadata {
                    spotify_track_id: "abc".to_string(),
                    isrc: "N/A".to_string(),
                    spotify_track_name: "Imagine".to_string(),
                    spotify_artist_name: "John Lennon".to_string(),
                    album_name: "Imagine".to_string(),
                    release_date: "1971-09-09".to_string(),
                }),
            },
            EnrichedRow {
                original_track_name: "Unknown Song".to_string(),
                original_artist_name: "Nobody".to_string(),
                metadata: None,
            },
        ];

        let mut buffer = Vec::new();
        write_enriched(&mut buffer, &rows).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(
            output,
            "original_track_name,original_artist_name,spotify_track_id,isrc,spotify_track_name,spotify_artist_name,album_name,release_date\n\
             Imagine,John Lennon,abc,N/A,Imagine,John Lennon,Imagine,1971-09-09\n\
             Unknown Song,Nobody,,,,,,\n"
        );
    }

    #[test]
    fn test_write_quotes_embedded_delimiters() {
        let rows = vec![EnrichedRow {
            original_track_name: "Hello, Goodbye".to_string(),
            original_artist_name: "The Beatles".to_string(),
            metadata: Some(YoutubeMetadata {
                youtube_video_id: "vid1".to_string(),
                youtube_title: "Hello, Goodbye (Remastered)".to_string(),
                youtube_description: "Line one\nLine two".to_string(),
                youtube_channel_title: "The Beatles".to_string(),
                youtube_publish_date: "2015-12-24T08:00:00Z".to_string(),
            }),
        }];

        let mut buffer = Vec::new();
        write_enriched(&mut buffer, &rows).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), 7);
        assert_eq!(&record[0], "Hello, Goodbye");
        assert_eq!(&record[3], "Hello, Goodbye (Remastered)");
        assert_eq!(&record[4], "Line one\nLine two");
    }
}
