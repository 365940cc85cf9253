use std::fs;
use tempfile::tempdir;
use timetable_widget::{
    ArtifactKind, SelectedFile, StoredArtifact, UploadError, classify, ingest, parse_csv,
};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn csv_media_type_or_extension_selects_csv() {
    let by_type = SelectedFile::new("timetable.txt", "text/csv", "a,b");
    let by_name = SelectedFile::new("timetable.csv", "", "a,b");
    assert_eq!(classify(&by_type).unwrap(), ArtifactKind::Csv);
    assert_eq!(classify(&by_name).unwrap(), ArtifactKind::Csv);
}

#[test]
fn csv_extension_wins_over_image_media_type() {
    let file = SelectedFile::new("odd.csv", "image/png", "a,b");
    assert_eq!(classify(&file).unwrap(), ArtifactKind::Csv);
}

#[test]
fn image_media_types_select_image() {
    for media_type in ["image/png", "image/jpeg", "image/webp"] {
        let file = SelectedFile::new("photo", media_type, vec![1u8, 2, 3]);
        assert_eq!(classify(&file).unwrap(), ArtifactKind::Image);
    }
}

#[test]
fn unrecognized_files_are_rejected_explicitly() {
    let pdf = SelectedFile::new("schedule.pdf", "application/pdf", vec![0u8; 4]);
    match classify(&pdf) {
        Err(UploadError::UnsupportedFileType {
            file_name,
            media_type,
        }) => {
            assert_eq!(file_name, "schedule.pdf");
            assert_eq!(media_type, "application/pdf");
        }
        other => panic!("expected UnsupportedFileType, got {other:?}"),
    }

    // Extension match is case-sensitive, like the browser check
    let shouting = SelectedFile::new("DATA.CSV", "", "a,b");
    assert!(matches!(
        classify(&shouting),
        Err(UploadError::UnsupportedFileType { .. })
    ));
}

#[test]
fn parse_csv_keeps_ragged_rows_and_quoted_cells() {
    let rows = parse_csv(b"Time,Mon,Tue\n9:00,\"Maths, room 4\"\n10:00\n").unwrap();
    assert_eq!(
        rows,
        vec![
            row(&["Time", "Mon", "Tue"]),
            row(&["9:00", "Maths, room 4"]),
            row(&["10:00"]),
        ]
    );
}

#[test]
fn parse_csv_reports_undecodable_rows() {
    let err = parse_csv(b"a,b\n\xff\xfe,c\nd,e\n").unwrap_err();
    match err {
        UploadError::Ingestion(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(!errors[0].message.is_empty());
        }
        other => panic!("expected Ingestion error, got {other:?}"),
    }
}

#[test]
fn ingest_builds_image_artifact_from_file() {
    let file = SelectedFile::new("week.png", "image/png", vec![9u8; 10]);
    match ingest(&file).unwrap() {
        StoredArtifact::Image(image) => {
            assert_eq!(image.file_name, "week.png");
            assert_eq!(image.media_type, "image/png");
            assert_eq!(image.len(), 10);
        }
        other => panic!("expected image artifact, got {other:?}"),
    }
}

#[test]
fn selected_file_from_path_guesses_media_type() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("data.csv");
    let png_path = dir.path().join("timetable.png");
    let pdf_path = dir.path().join("notes.pdf");
    let odd_path = dir.path().join("blob.zzqq");
    fs::write(&csv_path, "a,b\nc,d").unwrap();
    fs::write(&png_path, [0x89u8, b'P', b'N', b'G']).unwrap();
    fs::write(&pdf_path, "%PDF").unwrap();
    fs::write(&odd_path, "?").unwrap();

    let csv = SelectedFile::from_path(&csv_path).unwrap();
    assert_eq!(csv.name, "data.csv");
    assert_eq!(csv.media_type, "text/csv");
    assert_eq!(csv.bytes, b"a,b\nc,d");

    assert_eq!(
        SelectedFile::from_path(&png_path).unwrap().media_type,
        "image/png"
    );
    assert_eq!(
        SelectedFile::from_path(&pdf_path).unwrap().media_type,
        "application/pdf"
    );
    assert_eq!(SelectedFile::from_path(&odd_path).unwrap().media_type, "");
}

#[test]
fn selected_file_from_missing_path_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(SelectedFile::from_path(dir.path().join("missing.csv")).is_err());
}
