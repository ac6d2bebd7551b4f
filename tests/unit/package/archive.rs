use super::*;

fn artifact(name: &str, payload: &[u8]) -> OutputArtifact {
    OutputArtifact {
        filename: name.to_string(),
        bytes: payload.to_vec(),
    }
}

fn entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn single_artifact_is_individual_even_in_archive_mode() {
    let out = package(vec![artifact("one.jpg", b"1")], PackageMode::Archive, "bundle").unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "one.jpg");
    assert_eq!(out[0].media_type, "image/jpeg");
    assert_eq!(out[0].bytes, b"1");
}

#[test]
fn no_artifacts_yields_no_deliverables() {
    assert!(
        package(Vec::new(), PackageMode::Archive, "bundle")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn archive_holds_every_distinct_name_in_order() {
    let arts = vec![
        artifact("c.jpg", b"ccc"),
        artifact("a.jpg", b"a"),
        artifact("b.jpg", b"bb"),
    ];
    let out = package(arts, PackageMode::Archive, "resized-images").unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "resized-images.zip");
    assert_eq!(out[0].media_type, "application/zip");
    assert_eq!(entry_names(&out[0].bytes), ["c.jpg", "a.jpg", "b.jpg"]);

    let mut archive = zip::ZipArchive::new(Cursor::new(out[0].bytes.as_slice())).unwrap();
    let mut payload = Vec::new();
    std::io::Read::read_to_end(&mut archive.by_name("c.jpg").unwrap(), &mut payload).unwrap();
    assert_eq!(payload, b"ccc");
}

#[test]
fn archive_suffixes_colliding_names() {
    let arts = vec![
        artifact("x_final.jpg", b"1"),
        artifact("x_final.jpg", b"2"),
        artifact("x_final.jpg", b"3"),
    ];
    let out = package(arts, PackageMode::Archive, "bundle").unwrap();
    assert_eq!(
        entry_names(&out[0].bytes),
        ["x_final.jpg", "x_final-2.jpg", "x_final-3.jpg"]
    );
}

#[test]
fn individual_mode_keeps_order_and_names() {
    let arts = vec![artifact("same.jpg", b"1"), artifact("same.jpg", b"2")];
    let out = package(arts, PackageMode::Individual, "ignored").unwrap();
    let names: Vec<_> = out.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["same.jpg", "same.jpg"]);
    assert_eq!(out[1].bytes, b"2");
}

#[test]
fn dedupe_skips_suffixes_already_taken() {
    let names = dedupe_names(["a.jpg", "a-2.jpg", "a.jpg", "noext", "noext", ".jpg", ".jpg"]);
    assert_eq!(
        names,
        ["a.jpg", "a-2.jpg", "a-3.jpg", "noext", "noext-2", ".jpg", ".jpg-2"]
    );
}

#[test]
fn package_mode_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&PackageMode::Individual).unwrap(),
        "\"individual\""
    );
    assert_eq!(PackageMode::default(), PackageMode::Archive);
}
