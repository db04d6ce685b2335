use assert_cmd::Command;
use predicates::prelude::*;

fn pdfpix() -> Command {
    Command::cargo_bin("pdfpix").unwrap()
}

#[test]
fn help_lists_commands() {
    pdfpix()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("interactive"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn convert_requires_pages() {
    pdfpix()
        .args(["convert", "book.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pages"));
}

#[test]
fn convert_rejects_unsupported_dpi() {
    pdfpix()
        .args(["convert", "book.pdf", "--pages", "1", "--dpi", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value '150'"));
}

#[test]
fn convert_rejects_unsupported_format() {
    pdfpix()
        .args(["convert", "book.pdf", "--pages", "1", "--format", "tiff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'tiff'"));
}

#[test]
fn overwrite_flags_conflict() {
    pdfpix()
        .args([
            "convert",
            "book.pdf",
            "--pages",
            "1",
            "--overwrite",
            "--skip-existing",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn convert_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    pdfpix()
        .current_dir(dir.path())
        .args(["convert", "missing.pdf", "--pages", "all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: missing.pdf"));
}

#[test]
fn info_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    pdfpix()
        .current_dir(dir.path())
        .args(["info", "missing.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}
