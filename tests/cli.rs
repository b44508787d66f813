use assert_cmd::Command;
use predicates::str::{contains, starts_with};

fn cmd() -> Command {
    Command::cargo_bin("resqit").unwrap()
}

#[test]
fn phone_formats_number() {
    cmd()
        .args(["phone", "555-123-4567"])
        .assert()
        .success()
        .stdout(contains("(555) 123-4567"));
}

#[test]
fn payload_requires_all_fields() {
    cmd()
        .args(["payload", "--full-name", "John Doe", "--blood-type", "O+"])
        .assert()
        .failure()
        .stderr(contains("Please fill in all required fields."));
}

#[test]
fn payload_vcard_format() {
    cmd()
        .args([
            "payload",
            "--full-name",
            "John Doe",
            "--contact-name",
            "Jane Doe",
            "--contact-phone",
            "5551234567",
            "--blood-type",
            "b-",
            "--format",
            "vcard",
        ])
        .assert()
        .success()
        .stdout(starts_with("BEGIN:VCARD"))
        .stdout(contains("NOTE:Blood Type: B-"));
}

#[test]
fn payload_rejects_unknown_blood_type() {
    cmd()
        .args([
            "payload",
            "--full-name",
            "John Doe",
            "--contact-name",
            "Jane Doe",
            "--contact-phone",
            "5551234567",
            "--blood-type",
            "C+",
        ])
        .assert()
        .failure()
        .stderr(contains("Unrecognised blood type"));
}

#[test]
fn payload_rejects_overlong_phone() {
    cmd()
        .args([
            "payload",
            "--full-name",
            "John Doe",
            "--contact-name",
            "Jane Doe",
            "--contact-phone",
            "+1 555 123 4567",
            "--blood-type",
            "O+",
        ])
        .assert()
        .failure()
        .stderr(contains("at most 10 digits"));
}

#[cfg(feature = "qr")]
#[test]
fn generate_writes_png_and_card() {
    let dir = std::env::temp_dir().join(format!("resqit-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let form = dir.join("form.json");
    std::fs::write(
        &form,
        r#"{"fullName":"John Doe","emergencyContactName":"Jane Doe","emergencyContactPhone":"(555) 123-4567","bloodType":"O+"}"#,
    )
    .unwrap();

    cmd()
        .arg("generate")
        .arg("--from-json")
        .arg(&form)
        .arg("--out")
        .arg(&dir)
        .arg("--print")
        .assert()
        .success()
        .stdout(contains("None reported"))
        .stdout(contains("print card:"));

    let png = std::fs::read(dir.join("emergency-qr-code.png")).unwrap();
    assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    let card = std::fs::read_to_string(dir.join("emergency-card.html")).unwrap();
    assert!(card.contains("John Doe"));

    std::fs::remove_dir_all(&dir).ok();
}
