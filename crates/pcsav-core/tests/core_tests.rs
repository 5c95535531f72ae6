use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use pcsav_core::model::parse_guid_hyphen;
use pcsav_core::naming::{self, decode, encode};
use pcsav_core::probe::{JsonSummaryReader, NoReader, probe, summary_to_json};
use pcsav_core::{Origin, PlayerClass, RecordSummary, RepositoryLayout, Reputation};

fn set_mtime(p: &Path, secs_ago: u64) {
    let t = SystemTime::now() - Duration::from_secs(secs_ago);
    fs::File::open(p).unwrap().set_modified(t).unwrap();
}

fn touch(p: &Path, secs_ago: u64) {
    fs::write(p, b"x").unwrap();
    set_mtime(p, secs_ago);
}

fn summary(name: &str) -> RecordSummary {
    RecordSummary {
        first_name: name.to_string(),
        origin: Origin::Earthborn,
        reputation: Reputation::Ruthless,
        class_id: 93955,
        fingerprint: vec![0xab, 0x12, 0xcd, 0x34, 0x56],
    }
}

#[test]
fn decode_well_formed_name() {
    let t = decode("Shepard_01_Soldier_150313_ab12cd3").expect("decode");
    assert_eq!(t.raw_name, "Shepard");
    assert_eq!(t.origin, Origin::None);
    assert_eq!(t.reputation, Reputation::Survivor);
    assert_eq!(t.class, PlayerClass::Soldier);
    assert_eq!(t.created_on, NaiveDate::from_ymd_opt(2013, 3, 15).unwrap());
    assert_eq!(t.fingerprint, "ab12cd3");

    let t = decode("Jane_11_vanguard_010199_ZZZZZZZ").expect("decode");
    assert_eq!(t.origin, Origin::Spacer);
    assert_eq!(t.class, PlayerClass::Vanguard);
    assert_eq!(t.created_on, NaiveDate::from_ymd_opt(2099, 1, 1).unwrap());
}

#[test]
fn decode_rejects_malformed_names() {
    for bad in [
        "",
        "Shepard",
        "Shepard_01_Soldier_150313",
        "Shepard_01_Soldier_150313_ab12cd3_extra",
        "Bad_99_Soldier_150313_ab12cd3",
        "Bad_04_Soldier_150313_ab12cd3",
        "Bad_1_Soldier_150313_ab12cd3",
        "Bad_011_Soldier_150313_ab12cd3",
        "Bad_01_Krogan_150313_ab12cd3",
        "Bad_01_Soldier_310413_ab12cd3",
        "Bad_01_Soldier_300213_ab12cd3",
        "Bad_01_Soldier_15031_ab12cd3",
        "Bad_01_Soldier_1503a3_ab12cd3",
        "Bad_01_Soldier_+50313_ab12cd3",
        "Bad_01_Soldier_150313_ab12cd",
        "Bad_01_Soldier_150313_ab12cd34",
    ] {
        assert!(decode(bad).is_none(), "{bad:?} should not decode");
    }
}

#[test]
fn encode_filters_name_and_maps_class() {
    let date = NaiveDate::from_ymd_opt(2012, 3, 6).unwrap();
    let fp = [0x0f, 0x8f, 0xad, 0x5b, 0xd9];
    let name = encode("Jane O'Shep 2", Origin::Colony, Reputation::Warhero, 93957, &fp, date);
    assert_eq!(name, "JaneOShep_22_Sentinel_060312_0F8FAD5");

    let unknown = encode("X", Origin::None, Reputation::None, 1, &fp, date);
    assert_eq!(unknown, "X_00_Unknown_060312_0F8FAD5");
    assert!(decode(&unknown).is_none());
}

#[test]
fn encode_decode_round_trip() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    for class in PlayerClass::ALL {
        for origin in [Origin::None, Origin::Spacer, Origin::Colony, Origin::Earthborn] {
            let fp = [0xde, 0xad, 0xbe, 0xef];
            let name = encode("Ashley", origin, Reputation::Warhero, class.class_id(), &fp, date);
            let t = decode(&name).expect("round trip");
            assert_eq!(t.raw_name, "Ashley");
            assert_eq!(t.origin, origin);
            assert_eq!(t.reputation, Reputation::Warhero);
            assert_eq!(t.class, class);
            assert_eq!(t.created_on, date);
            assert_eq!(t.fingerprint, "DEADBEE");
            assert_eq!(t.encode(), name);
        }
    }
}

#[test]
fn guid_bytes_follow_record_order() {
    let g = parse_guid_hyphen("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
    assert_eq!(g.to_string(), "0f8fad5b-d9cb-469f-a165-70867728950e");
    let b = g.to_bytes_le();
    assert_eq!(&b[..8], &[0x5b, 0xad, 0x8f, 0x0f, 0xcb, 0xd9, 0x9f, 0x46]);
    assert_eq!(&b[8..], &[0xa1, 0x65, 0x70, 0x86, 0x77, 0x28, 0x95, 0x0e]);
    assert!(parse_guid_hyphen("not-a-guid").is_err());
}

#[test]
fn class_token_lookup() {
    assert_eq!(naming::class_token(93954), "Adept");
    assert_eq!(naming::class_token(93953), "Engineer");
    assert_eq!(naming::class_token(0), naming::UNKNOWN_CLASS);
    assert_eq!(PlayerClass::from_class_id(93956), Some(PlayerClass::Vanguard));
}

#[test]
fn save_scan_tracks_highest_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let layout = RepositoryLayout::new(dir.path());
    touch(&dir.path().join("Save_0001.pcsav"), 30);
    touch(&dir.path().join("Save_0003.pcsav"), 20);
    touch(&dir.path().join("notasave.pcsav"), 10);
    touch(&dir.path().join("readme.txt"), 5);

    let listing = pcsav_core::scan_saves(&layout, dir.path());
    assert_eq!(listing.highest, 3);
    assert_eq!(listing.next_sequence(), 4);
    let names: Vec<String> = listing.entries.iter().map(|e| e.file_name()).collect();
    assert_eq!(names, ["notasave.pcsav", "Save_0003.pcsav", "Save_0001.pcsav"]);
    let seqs: Vec<Option<u32>> = listing.entries.iter().map(|e| e.sequence).collect();
    assert_eq!(seqs, [None, Some(3), Some(1)]);
}

#[test]
fn save_scan_of_missing_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let layout = RepositoryLayout::new(dir.path());
    let listing = pcsav_core::scan_saves(&layout, &dir.path().join("nope"));
    assert!(listing.entries.is_empty());
    assert_eq!(listing.highest, 0);
}

#[test]
fn sequence_parse_requires_four_digits() {
    let layout = RepositoryLayout::new("r");
    assert_eq!(layout.parse_sequence("Save_0000"), Some(0));
    assert_eq!(layout.parse_sequence("Save_0042"), Some(42));
    assert_eq!(layout.parse_sequence("Save_042"), None);
    assert_eq!(layout.parse_sequence("Save_00042"), None);
    assert_eq!(layout.parse_sequence("Save_+042"), None);
    assert_eq!(layout.parse_sequence("save_0042"), None);
    assert_eq!(layout.save_file_name(7), "Save_0007.pcsav");
}

#[test]
fn career_scan_of_missing_or_empty_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = RepositoryLayout::new(dir.path().join("missing"));
    assert!(pcsav_core::scan_careers(&missing, &NoReader).is_empty());
    let empty = RepositoryLayout::new(dir.path());
    assert!(pcsav_core::scan_careers(&empty, &NoReader).is_empty());
}

#[test]
fn career_scan_orders_and_falls_back() {
    let root = tempfile::tempdir().unwrap();
    let layout = RepositoryLayout::new(root.path());

    let decoded = root.path().join("Shepard_31_Soldier_150313_AB12CD3");
    let raw = root.path().join("my old career");
    let readable = root.path().join("Zed_00_Adept_010112_0000000");
    let no_saves = root.path().join("Empty_00_Adept_010112_0000000");
    for d in [&decoded, &raw, &readable, &no_saves] {
        fs::create_dir(d).unwrap();
    }
    touch(&decoded.join("Save_0000.pcsav"), 100);
    touch(&raw.join("Save_0000.PCSAV"), 100);
    fs::write(
        readable.join("Save_0000.pcsav"),
        serde_json::to_vec(&summary_to_json(&summary("Zaeed"))).unwrap(),
    )
    .unwrap();
    touch(&no_saves.join("notes.txt"), 100);
    set_mtime(&decoded, 300);
    set_mtime(&raw, 100);
    set_mtime(&readable, 200);

    let careers = pcsav_core::scan_careers(&layout, &JsonSummaryReader);
    let shown: Vec<String> = careers.iter().map(|c| c.display_name()).collect();
    assert_eq!(shown, ["my old career", "Zaeed", "Shepard"]);

    assert!(careers[0].token.is_none());
    assert!(careers[0].summary.is_none());
    assert_eq!(careers[1].summary.as_ref().unwrap().class_id, 93955);
    assert_eq!(careers[2].detail().as_deref(), Some("Soldier, 2013-03-15"));

    let again = pcsav_core::scan_careers(&layout, &JsonSummaryReader);
    assert_eq!(careers, again);
}

#[test]
fn probe_collapses_failures() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("Save_0000.pcsav");
    fs::write(&garbage, [0xff, 0x00, 0x13, 0x37]).unwrap();
    assert!(probe(&JsonSummaryReader, &garbage).is_err());
    assert!(probe(&JsonSummaryReader, &dir.path().join("missing.pcsav")).is_err());

    let partial = dir.path().join("partial.pcsav");
    fs::write(&partial, br#"{"firstName":"A","origin":9,"reputation":0,"classId":1,"fingerprint":"00"}"#).unwrap();
    assert!(probe(&JsonSummaryReader, &partial).is_err());

    let good = dir.path().join("good.pcsav");
    fs::write(
        &good,
        br#"{"firstName":"Kai","origin":2,"reputation":1,"classId":93952,"fingerprint":"0f8fad5b-d9cb-469f-a165-70867728950e"}"#,
    )
    .unwrap();
    let s = probe(&JsonSummaryReader, &good).expect("readable");
    assert_eq!(s.first_name, "Kai");
    assert_eq!(s.origin, Origin::Colony);
    assert_eq!(s.fingerprint[..4], [0x5b, 0xad, 0x8f, 0x0f]);
}

#[test]
fn zip_backup_of_career() {
    let root = tempfile::tempdir().unwrap();
    let career = root.path().join("Shepard_31_Soldier_150313_AB12CD3");
    fs::create_dir(&career).unwrap();
    touch(&career.join("Save_0000.pcsav"), 0);
    let zip = pcsav_core::backup::backup_career(&career).unwrap();
    assert!(zip.exists());
    assert_eq!(zip.parent(), Some(root.path()));
    assert!(pcsav_core::backup::backup_career(&root.path().join("nope")).is_err());
}

#[test]
fn short_fingerprint_still_yields_decodable_name() {
    let date = NaiveDate::from_ymd_opt(2013, 3, 15).unwrap();
    let name = encode("Kai", Origin::Spacer, Reputation::None, 93952, &[0xab, 0xcd], date);
    assert_eq!(name, "Kai_10_Soldier_150313_ABCD000");
    assert_eq!(decode(&name).expect("decodes").fingerprint, "ABCD000");
    let empty = encode("Kai", Origin::Spacer, Reputation::None, 93952, &[], date);
    assert!(decode(&empty).is_some());
}

#[test]
fn fingerprint_parse_requires_four_bytes() {
    use pcsav_core::probe::parse_fingerprint;
    assert!(parse_fingerprint("00").is_err());
    assert!(parse_fingerprint("001122").is_err());
    assert!(parse_fingerprint("0011223").is_err());
    assert_eq!(parse_fingerprint("00112233").unwrap(), [0x00, 0x11, 0x22, 0x33]);
    assert_eq!(parse_fingerprint("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap().len(), 16);

    let dir = tempfile::tempdir().unwrap();
    let short = dir.path().join("short.pcsav");
    fs::write(&short, br#"{"firstName":"A","origin":1,"reputation":0,"classId":93952,"fingerprint":"00"}"#).unwrap();
    assert!(probe(&JsonSummaryReader, &short).is_err());
}
