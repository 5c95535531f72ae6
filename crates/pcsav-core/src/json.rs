use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde_json::{Value, json};

use crate::careers::CareerEntry;
use crate::naming::CareerNameToken;
use crate::remove::DeleteReport;
use crate::saves::SaveListing;

fn timestamp(t: SystemTime) -> String {
    DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn token_to_json(t: &CareerNameToken) -> Value {
    json!({
        "name": t.raw_name,
        "origin": format!("{:?}", t.origin),
        "reputation": format!("{:?}", t.reputation),
        "class": t.class.name(),
        "createdOn": t.created_on.format("%Y-%m-%d").to_string(),
        "fingerprint": t.fingerprint,
    })
}

pub fn careers_to_json(careers: &[CareerEntry]) -> Value {
    let items: Vec<Value> = careers
        .iter()
        .map(|c| {
            json!({
                "path": c.path.display().to_string(),
                "display": c.display_name(),
                "detail": c.detail(),
                "readable": c.summary.is_some(),
                "token": c.token.as_ref().map(token_to_json),
                "modified": timestamp(c.modified),
            })
        })
        .collect();
    Value::Array(items)
}

pub fn saves_to_json(listing: &SaveListing) -> Value {
    let items: Vec<Value> = listing
        .entries
        .iter()
        .map(|s| {
            json!({
                "path": s.path.display().to_string(),
                "name": s.file_name(),
                "sequence": s.sequence,
                "modified": timestamp(s.modified),
            })
        })
        .collect();
    json!({ "highest": listing.highest, "saves": items })
}

pub fn report_to_json(r: &DeleteReport) -> Value {
    json!({
        "itemsRemoved": r.items_removed(),
        "removed": r.removed.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "failed": r.failed.iter().map(|(p, e)| json!({"path": p.display().to_string(), "error": e})).collect::<Vec<_>>(),
        "directoryRemoved": r.directory_removed,
        "error": r.error,
    })
}
