//! Country derivation from free-text launch locations

/// Location tails that do not name their country (seas, test ranges,
/// leased sites) mapped to the country the dataset attributes them to
const COUNTRY_OVERRIDES: &[(&str, &str)] = &[
    ("Russia", "Russian Federation"),
    ("New Mexico", "USA"),
    ("Yellow Sea", "China"),
    ("Shahrud Missile Test Site", "Iran"),
    ("Pacific Missile Range Facility", "USA"),
    ("Barents Sea", "Russian Federation"),
    ("Gran Canaria", "USA"),
];

/// The substring after the last comma of `location`, trimmed, passed
/// through the override table
pub fn derive_country(location: &str) -> String {
    let tail = location.rsplit(',').next().unwrap_or(location).trim();
    for (from, to) in COUNTRY_OVERRIDES {
        if tail == *from {
            return (*to).to_string();
        }
    }
    tail.to_string()
}

/// ISO 3166 alpha-3 code for `country`, or `"Unknown"`
///
/// Accepts an exact country name or an alpha-2/alpha-3 code, the lookups
/// the dataset's country column actually exercises. Iran and North Korea
/// are force-mapped: the ISO table knows them only under their formal
/// names, which never appear in launch locations.
pub fn country_code(country: &str) -> String {
    match country {
        "Iran" => return "IRN".to_string(),
        "North Korea" => return "PRK".to_string(),
        _ => {}
    }

    let wanted = normalize_name(country);
    if let Some(entry) = rust_iso3166::ALL
        .iter()
        .find(|entry| normalize_name(entry.name) == wanted)
    {
        return entry.alpha3.to_string();
    }

    let upper = country.to_ascii_uppercase();
    let by_code = match country.len() {
        2 => rust_iso3166::from_alpha2(&upper),
        3 => rust_iso3166::from_alpha3(&upper),
        _ => None,
    };
    match by_code {
        Some(entry) => entry.alpha3.to_string(),
        None => "Unknown".to_string(),
    }
}

/// ISO short names render some countries with a "(the)" suffix
/// ("Russian Federation (the)"); location tails never carry it.
fn normalize_name(name: &str) -> String {
    name.trim()
        .trim_end_matches(" (the)")
        .to_ascii_lowercase()
}
