// Semantic infobox fields and the raw template keys that feed them.
//
// Order here is the column order of the coaster CSV (after `title`). Within a
// field, the first alias present on the page wins.

pub const FIELD_ALIASES: &[(&str, &[&str])] = &[
    // Identity
    ("name", &["name"]),
    // Location
    ("park", &["park"]),
    ("location", &["location"]),
    ("country", &["country"]),
    ("state", &["state"]),
    ("section", &["section"]),
    ("coord_lat", &["coord_lat", "latitude", "lat"]),
    ("coord_long", &["coord_long", "longitude", "long", "lon"]),
    // Lifecycle
    ("status", &["status"]),
    ("opened", &["opened", "openingdate", "opening_date", "opening_year"]),
    ("closed", &["closed"]),
    // Build / classification
    ("manufacturer", &["manufacturer"]),
    ("builder", &["builder"]),
    ("designer", &["designer"]),
    ("product", &["product", "model"]),
    ("class", &["class"]),
    ("type", &["type", "coaster_type"]),
    // Ride statistics
    ("speed", &["speed", "top_speed"]),
    ("height", &["height", "max_height"]),
    ("drop", &["drop"]),
    ("angle", &["angle"]),
    ("g_force", &["g-force", "g_force", "gforce"]),
    ("inversions", &["inversions"]),
    ("length", &["length"]),
    ("duration", &["duration"]),
    ("layout", &["layout"]),
    ("lift_launch", &["lift/launch", "lift", "launch", "lift_launch"]),
    // Rider constraints
    ("min_height", &["min_height", "minimum_height"]),
    ("min_height_unaccompanied", &["min_height_unaccompanied"]),
    ("max_height", &["max_height", "maximum_height"]),
    ("restriction", &["restriction"]),
    // Capacity
    ("riders_hour", &["riders/hour", "riders_per_hour", "capacity"]),
    ("riders_train", &["riders/train", "riders_per_train"]),
];

/// Identifier column of the coaster CSV.
pub const TITLE_COLUMN: &str = "title";

/// Full coaster CSV header: `title` then every semantic field.
pub fn coaster_columns() -> Vec<&'static str> {
    std::iter::once(TITLE_COLUMN)
        .chain(FIELD_ALIASES.iter().map(|(name, _)| *name))
        .collect()
}
