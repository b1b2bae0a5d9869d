//! Components that are commonly used together.

/// Curated adjacency list keyed by tag name.
///
/// Entries that do not exist in the loaded catalog are ignored by the caller,
/// so the table may name components a given release does not ship.
const RELATED: &[(&str, &[&str])] = &[
    (
        "forge-app-bar",
        &[
            "forge-scaffold",
            "forge-toolbar",
            "forge-drawer",
            "forge-button",
            "forge-user-profile",
            "forge-app-bar-search",
            "forge-app-bar-menu-button",
            "forge-app-bar-notification-button",
            "forge-app-bar-help-button",
            "forge-icon-button",
        ],
    ),
    (
        "forge-drawer",
        &["forge-app-bar", "forge-list", "forge-list-item", "forge-toolbar"],
    ),
    (
        "forge-scaffold",
        &["forge-app-bar", "forge-drawer", "forge-toolbar", "forge-card"],
    ),
    ("forge-toolbar", &["forge-scaffold", "forge-button", "forge-icon-button"]),
    ("forge-button", &["forge-toolbar"]),
    ("forge-icon-button", &["forge-toolbar"]),
    ("forge-dialog", &["forge-button", "forge-backdrop"]),
    ("forge-list", &["forge-list-item", "forge-drawer"]),
    ("forge-list-item", &["forge-list", "forge-checkbox", "forge-radio"]),
    ("forge-card", &["forge-toolbar", "forge-button", "forge-icon-button"]),
    ("forge-table", &["forge-pagination"]),
    ("forge-select", &["forge-option", "forge-option-group"]),
    ("forge-autocomplete", &["forge-text-field"]),
    ("forge-tab-bar", &["forge-tab"]),
    ("forge-stepper", &["forge-step"]),
    (
        "forge-expansion-panel",
        &["forge-icon-button", "forge-button-area", "forge-open-icon"],
    ),
];

/// Tags related to `tag_name`, in curated order. Unknown tags have none.
pub fn related_to(tag_name: &str) -> &'static [&'static str] {
    RELATED
        .iter()
        .find(|(tag, _)| *tag == tag_name)
        .map_or(&[], |(_, related)| related)
}
