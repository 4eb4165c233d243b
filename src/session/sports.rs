//! Sports an athlete can train for.

/// Catalog in display order.
pub const SPORTS: [&str; 8] = [
    "Soccer",
    "Basketball",
    "Tennis",
    "Baseball",
    "Track",
    "Swimming",
    "Volleyball",
    "Boxing",
];

pub fn is_known(name: &str) -> bool {
    catalog_name(name).is_some()
}

/// Catalog entry for `name`, matched exactly.
pub fn catalog_name(name: &str) -> Option<&'static str> {
    SPORTS.iter().copied().find(|sport| *sport == name)
}

/// Catalog entries contained in `selected`, in catalog order.
pub fn in_catalog_order<'a, I>(selected: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let selected: Vec<&str> = selected.into_iter().collect();
    SPORTS
        .iter()
        .copied()
        .filter(|sport| selected.contains(sport))
        .collect()
}
