//! Plain-text views standing in for the list, details, and favorites screens.

use clap::ValueEnum;
use storefront_core::{Category, ContactKind, Entity, Storefront};

/// Tabs of the details view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DetailTab {
    About,
    Contact,
    Reviews,
}

/// Sample reviews shown on every details page.
const SAMPLE_REVIEWS: [(&str, f64, &str); 4] = [
    (
        "Sarah M.",
        5.0,
        "Amazing quality and great prices! Will definitely shop here again.",
    ),
    (
        "John D.",
        4.5,
        "Good selection of clothes, friendly staff. Recommended!",
    ),
    (
        "Emma L.",
        4.0,
        "Found some great pieces here. The store is well organized.",
    ),
    (
        "Mike R.",
        4.5,
        "Love the sustainable fashion concept. Great store!",
    ),
];

/// URI handed to the platform launcher for a contact action.
#[must_use]
pub fn contact_uri(kind: ContactKind, value: &str) -> String {
    match kind {
        ContactKind::Phone => format!("tel:{value}"),
        ContactKind::Email => format!("mailto:{value}"),
        ContactKind::Website => format!("http://{value}"),
    }
}

/// `"⭐ 4.5 • 200km • 6:00AM-10:00PM"`
#[must_use]
pub fn summary_line(entity: &Entity) -> String {
    format!(
        "⭐ {} • {}km • {}",
        entity.rating, entity.distance_km, entity.active_time
    )
}

/// Search results for one category, one entity per line.
#[must_use]
pub fn entity_list(storefront: &Storefront, category: Category, query: &str) -> String {
    let hits = storefront.search(category, query);
    if hits.is_empty() {
        return format!("No {category} matches \"{query}\"\n");
    }

    hits.into_iter()
        .map(|entity| {
            let marker = if storefront.is_favorite(entity) { " ♥" } else { "" };
            format!(
                "#{} {}{marker}  {}\n",
                entity.id,
                entity.title,
                summary_line(entity)
            )
        })
        .collect()
}

#[must_use]
pub fn details(storefront: &Storefront, entity: &Entity, tab: DetailTab) -> String {
    let heart = if storefront.is_favorite(entity) { "♥" } else { "♡" };
    let mut out = format!(
        "{} {heart}  [{}]\n{}\n\n",
        entity.title,
        entity.favorite_key(),
        summary_line(entity)
    );

    let body: Vec<String> = match tab {
        DetailTab::About => vec![entity.about.clone()],
        DetailTab::Contact => [
            ("Phone Number", ContactKind::Phone),
            ("Email", ContactKind::Email),
            ("Website", ContactKind::Website),
        ]
        .into_iter()
        .map(|(label, kind)| {
            let value = entity.contact(kind);
            format!("{label}: {value}  ({})", contact_uri(kind, value))
        })
        .collect(),
        DetailTab::Reviews => {
            let mut lines = vec![
                format!("Overall Rating: ⭐ {}/5", entity.rating),
                "Customer Reviews".to_string(),
            ];
            lines.extend(
                SAMPLE_REVIEWS
                    .iter()
                    .map(|(name, rating, text)| format!("  {name} ⭐ {rating:.1}  {text}")),
            );
            lines
        }
    };
    for line in body {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[must_use]
pub fn favorites(storefront: &Storefront) -> String {
    let favorites = storefront.list_favorites();
    if favorites.is_empty() {
        return "No Favorites Yet\nStart adding your favorite stores with --toggle <category>-<id>\n"
            .to_string();
    }

    let mut out = format!("My Favorites ({})\n", favorites.len());
    for favorite in favorites {
        out.push_str(&format!(
            "{} {}  {}\n",
            favorite.key,
            favorite.entity.title,
            summary_line(&favorite.entity)
        ));
    }
    out
}
