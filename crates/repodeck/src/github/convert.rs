//! API payloads to display records.

use tracing::warn;

use crate::format::{fmt_iso, format_number, round_number, COMMIT_DATE_FORMAT};
use crate::models::{Language, LanguageBytes, Repository, RepositoryFull, RepositoryItem};

/// Flattens an API repository into a table row.
///
/// An unparsable or missing `pushed_at` leaves `last_commit_date` empty.
pub fn repository(item: RepositoryItem) -> Repository {
    let pushed_at = item.pushed_at.unwrap_or_default();
    let last_commit_date = if pushed_at.is_empty() {
        String::new()
    } else {
        fmt_iso(&pushed_at, COMMIT_DATE_FORMAT).unwrap_or_else(|err| {
            warn!(repo = %item.full_name, %pushed_at, %err, "unparsable pushed_at");
            String::new()
        })
    };

    Repository {
        id: item.id,
        stars: format_number(item.stargazers_count as f64, 1),
        stargazers_count: item.stargazers_count,
        name: item.name,
        full_name: item.full_name,
        pushed_at,
        last_commit_date,
        html_url: item.html_url,
        description: item.description,
        language: item.language,
        owner_name: item.owner.login,
        owner_link: item.owner.html_url,
        owner_avatar: item.owner.avatar_url,
    }
}

/// Byte counts to percentages, largest first.
///
/// Ties keep alphabetical order. An empty or all-zero map gives no languages.
pub fn languages(bytes: &LanguageBytes) -> Vec<Language> {
    let total: u64 = bytes.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut languages: Vec<Language> = bytes
        .iter()
        .map(|(name, &count)| Language {
            name: name.clone(),
            usage_percent: round_number(count as f64 * 100.0 / total as f64, 1),
        })
        .collect();
    languages.sort_by(|a, b| b.usage_percent.total_cmp(&a.usage_percent));
    languages
}

pub fn repository_full(item: RepositoryItem, bytes: &LanguageBytes) -> RepositoryFull {
    RepositoryFull {
        repository: repository(item),
        languages: languages(bytes),
    }
}
